//! CSV sink: one `<table>.csv` file per generated table.
//!
//! Each file starts with a header row naming the columns; null values are
//! written as empty fields so bulk loading reads them back as NULL. Any
//! failure aborts the run with the table and record index in the diagnostic.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::WriterBuilder;

use crate::table::{GeneratedData, TableData};

pub struct CsvSink {
    out_dir: PathBuf,
}

impl CsvSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Write every table, creating the output directory if needed.
    pub fn write_all(&self, data: &GeneratedData) -> Result<()> {
        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("creating output directory {}", self.out_dir.display()))?;
        for table in &data.tables {
            self.write_table(table)?;
        }
        Ok(())
    }

    /// Write a single table, returning the path of the file produced.
    pub fn write_table(&self, table: &TableData) -> Result<PathBuf> {
        let path = self.out_dir.join(format!("{}.csv", table.name));
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .with_context(|| format!("creating {}", path.display()))?;

        writer
            .write_record(table.columns)
            .with_context(|| format!("{}.csv: header", table.name))?;
        for (i, row) in table.rows.iter().enumerate() {
            let fields: Vec<String> = row.iter().map(|v| v.to_field()).collect();
            writer
                .write_record(&fields)
                .with_context(|| format!("{}.csv: record {}", table.name, i))?;
        }
        writer
            .flush()
            .with_context(|| format!("flushing {}", path.display()))?;
        Ok(path)
    }
}
