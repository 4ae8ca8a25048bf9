//! Row and table model for generated data.

use crate::subscription::SubscriptionLedger;

/// A single generated field value.
#[derive(Debug, Clone, PartialEq)]
pub enum CsvValue {
    /// Rendered as an empty field; bulk loading reads it back as NULL.
    Null,
    Int(i64),
    Float(f64),
    Str(String),
}

impl CsvValue {
    /// Render for one delimited field.
    pub fn to_field(&self) -> String {
        match self {
            CsvValue::Null => String::new(),
            CsvValue::Int(n) => n.to_string(),
            CsvValue::Float(x) => x.to_string(),
            CsvValue::Str(s) => s.clone(),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            CsvValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CsvValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CsvValue::Null)
    }
}

/// A row of generated field values, positional per the table's columns.
pub type Row = Vec<CsvValue>;

/// Generated rows for a single output table.
#[derive(Debug, Clone)]
pub struct TableData {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    pub rows: Vec<Row>,
}

/// Everything a single generation pass produced, tables in load order.
#[derive(Debug, Clone)]
pub struct GeneratedData {
    pub tables: Vec<TableData>,
    /// Retained subscription windows, kept so consumers can re-check the
    /// cancellation gate against the emitted rows.
    pub subscriptions: SubscriptionLedger,
}

impl GeneratedData {
    pub fn table(&self, name: &str) -> Option<&TableData> {
        self.tables.iter().find(|t| t.name == name)
    }
}
