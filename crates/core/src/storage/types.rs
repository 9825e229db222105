use std::fmt;

use uuid::Uuid;

/// A dynamically typed CQL value, as bound to a statement or read from a row.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    Uuid(Uuid),
    Text(String),
    Double(f64),
    Float(f32),
    Null,
    /// A driver value of a type the catalog never stores, kept for diagnostics.
    Unsupported(String),
}

impl ColumnValue {
    /// Name of the CQL type, used in mapping error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnValue::Uuid(_) => "uuid",
            ColumnValue::Text(_) => "text",
            ColumnValue::Double(_) => "double",
            ColumnValue::Float(_) => "float",
            ColumnValue::Null => "null",
            ColumnValue::Unsupported(_) => "unsupported",
        }
    }
}

/// A row returned by the store: column names paired with their values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, ColumnValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column to this row.
    pub fn with(mut self, name: impl Into<String>, value: ColumnValue) -> Self {
        self.columns.push((name.into(), value));
        self
    }

    /// Looks up a column by name.
    pub fn get(&self, name: &str) -> Option<&ColumnValue> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<(String, ColumnValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, ColumnValue)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

/// Lifecycle of a store connection.
///
/// `Disconnected -> Connecting -> Ready -> Closed`, falling back from
/// `Connecting` to `Disconnected` when every attempt fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionState {
    Disconnected = 0,
    Connecting = 1,
    Ready = 2,
    Closed = 3,
}

impl ConnectionState {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => ConnectionState::Connecting,
            2 => ConnectionState::Ready,
            3 => ConnectionState::Closed,
            _ => ConnectionState::Disconnected,
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Ready => "ready",
            ConnectionState::Closed => "closed",
        };
        f.write_str(label)
    }
}
