use serde_json::Value;

/// Placeholder shown for cells that are absent or falsy.
pub const MISSING_CELL: &str = "N/A";

/// A single field value of a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Bool(bool),
    Empty,
    /// Non-primitive payload. Displayable, but never part of a search.
    Nested(Value),
}

impl Cell {
    pub fn stringify(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => format_number(*n),
            Cell::Bool(b) => b.to_string(),
            Cell::Empty => String::new(),
            Cell::Nested(v) => v.to_string(),
        }
    }

    pub fn is_falsy(&self) -> bool {
        match self {
            Cell::Text(s) => s.is_empty(),
            Cell::Number(n) => *n == 0.0 || n.is_nan(),
            Cell::Bool(b) => !b,
            Cell::Empty => true,
            Cell::Nested(_) => false,
        }
    }

    pub fn is_nested(&self) -> bool {
        matches!(self, Cell::Nested(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Cell::Number(_))
    }
}

impl From<Value> for Cell {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Cell::Empty,
            Value::Bool(b) => Cell::Bool(b),
            Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Empty),
            Value::String(s) => Cell::Text(s),
            nested @ (Value::Array(_) | Value::Object(_)) => Cell::Nested(nested),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

// Integral values print without a fraction, the way a JSON backend sends them.
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// One row of named field values. Field order is kept as inserted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Cell)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing any previous value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, cell: impl Into<Cell>) {
        let name = name.into();
        let cell = cell.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = cell,
            None => self.fields.push((name, cell)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, cell: impl Into<Cell>) -> Self {
        self.insert(name, cell);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Cell> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, c)| c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.fields.iter().map(|(n, c)| (n.as_str(), c))
    }

    /// Stringified value of a field, `None` when the field does not exist.
    pub fn text(&self, name: &str) -> Option<String> {
        self.get(name).map(Cell::stringify)
    }
}

impl FromIterator<(String, Cell)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, Cell)>>(iter: T) -> Self {
        let mut record = Record::new();
        for (name, cell) in iter {
            record.insert(name, cell);
        }
        record
    }
}

/// Default cell rendering: the stringified value, or `N/A` for absent and falsy values.
pub fn render_cell(record: &Record, column: &str) -> String {
    match record.get(column) {
        Some(cell) if !cell.is_falsy() => cell.stringify(),
        _ => MISSING_CELL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_are_stringified_like_json() {
        assert_eq!(Cell::Number(42.0).stringify(), "42");
        assert_eq!(Cell::Number(2.5).stringify(), "2.5");
        assert_eq!(Cell::Number(-3.0).stringify(), "-3");
    }

    #[test]
    fn json_values_map_to_cells() {
        assert_eq!(Cell::from(json!("CCS")), Cell::Text("CCS".into()));
        assert_eq!(Cell::from(json!(3)), Cell::Number(3.0));
        assert_eq!(Cell::from(json!(null)), Cell::Empty);
        assert!(Cell::from(json!({"id": 1})).is_nested());
        assert!(Cell::from(json!([1, 2])).is_nested());
    }

    #[test]
    fn render_cell_falls_back_for_missing_and_falsy() {
        let record = Record::new()
            .with("Name", "Ada")
            .with("Units", 0.0)
            .with("Email", "");
        assert_eq!(render_cell(&record, "Name"), "Ada");
        assert_eq!(render_cell(&record, "Units"), MISSING_CELL);
        assert_eq!(render_cell(&record, "Email"), MISSING_CELL);
        assert_eq!(render_cell(&record, "Room"), MISSING_CELL);
    }

    #[test]
    fn insert_replaces_existing_field() {
        let mut record = Record::new().with("Code", "CCS");
        record.insert("Code", "COE");
        assert_eq!(record.iter().count(), 1);
        assert_eq!(record.text("Code").as_deref(), Some("COE"));
    }
}
