//! Selector runtime (C9): the library emitted code references.
//!
//! Not part of the compiled core — emitted target scripts `from runtime
//! import Selector, Record` and expect this exact contract to exist
//! alongside them. [`RUNTIME_SOURCE`] is the actual Python text shipped for
//! that purpose; [`Record`]/[`Selector`] mirror its semantics in Rust so the
//! contract has a place to live as executable, testable documentation
//! rather than only a string literal.

/// Python source for the `runtime` module emitted code imports from.
///
/// Generalized from `selector.py`'s `Record`/`Selector` classes to the full
/// method set: `select`/`shiftSelect` are added (absent from the original
/// file but named by the contract), and `setName` is dropped since property
/// mutation emits its own `record.name = value` assignment inside the
/// `getSelected()` loop instead of calling back into the runtime.
pub const RUNTIME_SOURCE: &str = r#"class Record:
    def __init__(self, record_type, body, selected=True):
        self.record_type = record_type
        self.name = record_type
        self.body = body
        self.selected = selected


class Selector:
    def __init__(self):
        self.records = []

    def getSelected(self):
        return [record for record in self.records if record.selected]

    def unselectAll(self):
        for record in self.records:
            record.selected = False

    def selectAll(self):
        for record in self.records:
            record.selected = True

    def add(self, record):
        self.unselectAll()
        self.records.append(record)

    def select(self, name):
        for record in self.records:
            record.selected = record.name == name

    def shiftSelect(self, name):
        for record in self.records:
            if record.name == name:
                record.selected = True
"#;

/// Rust-side mirror of the runtime's `Record`, kept in lockstep with
/// [`RUNTIME_SOURCE`] and exercised only by tests — the crate never
/// constructs these at translation time (the generated code does).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub record_type: String,
    pub name: String,
    pub selected: bool,
}

impl Record {
    pub fn new(record_type: impl Into<String>) -> Self {
        let record_type = record_type.into();
        Self {
            name: record_type.clone(),
            record_type,
            selected: true,
        }
    }
}

/// Rust-side mirror of the runtime's `Selector`.
#[derive(Debug, Clone, Default)]
pub struct Selector {
    pub records: Vec<Record>,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_selected(&self) -> Vec<&Record> {
        self.records.iter().filter(|r| r.selected).collect()
    }

    pub fn unselect_all(&mut self) {
        for r in &mut self.records {
            r.selected = false;
        }
    }

    pub fn select_all(&mut self) {
        for r in &mut self.records {
            r.selected = true;
        }
    }

    pub fn add(&mut self, record: Record) {
        self.unselect_all();
        self.records.push(record);
    }

    pub fn select(&mut self, name: &str) {
        for r in &mut self.records {
            r.selected = r.name == name;
        }
    }

    pub fn shift_select(&mut self, name: &str) {
        for r in &mut self.records {
            if r.name == name {
                r.selected = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_makes_new_record_the_sole_selection() {
        let mut s = Selector::new();
        s.add(Record::new("Simulation"));
        s.add(Record::new("Rectangle"));
        let selected: Vec<&str> = s.get_selected().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(selected, vec!["Rectangle"]);
    }

    #[test]
    fn select_replaces_current_selection() {
        let mut s = Selector::new();
        s.add(Record::new("a"));
        s.add(Record::new("b"));
        s.select("a");
        let selected: Vec<&str> = s.get_selected().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(selected, vec!["a"]);
    }

    #[test]
    fn shift_select_extends_current_selection() {
        let mut s = Selector::new();
        s.add(Record::new("a"));
        s.add(Record::new("b"));
        s.select("a");
        s.shift_select("b");
        let mut selected: Vec<&str> = s.get_selected().iter().map(|r| r.name.as_str()).collect();
        selected.sort();
        assert_eq!(selected, vec!["a", "b"]);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut s = Selector::new();
        s.add(Record::new("a"));
        s.add(Record::new("b"));
        s.select_all();
        let names: Vec<&str> = s.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn runtime_source_defines_the_full_contract() {
        for needed in [
            "class Record",
            "class Selector",
            "def getSelected",
            "def unselectAll",
            "def selectAll",
            "def add",
            "def select",
            "def shiftSelect",
        ] {
            assert!(
                RUNTIME_SOURCE.contains(needed),
                "runtime source missing {needed}"
            );
        }
        let opens = RUNTIME_SOURCE.matches('(').count();
        let closes = RUNTIME_SOURCE.matches(')').count();
        assert_eq!(opens, closes, "unbalanced parens in embedded runtime source");
    }
}
