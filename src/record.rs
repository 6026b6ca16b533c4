use std::collections::BTreeMap;

use serde_json::Value;

static NULL: Value = Value::Null;

/// A single record instance: an attribute map plus a nullable integer
/// identity. The identity is `None` until the record is first saved through
/// its store and never changes afterward.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    id: Option<u64>,
    attributes: BTreeMap<String, Value>,
    errors: Vec<String>,
}

impl Record {
    pub(crate) fn from_parts(id: Option<u64>, attributes: BTreeMap<String, Value>) -> Self {
        Record {
            id,
            attributes,
            errors: Vec::new(),
        }
    }

    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: u64) {
        self.id = Some(id);
    }

    /// Returns true until the record has been assigned an identity by a
    /// successful save.
    pub fn is_new_record(&self) -> bool {
        self.id.is_none()
    }

    /// Current value of an attribute. Undeclared names read as `Null`.
    pub fn get(&self, name: &str) -> &Value {
        self.attributes.get(name).unwrap_or(&NULL)
    }

    /// Set an attribute value. Never validates, never touches the store.
    /// Names the schema did not declare are dropped.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        match self.attributes.get_mut(name) {
            Some(slot) => *slot = value.into(),
            None => log::warn!("ignoring undeclared attribute {:?}", name),
        }
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    /// Messages left by the most recent validation run.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub(crate) fn set_errors(&mut self, errors: Vec<String>) {
        self.errors = errors;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with(names: &[&str]) -> Record {
        let attributes = names
            .iter()
            .map(|name| (name.to_string(), Value::Null))
            .collect();
        Record::from_parts(None, attributes)
    }

    #[test]
    fn new_record_has_no_id() {
        let record = record_with(&["name"]);
        assert!(record.is_new_record());
        assert_eq!(record.id(), None);
    }

    #[test]
    fn declared_attributes_start_null() {
        let record = record_with(&["name", "email"]);
        assert!(record.get("name").is_null());
        assert!(record.get("email").is_null());
    }

    #[test]
    fn set_and_get() {
        let mut record = record_with(&["name"]);
        record.set("name", "David");
        assert_eq!(record.get("name").as_str(), Some("David"));
    }

    #[test]
    fn set_undeclared_attribute_is_dropped() {
        let mut record = record_with(&["name"]);
        record.set("age", 42);
        assert!(record.get("age").is_null());
        assert!(!record.attributes().contains_key("age"));
    }

    #[test]
    fn undeclared_attribute_reads_null() {
        let record = record_with(&["name"]);
        assert!(record.get("missing").is_null());
    }

    #[test]
    fn assigned_id_marks_record_persisted() {
        let mut record = record_with(&["name"]);
        record.set_id(7);
        assert!(!record.is_new_record());
        assert_eq!(record.id(), Some(7));
    }

    #[test]
    fn errors_start_empty() {
        let mut record = record_with(&["name"]);
        assert!(record.errors().is_empty());

        record.set_errors(vec!["name can't be blank".to_string()]);
        assert_eq!(record.errors(), ["name can't be blank"]);
    }
}
