use serde_json::Value;

use crate::record::Record;

/// Per-type descriptor: a name plus the ordered set of declared attributes.
/// The name keys error messages and log lines; the attribute set governs
/// which values a record of this type carries.
#[derive(Clone, Debug)]
pub struct RecordSchema {
    name: String,
    attributes: Vec<String>,
}

impl RecordSchema {
    pub fn new(name: impl Into<String>) -> Self {
        RecordSchema {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Declare an attribute. Declaration order is preserved.
    pub fn attribute(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// A fresh record of this type: no identity, every declared attribute
    /// initialized to `Null`.
    pub fn blank_record(&self) -> Record {
        let attributes = self
            .attributes
            .iter()
            .map(|name| (name.clone(), Value::Null))
            .collect();
        Record::from_parts(None, attributes)
    }
}
