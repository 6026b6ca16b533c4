//! Validation pipeline - ordered predicate rules evaluated against a record.

use serde_json::Value;

use crate::record::Record;

type Predicate = Box<dyn Fn(&Record) -> bool + Send + Sync>;

struct Rule {
    message: String,
    check: Predicate,
}

/// Ordered list of validation rules for one record type. Every rule is an
/// independent predicate; a record passes when no rule fails.
#[derive(Default)]
pub struct Validator {
    rules: Vec<Rule>,
}

impl Validator {
    pub fn new() -> Self {
        Validator::default()
    }

    /// Require an attribute to be non-blank.
    pub fn presence_of(&mut self, attribute: &str) {
        let name = attribute.to_string();
        self.rule(format!("{} can't be blank", attribute), move |record| {
            !is_blank(record.get(&name))
        });
    }

    /// Register an arbitrary rule. The record fails validation with the
    /// given message whenever the predicate returns false.
    pub fn rule(
        &mut self,
        message: impl Into<String>,
        check: impl Fn(&Record) -> bool + Send + Sync + 'static,
    ) {
        self.rules.push(Rule {
            message: message.into(),
            check: Box::new(check),
        });
    }

    /// Evaluate every rule against the record, returning the messages of the
    /// failing ones. Empty means the record is valid.
    pub fn run(&self, record: &Record) -> Vec<String> {
        self.rules
            .iter()
            .filter(|rule| !(rule.check)(record))
            .map(|rule| rule.message.clone())
            .collect()
    }
}

/// Blankness as validations see it: `Null`, an empty or whitespace-only
/// string, or an empty array/object.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RecordSchema;
    use serde_json::json;

    fn person() -> Record {
        RecordSchema::new("person")
            .attribute("name")
            .blank_record()
    }

    #[test]
    fn presence_fails_on_blank_values() {
        let mut validator = Validator::new();
        validator.presence_of("name");

        let mut record = person();
        assert_eq!(validator.run(&record), ["name can't be blank"]);

        record.set("name", "");
        assert_eq!(validator.run(&record), ["name can't be blank"]);

        record.set("name", "   ");
        assert_eq!(validator.run(&record), ["name can't be blank"]);
    }

    #[test]
    fn presence_passes_on_value() {
        let mut validator = Validator::new();
        validator.presence_of("name");

        let mut record = person();
        record.set("name", "David");
        assert!(validator.run(&record).is_empty());
    }

    #[test]
    fn custom_rule() {
        let mut validator = Validator::new();
        validator.rule("name is too short", |record| {
            record.get("name").as_str().map_or(false, |s| s.len() >= 3)
        });

        let mut record = person();
        record.set("name", "Jo");
        assert_eq!(validator.run(&record), ["name is too short"]);

        record.set("name", "Joe");
        assert!(validator.run(&record).is_empty());
    }

    #[test]
    fn failing_messages_accumulate_in_registration_order() {
        let mut validator = Validator::new();
        validator.presence_of("name");
        validator.rule("always fails", |_| false);

        let record = person();
        assert_eq!(
            validator.run(&record),
            ["name can't be blank", "always fails"]
        );
    }

    #[test]
    fn blankness() {
        assert!(is_blank(&Value::Null));
        assert!(is_blank(&json!("")));
        assert!(is_blank(&json!("  \t")));
        assert!(is_blank(&json!([])));
        assert!(is_blank(&json!({})));
        assert!(!is_blank(&json!("David")));
        assert!(!is_blank(&json!(0)));
        assert!(!is_blank(&json!(false)));
        assert!(!is_blank(&json!(["x"])));
    }
}
