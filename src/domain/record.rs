// Raw source records, before any typing or filtering
use std::collections::HashMap;

/// A single field value exactly as the source delivered it.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<&serde_json::Value> for RawValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => RawValue::Null,
            serde_json::Value::Bool(b) => RawValue::Bool(*b),
            serde_json::Value::Number(n) => n.as_f64().map(RawValue::Number).unwrap_or(RawValue::Null),
            serde_json::Value::String(s) => RawValue::Text(s.clone()),
            // Nested structures are never a reading
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => RawValue::Null,
        }
    }
}

/// One observation at one instant from one source.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub timestamp: String,
    pub fields: HashMap<String, RawValue>,
}

impl RawRecord {
    pub fn new(timestamp: String, fields: HashMap<String, RawValue>) -> Self {
        Self { timestamp, fields }
    }

    /// Look up a field; `None` means the source never mentioned it.
    pub fn field(&self, name: &str) -> Option<&RawValue> {
        self.fields.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_value_from_json() {
        assert_eq!(RawValue::from(&json!(null)), RawValue::Null);
        assert_eq!(RawValue::from(&json!(0)), RawValue::Number(0.0));
        assert_eq!(RawValue::from(&json!(1.5)), RawValue::Number(1.5));
        assert_eq!(RawValue::from(&json!("2.5")), RawValue::Text("2.5".to_string()));
        assert_eq!(RawValue::from(&json!(true)), RawValue::Bool(true));
        assert_eq!(RawValue::from(&json!([1, 2])), RawValue::Null);
    }

    #[test]
    fn test_field_lookup() {
        let mut fields = HashMap::new();
        fields.insert("speed".to_string(), RawValue::Number(3.0));
        let record = RawRecord::new("2021-01-01T00:00:00Z".to_string(), fields);

        assert_eq!(record.field("speed"), Some(&RawValue::Number(3.0)));
        assert_eq!(record.field("height"), None);
    }
}
