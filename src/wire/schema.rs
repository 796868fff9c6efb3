//! Wire types and the serialized value schema

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Symbolic shape of a value on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    /// Objects and dictionaries
    #[serde(alias = "object")]
    Json,
}

impl WireType {
    /// Tag used in value schemas
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Json => "json",
        }
    }

    /// JSON Schema `type` keyword for this wire type
    pub fn json_schema_type(&self) -> &'static str {
        match self {
            Self::Json => "object",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schema of a single value as registered with a tool definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueSchema {
    pub val_type: WireType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_val_type: Option<WireType>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, ValueSchema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_properties: Option<BTreeMap<String, ValueSchema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ValueSchema {
    pub fn new(val_type: WireType) -> Self {
        Self {
            val_type,
            inner_val_type: None,
            enum_values: None,
            properties: None,
            inner_properties: None,
            description: None,
        }
    }

    /// Render as a JSON Schema fragment for LLM tool registration
    pub fn to_json_schema(&self) -> Value {
        let mut schema = Map::new();
        if self.val_type == WireType::Array {
            schema.insert("type".to_string(), json!("array"));
            let mut items = Map::new();
            if let Some(inner) = self.inner_val_type {
                items.insert("type".to_string(), json!(inner.json_schema_type()));
            }
            if let Some(values) = &self.enum_values {
                items.insert("enum".to_string(), json!(values));
            }
            if let Some(props) = &self.inner_properties {
                items.insert("properties".to_string(), properties_json(props));
            }
            schema.insert("items".to_string(), Value::Object(items));
        } else {
            schema.insert("type".to_string(), json!(self.val_type.json_schema_type()));
            if let Some(values) = &self.enum_values {
                schema.insert("enum".to_string(), json!(values));
            }
            if let Some(props) = &self.properties {
                schema.insert("properties".to_string(), properties_json(props));
            }
        }
        if let Some(description) = &self.description {
            schema.insert("description".to_string(), json!(description));
        }
        Value::Object(schema)
    }
}

fn properties_json(props: &BTreeMap<String, ValueSchema>) -> Value {
    let map: Map<String, Value> = props
        .iter()
        .map(|(name, schema)| (name.clone(), schema.to_json_schema()))
        .collect();
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_type_tags() {
        assert_eq!(WireType::String.as_str(), "string");
        assert_eq!(WireType::Json.to_string(), "json");
        let parsed: WireType = serde_json::from_str("\"object\"").unwrap();
        assert_eq!(parsed, WireType::Json);
        assert!(serde_json::from_str::<WireType>("\"tuple\"").is_err());
    }

    #[test]
    fn test_wire_type_serialization() {
        assert_eq!(serde_json::to_string(&WireType::Boolean).unwrap(), "\"boolean\"");
        let parsed: WireType = serde_json::from_str("\"array\"").unwrap();
        assert_eq!(parsed, WireType::Array);
    }

    #[test]
    fn test_value_schema_serialization_skips_empty() {
        let schema = ValueSchema::new(WireType::String);
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json, json!({"val_type": "string"}));
    }

    #[test]
    fn test_value_schema_enum_renamed() {
        let mut schema = ValueSchema::new(WireType::String);
        schema.enum_values = Some(vec!["open".into(), "closed".into()]);
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["enum"], json!(["open", "closed"]));
    }

    #[test]
    fn test_json_schema_array() {
        let mut schema = ValueSchema::new(WireType::Array);
        schema.inner_val_type = Some(WireType::Integer);
        schema.description = Some("ids".into());
        assert_eq!(
            schema.to_json_schema(),
            json!({"type": "array", "items": {"type": "integer"}, "description": "ids"})
        );
    }

    #[test]
    fn test_json_schema_object() {
        let mut schema = ValueSchema::new(WireType::Json);
        let mut props = BTreeMap::new();
        props.insert("title".to_string(), ValueSchema::new(WireType::String));
        schema.properties = Some(props);
        assert_eq!(
            schema.to_json_schema(),
            json!({"type": "object", "properties": {"title": {"type": "string"}}})
        );
    }
}
