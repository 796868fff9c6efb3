//! Tool definitions and output modes
//!
//! Defines the registered shape of a tool: its inputs, its output, and the
//! JSON schema handed to LLM clients.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::wire::ValueSchema;

/// Ways a tool call can complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Returned a value
    Value,
    /// Raised an error
    Error,
    /// Returned nothing
    Null,
}

/// Output side of a tool definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDefinition {
    /// Description taken from the return annotation's metadata
    #[serde(default)]
    pub description: Option<String>,
    /// Wire schema of the returned value; absent when nothing is returned
    #[serde(default)]
    pub value_schema: Option<ValueSchema>,
    pub available_modes: BTreeSet<OutputMode>,
}

impl OutputDefinition {
    /// Output of a tool that declares a return type
    pub fn value(value_schema: ValueSchema, description: Option<String>) -> Self {
        Self {
            description,
            value_schema: Some(value_schema),
            available_modes: [OutputMode::Value, OutputMode::Error].into_iter().collect(),
        }
    }

    /// Output of a tool without a declared return type
    pub fn none() -> Self {
        Self {
            description: None,
            value_schema: None,
            available_modes: [OutputMode::Null].into_iter().collect(),
        }
    }

    /// Allow a null result
    pub fn with_null(mut self) -> Self {
        self.available_modes.insert(OutputMode::Null);
        self
    }

    /// Check if the tool can complete in the given mode
    pub fn supports(&self, mode: OutputMode) -> bool {
        self.available_modes.contains(&mode)
    }
}

/// A single input parameter on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputParameter {
    /// Wire name
    pub name: String,
    /// Human-readable description for LLM
    pub description: String,
    pub required: bool,
    pub value_schema: ValueSchema,
}

/// Input side of a tool definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInput {
    pub parameters: Vec<InputParameter>,
    /// Parameter injected by the host at call time, hidden from the wire schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_context_parameter_name: Option<String>,
}

impl ToolInput {
    /// Get a parameter by wire name
    pub fn get(&self, name: &str) -> Option<&InputParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Names of required parameters, in declaration order
    pub fn required_names(&self) -> Vec<&str> {
        self.parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect()
    }

    /// JSON schema object for the inputs
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for param in &self.parameters {
            let mut prop = param.value_schema.to_json_schema();
            if let Value::Object(map) = &mut prop {
                map.insert("description".to_string(), Value::String(param.description.clone()));
            }
            properties.insert(param.name.clone(), prop);
        }

        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": self.required_names()
        })
    }
}

/// A registered tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name (e.g., "list_issues")
    pub name: String,
    /// Toolkit-qualified name (e.g., "Github.ListIssues")
    pub fully_qualified_name: String,
    pub toolkit: String,
    /// Human-readable description for LLM
    pub description: String,
    pub input: ToolInput,
    pub output: OutputDefinition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,
}

impl ToolDefinition {
    /// Check if the tool is deprecated
    pub fn is_deprecated(&self) -> bool {
        self.deprecation_message.is_some()
    }

    /// Schema in the shape LLM tool-calling APIs expect
    pub fn to_llm_schema(&self) -> Value {
        serde_json::json!({
            "name": self.fully_qualified_name.replace('.', "_"),
            "description": self.description,
            "input_schema": self.input.to_json_schema()
        })
    }
}

/// Convert a snake_case or kebab-case name to PascalCase
pub fn to_pascal_case(name: &str) -> String {
    name.split(['_', '-', ' '])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
