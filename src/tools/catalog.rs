//! Tool catalog loading from TOML configuration
//!
//! Loads tool signatures from a TOML file, builds their definitions, and
//! provides lookup and export methods.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, ToolwireError};
use crate::types::{EnumType, ObjectType, TypeAnnotation, TypeRegistry, parse_type};

use super::definition::{ToolDefinition, to_pascal_case};
use super::signature::{FunctionSignature, Parameter, create_tool_definition};

/// Toolkit used when neither the file nor the tool names one
pub const DEFAULT_TOOLKIT: &str = "Local";

/// TOML representation of a tool parameter
#[derive(Debug, Deserialize)]
struct TomlParam {
    name: String,
    #[serde(rename = "type")]
    param_type: String,
    default: Option<toml::Value>,
    #[serde(default)]
    context: bool,
}

/// TOML representation of a tool signature
#[derive(Debug, Deserialize)]
struct TomlTool {
    name: String,
    toolkit: Option<String>,
    description: String,
    returns: Option<String>,
    deprecation: Option<String>,
    #[serde(default)]
    params: Vec<TomlParam>,
}

#[derive(Debug, Deserialize)]
struct TomlEnum {
    values: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TomlObject {
    #[serde(default)]
    fields: BTreeMap<String, String>,
}

/// TOML file structure
#[derive(Debug, Deserialize)]
struct TomlCatalog {
    toolkit: Option<String>,
    #[serde(default)]
    enums: BTreeMap<String, TomlEnum>,
    #[serde(default)]
    objects: BTreeMap<String, TomlObject>,
    #[serde(default, rename = "tool")]
    tools: Vec<TomlTool>,
}

/// Catalog of tool definitions keyed by fully qualified name
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    tools: BTreeMap<String, ToolDefinition>,
    types: TypeRegistry,
}

impl ToolCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load catalog from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_with_toolkit(path, DEFAULT_TOOLKIT)
    }

    /// Load catalog from a TOML file, falling back to `default_toolkit`
    pub fn from_file_with_toolkit(path: impl AsRef<Path>, default_toolkit: &str) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ToolwireError::Catalog(format!("Failed to read catalog file {}: {}", path.display(), e)))?;
        Self::from_toml_with_toolkit(&content, default_toolkit)
    }

    /// Load catalog from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        Self::from_toml_with_toolkit(content, DEFAULT_TOOLKIT)
    }

    /// Load catalog from TOML string, falling back to `default_toolkit`
    pub fn from_toml_with_toolkit(content: &str, default_toolkit: &str) -> Result<Self> {
        let catalog: TomlCatalog =
            toml::from_str(content).map_err(|e| ToolwireError::Catalog(format!("Failed to parse TOML: {}", e)))?;

        let mut types = TypeRegistry::new();
        for (name, toml_enum) in catalog.enums {
            if toml_enum.values.is_empty() {
                return Err(ToolwireError::Catalog(format!("Enum '{}' has no values", name)));
            }
            types.register_enum(EnumType::new(name, toml_enum.values));
        }
        Self::register_objects(&mut types, catalog.objects)?;

        let file_toolkit = catalog.toolkit.unwrap_or_else(|| default_toolkit.to_string());
        let mut result = Self {
            tools: BTreeMap::new(),
            types,
        };
        for toml_tool in catalog.tools {
            let toolkit = toml_tool.toolkit.clone().unwrap_or_else(|| file_toolkit.clone());
            let signature = result.convert_toml_tool(toml_tool)?;
            result.add_tool(&signature, &toolkit)?;
        }

        Ok(result)
    }

    /// Register object types. Objects may refer to each other in any order,
    /// so parse in passes until no further progress is made.
    fn register_objects(types: &mut TypeRegistry, objects: BTreeMap<String, TomlObject>) -> Result<()> {
        let mut pending: Vec<(String, TomlObject)> = objects.into_iter().collect();

        while !pending.is_empty() {
            let before = pending.len();
            let mut deferred = Vec::new();
            let mut last_error = None;
            for (name, toml_object) in pending {
                match Self::build_object(types, &name, &toml_object) {
                    Ok(object) => types.register_object(object),
                    Err(e) => {
                        last_error = Some(e);
                        deferred.push((name, toml_object));
                    }
                }
            }
            if deferred.len() == before
                && let Some(e) = last_error
            {
                return Err(e);
            }
            pending = deferred;
        }

        Ok(())
    }

    fn build_object(types: &TypeRegistry, name: &str, toml_object: &TomlObject) -> Result<ObjectType> {
        let mut object = ObjectType::new(name);
        for (field, expr) in &toml_object.fields {
            let annotation = parse_type(expr, types).map_err(|e| {
                ToolwireError::Catalog(format!("Field '{}.{}' has an invalid type '{}': {}", name, field, expr, e))
            })?;
            object = object.with_field(field.clone(), annotation);
        }
        Ok(object)
    }

    /// Convert TOML tool to a function signature
    fn convert_toml_tool(&self, toml_tool: TomlTool) -> Result<FunctionSignature> {
        let mut signature = FunctionSignature::new(toml_tool.name.clone(), toml_tool.description);

        for toml_param in toml_tool.params {
            let annotation = self.parse_for(&toml_tool.name, &toml_param.param_type)?;
            let mut param = Parameter::new(toml_param.name, annotation);
            if let Some(default) = toml_param.default {
                let default = serde_json::to_value(default)?;
                param = param.with_default(default);
            }
            if toml_param.context {
                param = param.as_context();
            }
            signature = signature.with_param(param);
        }

        if let Some(returns) = toml_tool.returns {
            signature = signature.returning(self.parse_for(&toml_tool.name, &returns)?);
        }
        if let Some(message) = toml_tool.deprecation {
            signature = signature.deprecated(message);
        }

        Ok(signature)
    }

    fn parse_for(&self, tool: &str, expr: &str) -> Result<TypeAnnotation> {
        parse_type(expr, &self.types)
            .map_err(|e| ToolwireError::Catalog(format!("Tool '{}' has an invalid type '{}': {}", tool, expr, e)))
    }

    /// Build and register a tool from its signature
    pub fn add_tool(&mut self, signature: &FunctionSignature, toolkit: &str) -> Result<&ToolDefinition> {
        let definition = create_tool_definition(signature, toolkit)?;
        let key = definition.fully_qualified_name.clone();
        self.add(definition)?;
        self.tools
            .get(&key)
            .ok_or_else(|| ToolwireError::ToolNotFound(key))
    }

    /// Add a built definition to the catalog
    pub fn add(&mut self, definition: ToolDefinition) -> Result<()> {
        if self.tools.contains_key(&definition.fully_qualified_name) {
            return Err(ToolwireError::DuplicateTool(definition.fully_qualified_name));
        }
        tracing::info!(
            tool = %definition.fully_qualified_name,
            params = definition.input.parameters.len(),
            deprecated = definition.is_deprecated(),
            "Registered tool"
        );
        self.tools.insert(definition.fully_qualified_name.clone(), definition);
        Ok(())
    }

    /// Get a tool by fully qualified name
    pub fn get(&self, fully_qualified_name: &str) -> Option<&ToolDefinition> {
        self.tools.get(fully_qualified_name)
    }

    /// Get a tool by fully qualified name, or fail
    pub fn require(&self, fully_qualified_name: &str) -> Result<&ToolDefinition> {
        self.get(fully_qualified_name)
            .ok_or_else(|| ToolwireError::ToolNotFound(fully_qualified_name.to_string()))
    }

    /// Find a tool by fully qualified name, short name, or PascalCase name
    pub fn find(&self, name: &str) -> Option<&ToolDefinition> {
        if let Some(tool) = self.get(name) {
            return Some(tool);
        }
        let pascal = to_pascal_case(name);
        self.tools
            .values()
            .find(|t| t.name == name || to_pascal_case(&t.name) == pascal)
    }

    /// List all fully qualified tool names
    pub fn list(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Get all tools
    pub fn all(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.values()
    }

    /// Get tools in a toolkit (case-insensitive)
    pub fn by_toolkit(&self, toolkit: &str) -> Vec<&ToolDefinition> {
        let wanted = to_pascal_case(toolkit).to_lowercase();
        self.tools
            .values()
            .filter(|t| t.toolkit.to_lowercase() == wanted)
            .collect()
    }

    /// Distinct toolkit names
    pub fn toolkits(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self.tools.values().map(|t| t.toolkit.as_str()).collect();
        set.into_iter().collect()
    }

    /// Named types declared by the catalog file
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// Get number of tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Remove a tool from the catalog
    pub fn remove(&mut self, fully_qualified_name: &str) -> Option<ToolDefinition> {
        self.tools.remove(fully_qualified_name)
    }

    /// Check if a tool exists
    pub fn contains(&self, fully_qualified_name: &str) -> bool {
        self.tools.contains_key(fully_qualified_name)
    }

    /// All definitions as a JSON array
    pub fn to_json(&self) -> Result<Value> {
        let tools: Vec<&ToolDefinition> = self.tools.values().collect();
        Ok(serde_json::to_value(tools)?)
    }

    /// LLM-facing schemas for all non-deprecated tools
    pub fn to_llm_schemas(&self) -> Vec<Value> {
        self.tools
            .values()
            .filter(|t| !t.is_deprecated())
            .map(|t| t.to_llm_schema())
            .collect()
    }
}
