//! Function signatures and definition builders
//!
//! Builds the input and output sides of a tool definition from a declared
//! signature. Return and parameter annotations go through `resolve` before
//! wire classification.

use serde_json::Value;

use crate::error::{Result, ToolwireError};
use crate::types::{TypeAnnotation, metadata_text, resolve};
use crate::wire::get_wire_type_info;

use super::definition::{InputParameter, OutputDefinition, ToolDefinition, ToolInput, to_pascal_case};

/// A declared parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub annotation: TypeAnnotation,
    /// Default value; a parameter with a default is not required
    pub default: Option<Value>,
    /// Host-injected tool context
    pub context: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>, annotation: TypeAnnotation) -> Self {
        Self {
            name: name.into(),
            annotation,
            default: None,
            context: false,
        }
    }

    /// Set default value
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Mark as the tool context parameter
    pub fn as_context(mut self) -> Self {
        self.context = true;
        self
    }
}

/// A declared tool function
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    pub name: String,
    pub description: String,
    pub parameters: Vec<Parameter>,
    /// Declared return annotation, if any
    pub returns: Option<TypeAnnotation>,
    pub deprecation: Option<String>,
}

impl FunctionSignature {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
            returns: None,
            deprecation: None,
        }
    }

    /// Add a parameter
    pub fn with_param(mut self, param: Parameter) -> Self {
        self.parameters.push(param);
        self
    }

    /// Set return annotation
    pub fn returning(mut self, annotation: TypeAnnotation) -> Self {
        self.returns = Some(annotation);
        self
    }

    /// Mark as deprecated
    pub fn deprecated(mut self, message: impl Into<String>) -> Self {
        self.deprecation = Some(message.into());
        self
    }
}

/// Strip `Optional[...]`, reporting whether it was present
fn split_optional(annotation: &TypeAnnotation) -> (&TypeAnnotation, bool) {
    match annotation.unwrap_optional() {
        Some(inner) => (inner, true),
        None => (annotation, false),
    }
}

/// Metadata on the annotation itself, or on the inner type of an optional
/// (`Optional[Annotated[T, ...]]`)
fn declared_metadata(annotation: &TypeAnnotation) -> Option<&[Value]> {
    annotation
        .metadata()
        .or_else(|| annotation.unwrap_optional().and_then(TypeAnnotation::metadata))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Build the output definition from the signature's return annotation
pub fn create_output_definition(signature: &FunctionSignature) -> Result<OutputDefinition> {
    let Some(return_type) = &signature.returns else {
        return Ok(OutputDefinition::none());
    };

    let resolved = resolve(return_type);
    let (value_type, optional) = split_optional(resolved.effective);
    let mut value_schema = get_wire_type_info(value_type)?.into_value_schema();
    value_schema.description = None;

    let description = resolved.description.or_else(|| resolve(value_type).description);
    let output = OutputDefinition::value(value_schema, description);
    Ok(if optional { output.with_null() } else { output })
}

/// Build the input definition from the signature's parameters.
///
/// Parameter metadata is `(description,)` or `(wire_name, description, ...)`.
pub fn create_input_definition(signature: &FunctionSignature) -> Result<ToolInput> {
    let mut input = ToolInput::default();

    for param in &signature.parameters {
        if !is_identifier(&param.name) {
            return Err(ToolwireError::InvalidSignature(format!(
                "invalid parameter name '{}' in tool '{}'",
                param.name, signature.name
            )));
        }

        if param.context {
            if let Some(existing) = &input.tool_context_parameter_name {
                return Err(ToolwireError::InvalidSignature(format!(
                    "tool '{}' declares more than one context parameter ('{}', '{}')",
                    signature.name, existing, param.name
                )));
            }
            input.tool_context_parameter_name = Some(param.name.clone());
            continue;
        }

        let resolved = resolve(&param.annotation);
        let (name, description) = match declared_metadata(&param.annotation) {
            Some([Value::String(name), Value::String(description), ..]) => (name.clone(), Some(description.clone())),
            Some([first, ..]) => (param.name.clone(), Some(metadata_text(first))),
            _ => (param.name.clone(), resolved.description.clone()),
        };

        if !is_identifier(&name) {
            return Err(ToolwireError::InvalidSignature(format!(
                "invalid wire name '{}' for parameter '{}' in tool '{}'",
                name, param.name, signature.name
            )));
        }
        if input.get(&name).is_some() {
            return Err(ToolwireError::InvalidSignature(format!(
                "duplicate parameter '{}' in tool '{}'",
                name, signature.name
            )));
        }
        let description = description.ok_or_else(|| {
            ToolwireError::InvalidSignature(format!(
                "parameter '{}' of tool '{}' is missing a description",
                param.name, signature.name
            ))
        })?;

        let (value_type, optional) = split_optional(resolved.effective);
        let mut value_schema = get_wire_type_info(value_type)?.into_value_schema();
        value_schema.description = None;

        input.parameters.push(InputParameter {
            name,
            description,
            required: !optional && param.default.is_none(),
            value_schema,
        });
    }

    Ok(input)
}

/// Build a full tool definition for the given toolkit
pub fn create_tool_definition(signature: &FunctionSignature, toolkit: &str) -> Result<ToolDefinition> {
    if !is_identifier(&signature.name) {
        return Err(ToolwireError::InvalidSignature(format!(
            "invalid tool name '{}'",
            signature.name
        )));
    }
    let toolkit = to_pascal_case(toolkit);
    if toolkit.is_empty() {
        return Err(ToolwireError::InvalidSignature(format!(
            "tool '{}' has an empty toolkit name",
            signature.name
        )));
    }
    if signature.description.trim().is_empty() {
        return Err(ToolwireError::InvalidSignature(format!(
            "tool '{}' is missing a description",
            signature.name
        )));
    }

    let input = create_input_definition(signature)?;
    let output = create_output_definition(signature)?;

    Ok(ToolDefinition {
        name: signature.name.clone(),
        fully_qualified_name: format!("{}.{}", toolkit, to_pascal_case(&signature.name)),
        toolkit,
        description: signature.description.clone(),
        input,
        output,
        deprecation_message: signature.deprecation.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::definition::OutputMode;
    use crate::types::{EnumType, ObjectType};
    use crate::wire::WireType;
    use serde_json::json;

    fn described(base: TypeAnnotation, description: &str) -> TypeAnnotation {
        TypeAnnotation::described(base, description)
    }

    #[test]
    fn test_output_annotated_plain_string() {
        let sig = FunctionSignature::new("test_function", "A test function that returns an annotated string.")
            .returning(described(TypeAnnotation::Str, "A test string with metadata"));

        let output = create_output_definition(&sig).unwrap();
        assert_eq!(output.description.as_deref(), Some("A test string with metadata"));
        let schema = output.value_schema.as_ref().unwrap();
        assert_eq!(schema.val_type, WireType::String);
        assert!(output.supports(OutputMode::Value));
        assert!(output.supports(OutputMode::Error));
        assert!(!output.supports(OutputMode::Null));
    }

    #[test]
    fn test_output_annotated_multiple_metadata() {
        let sig = FunctionSignature::new("count", "Count things").returning(TypeAnnotation::annotated(
            TypeAnnotation::Int,
            vec![json!("name"), json!("description")],
        ));
        let output = create_output_definition(&sig).unwrap();
        assert_eq!(output.description.as_deref(), Some("name"));
        assert_eq!(output.value_schema.unwrap().val_type, WireType::Integer);
    }

    #[test]
    fn test_output_annotated_complex_metadata() {
        let sig = FunctionSignature::new("flag", "Return a flag")
            .returning(TypeAnnotation::annotated(TypeAnnotation::Bool, vec![json!({"key": "value"})]));
        let output = create_output_definition(&sig).unwrap();
        assert_eq!(output.value_schema.unwrap().val_type, WireType::Boolean);
    }

    #[test]
    fn test_output_annotated_list() {
        let sig = FunctionSignature::new("ids", "Get ids").returning(described(TypeAnnotation::list(TypeAnnotation::Int), "ids"));
        let output = create_output_definition(&sig).unwrap();
        assert_eq!(output.description.as_deref(), Some("ids"));
        let schema = output.value_schema.unwrap();
        assert_eq!(schema.val_type, WireType::Array);
        assert_eq!(schema.inner_val_type, Some(WireType::Integer));
    }

    #[test]
    fn test_output_plain_type_has_no_description() {
        let sig = FunctionSignature::new("name", "Get a name").returning(TypeAnnotation::Str);
        let output = create_output_definition(&sig).unwrap();
        assert!(output.description.is_none());
        assert_eq!(output.value_schema.unwrap().val_type, WireType::String);
    }

    #[test]
    fn test_output_optional_adds_null_mode() {
        let sig = FunctionSignature::new("maybe", "Maybe a string")
            .returning(described(TypeAnnotation::optional(TypeAnnotation::Str), "maybe"));
        let output = create_output_definition(&sig).unwrap();
        assert!(output.supports(OutputMode::Null));
        assert!(output.supports(OutputMode::Value));
        assert_eq!(output.value_schema.unwrap().val_type, WireType::String);
        assert_eq!(output.description.as_deref(), Some("maybe"));
    }

    #[test]
    fn test_output_optional_of_annotated_keeps_description() {
        let sig = FunctionSignature::new("label", "Get a label")
            .returning(TypeAnnotation::optional(described(TypeAnnotation::Str, "The label")));
        let output = create_output_definition(&sig).unwrap();
        assert_eq!(output.description.as_deref(), Some("The label"));
        assert!(output.supports(OutputMode::Null));
        let schema = output.value_schema.unwrap();
        assert_eq!(schema.val_type, WireType::String);
        assert!(schema.description.is_none());
    }

    #[test]
    fn test_output_without_return_type() {
        let sig = FunctionSignature::new("fire", "Fire and forget");
        let output = create_output_definition(&sig).unwrap();
        assert_eq!(output, OutputDefinition::none());
    }

    #[test]
    fn test_output_genuinely_unsupported_types_surface() {
        for annotation in [
            TypeAnnotation::None,
            TypeAnnotation::Any,
            TypeAnnotation::union(vec![TypeAnnotation::Str, TypeAnnotation::Int]),
            described(TypeAnnotation::Any, "anything"),
        ] {
            let sig = FunctionSignature::new("bad", "Bad").returning(annotation);
            let err = create_output_definition(&sig).unwrap_err();
            assert!(err.is_unsupported_type());
        }
    }

    #[test]
    fn test_input_definition() {
        let state = TypeAnnotation::Enum(EnumType::new("State", vec!["open".into(), "closed".into()]));
        let sig = FunctionSignature::new("list_issues", "List issues")
            .with_param(Parameter::new("context", TypeAnnotation::Any).as_context())
            .with_param(Parameter::new("owner", described(TypeAnnotation::Str, "The repository owner")))
            .with_param(Parameter::new(
                "repo_name",
                TypeAnnotation::annotated(TypeAnnotation::Str, vec![json!("repo"), json!("The repository name")]),
            ))
            .with_param(Parameter::new("state", described(TypeAnnotation::optional(state), "Issue state")))
            .with_param(Parameter::new("per_page", described(TypeAnnotation::Int, "Page size")).with_default(json!(30)));

        let input = create_input_definition(&sig).unwrap();
        assert_eq!(input.tool_context_parameter_name.as_deref(), Some("context"));
        assert_eq!(input.parameters.len(), 4);

        let repo = input.get("repo").unwrap();
        assert_eq!(repo.description, "The repository name");
        assert!(repo.required);

        let state = input.get("state").unwrap();
        assert!(!state.required);
        assert_eq!(state.value_schema.val_type, WireType::String);
        assert_eq!(state.value_schema.enum_values.as_ref().unwrap().len(), 2);

        assert!(!input.get("per_page").unwrap().required);
        assert_eq!(input.required_names(), vec!["owner", "repo"]);
    }

    #[test]
    fn test_input_missing_description() {
        let sig = FunctionSignature::new("t", "T").with_param(Parameter::new("owner", TypeAnnotation::Str));
        let err = create_input_definition(&sig).unwrap_err();
        assert!(err.to_string().contains("missing a description"));
    }

    #[test]
    fn test_input_optional_of_annotated() {
        let sig = FunctionSignature::new("t", "T")
            .with_param(Parameter::new(
                "label",
                TypeAnnotation::optional(described(TypeAnnotation::Str, "The label")),
            ))
            .with_param(Parameter::new(
                "repo_name",
                TypeAnnotation::optional(TypeAnnotation::annotated(
                    TypeAnnotation::Str,
                    vec![json!("repo"), json!("The repository name")],
                )),
            ));
        let input = create_input_definition(&sig).unwrap();

        let label = input.get("label").unwrap();
        assert_eq!(label.description, "The label");
        assert!(!label.required);
        assert_eq!(label.value_schema.val_type, WireType::String);

        let repo = input.get("repo").unwrap();
        assert_eq!(repo.description, "The repository name");
        assert!(!repo.required);
    }

    #[test]
    fn test_input_duplicate_names() {
        let sig = FunctionSignature::new("t", "T")
            .with_param(Parameter::new("a", described(TypeAnnotation::Str, "first")))
            .with_param(Parameter::new(
                "b",
                TypeAnnotation::annotated(TypeAnnotation::Str, vec![json!("a"), json!("renamed")]),
            ));
        let err = create_input_definition(&sig).unwrap_err();
        assert!(err.to_string().contains("duplicate parameter 'a'"));
    }

    #[test]
    fn test_input_two_context_parameters() {
        let sig = FunctionSignature::new("t", "T")
            .with_param(Parameter::new("ctx", TypeAnnotation::Any).as_context())
            .with_param(Parameter::new("ctx2", TypeAnnotation::Any).as_context());
        assert!(create_input_definition(&sig).is_err());
    }

    #[test]
    fn test_input_invalid_name() {
        let sig = FunctionSignature::new("t", "T").with_param(Parameter::new("1st", described(TypeAnnotation::Str, "d")));
        assert!(matches!(
            create_input_definition(&sig).unwrap_err(),
            ToolwireError::InvalidSignature(_)
        ));
    }

    #[test]
    fn test_input_object_parameter() {
        let issue = ObjectType::new("Issue").with_field("title", TypeAnnotation::Str);
        let sig = FunctionSignature::new("create", "Create")
            .with_param(Parameter::new("issue", described(TypeAnnotation::Object(issue), "The issue")));
        let input = create_input_definition(&sig).unwrap();
        let param = input.get("issue").unwrap();
        assert_eq!(param.value_schema.val_type, WireType::Json);
        assert!(param.value_schema.properties.as_ref().unwrap().contains_key("title"));
    }

    #[test]
    fn test_tool_definition() {
        let sig = FunctionSignature::new("list_issues", "List issues in a repository")
            .with_param(Parameter::new("owner", described(TypeAnnotation::Str, "The owner")))
            .returning(described(TypeAnnotation::list(TypeAnnotation::Str), "Issue titles"))
            .deprecated("Use search_issues instead");

        let tool = create_tool_definition(&sig, "github").unwrap();
        assert_eq!(tool.name, "list_issues");
        assert_eq!(tool.toolkit, "Github");
        assert_eq!(tool.fully_qualified_name, "Github.ListIssues");
        assert!(tool.is_deprecated());
        assert_eq!(tool.output.description.as_deref(), Some("Issue titles"));
    }

    #[test]
    fn test_tool_definition_requires_description() {
        let sig = FunctionSignature::new("empty", "  ");
        assert!(create_tool_definition(&sig, "x").is_err());
    }

    #[test]
    fn test_tool_definition_invalid_name() {
        let sig = FunctionSignature::new("bad name", "Bad");
        assert!(create_tool_definition(&sig, "x").is_err());
    }
}
