//! Wire type classification
//!
//! Maps an effective type annotation to its wire type, including inner item
//! types, enum values, and object properties.

use std::collections::BTreeMap;

use crate::error::{Result, ToolwireError};
use crate::types::{ObjectType, TypeAnnotation, resolve};

use super::schema::{ValueSchema, WireType};

/// Classification result for one annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireTypeInfo {
    pub wire_type: WireType,
    pub inner_wire_type: Option<WireType>,
    pub enum_values: Option<Vec<String>>,
    pub properties: Option<BTreeMap<String, WireTypeInfo>>,
    pub inner_properties: Option<BTreeMap<String, WireTypeInfo>>,
    pub description: Option<String>,
}

impl WireTypeInfo {
    pub fn new(wire_type: WireType) -> Self {
        Self {
            wire_type,
            inner_wire_type: None,
            enum_values: None,
            properties: None,
            inner_properties: None,
            description: None,
        }
    }

    /// Convert into the serialized value schema
    pub fn into_value_schema(self) -> ValueSchema {
        ValueSchema {
            val_type: self.wire_type,
            inner_val_type: self.inner_wire_type,
            enum_values: self.enum_values,
            properties: self.properties.map(schema_map),
            inner_properties: self.inner_properties.map(schema_map),
            description: self.description,
        }
    }
}

fn schema_map(props: BTreeMap<String, WireTypeInfo>) -> BTreeMap<String, ValueSchema> {
    props
        .into_iter()
        .map(|(name, info)| (name, info.into_value_schema()))
        .collect()
}

fn unsupported(annotation: &TypeAnnotation) -> ToolwireError {
    ToolwireError::UnsupportedParameterType(annotation.to_string())
}

/// Classify an annotation into its wire type.
///
/// `Annotated` wrappers classify as their base type. Unions (including
/// optionals), `None`, and `Any` have no wire type; optional values must be
/// unwrapped by the caller first.
pub fn get_wire_type_info(annotation: &TypeAnnotation) -> Result<WireTypeInfo> {
    match annotation {
        TypeAnnotation::Annotated(annotated) => {
            let mut info = get_wire_type_info(&annotated.base)?;
            if let Some(description) = resolve(annotation).description {
                info.description = Some(description);
            }
            Ok(info)
        }
        TypeAnnotation::Str => Ok(WireTypeInfo::new(WireType::String)),
        TypeAnnotation::Int => Ok(WireTypeInfo::new(WireType::Integer)),
        TypeAnnotation::Float => Ok(WireTypeInfo::new(WireType::Number)),
        TypeAnnotation::Bool => Ok(WireTypeInfo::new(WireType::Boolean)),
        TypeAnnotation::Enum(enum_type) => {
            let mut info = WireTypeInfo::new(WireType::String);
            info.enum_values = Some(enum_type.values.clone());
            Ok(info)
        }
        TypeAnnotation::Object(object) => {
            let mut info = WireTypeInfo::new(WireType::Json);
            info.properties = Some(object_properties(object)?);
            Ok(info)
        }
        TypeAnnotation::Dict(key, _) => {
            let key_info = get_wire_type_info(key)?;
            if key_info.wire_type != WireType::String {
                return Err(unsupported(annotation));
            }
            Ok(WireTypeInfo::new(WireType::Json))
        }
        TypeAnnotation::List(inner) => {
            let inner_info = get_wire_type_info(inner)?;
            if inner_info.wire_type == WireType::Array {
                return Err(unsupported(annotation));
            }
            let mut info = WireTypeInfo::new(WireType::Array);
            info.inner_wire_type = Some(inner_info.wire_type);
            info.enum_values = inner_info.enum_values;
            info.inner_properties = inner_info.properties;
            Ok(info)
        }
        TypeAnnotation::Union(_) | TypeAnnotation::None | TypeAnnotation::Any => Err(unsupported(annotation)),
    }
}

/// Classify every field of an object. Optional fields classify as their inner
/// type, including when the optional sits under an `Annotated` wrapper.
fn object_properties(object: &ObjectType) -> Result<BTreeMap<String, WireTypeInfo>> {
    let mut props = BTreeMap::new();
    for field in &object.fields {
        let resolved = resolve(&field.annotation);
        let field_type = resolved.effective.unwrap_optional().unwrap_or(resolved.effective);
        let mut info = get_wire_type_info(field_type)?;
        if resolved.description.is_some() {
            info.description = resolved.description;
        }
        props.insert(field.name.clone(), info);
    }
    Ok(props)
}
