//! Type annotations attached to tool parameters and return values
//!
//! `TypeAnnotation` is a closed set of shapes. Metadata-carrying annotations
//! are the `Annotated` variant; everything else carries no metadata.

use std::fmt;

use serde_json::Value;

/// A declared type on a parameter or return value
#[derive(Debug, Clone, PartialEq)]
pub enum TypeAnnotation {
    Str,
    Int,
    Float,
    Bool,
    /// The unit/none type (`None`)
    None,
    Any,
    List(Box<TypeAnnotation>),
    Dict(Box<TypeAnnotation>, Box<TypeAnnotation>),
    /// Union of two or more members; `Optional[T]` is `Union[T, None]`
    Union(Vec<TypeAnnotation>),
    Enum(EnumType),
    Object(ObjectType),
    Annotated(Annotated),
}

/// A named enumeration whose wire values are strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    pub name: String,
    pub values: Vec<String>,
}

impl EnumType {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// A field of an object type
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectField {
    pub name: String,
    pub annotation: TypeAnnotation,
}

/// A named record type with ordered fields
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
    pub name: String,
    pub fields: Vec<ObjectField>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field
    pub fn with_field(mut self, name: impl Into<String>, annotation: TypeAnnotation) -> Self {
        self.fields.push(ObjectField {
            name: name.into(),
            annotation,
        });
        self
    }
}

/// A base type wrapped together with an ordered metadata tuple
#[derive(Debug, Clone, PartialEq)]
pub struct Annotated {
    pub base: Box<TypeAnnotation>,
    pub metadata: Vec<Value>,
}

impl Annotated {
    /// Wrap `base` with metadata. Nested wrappers are flattened, inner metadata first.
    pub fn new(base: TypeAnnotation, metadata: Vec<Value>) -> Self {
        match base {
            TypeAnnotation::Annotated(inner) => {
                let mut merged = inner.metadata;
                merged.extend(metadata);
                Self {
                    base: inner.base,
                    metadata: merged,
                }
            }
            base => Self {
                base: Box::new(base),
                metadata,
            },
        }
    }

    /// Inner-type reference of the wrapper.
    ///
    /// Only generic containers (`list`, `dict`, unions) expose one. A wrapper
    /// around a simple type reports `None` even though `base` is known.
    pub fn origin(&self) -> Option<&TypeAnnotation> {
        if self.base.is_generic() {
            Some(&self.base)
        } else {
            None
        }
    }
}

impl TypeAnnotation {
    pub fn list(inner: TypeAnnotation) -> Self {
        Self::List(Box::new(inner))
    }

    pub fn dict(key: TypeAnnotation, value: TypeAnnotation) -> Self {
        Self::Dict(Box::new(key), Box::new(value))
    }

    /// `Optional[inner]`
    pub fn optional(inner: TypeAnnotation) -> Self {
        Self::union(vec![inner, Self::None])
    }

    /// Build a union, flattening nested unions and dropping duplicates.
    /// A single remaining member is returned as-is.
    pub fn union(members: Vec<TypeAnnotation>) -> Self {
        let mut flat: Vec<TypeAnnotation> = Vec::with_capacity(members.len());
        for member in members {
            let parts = match member {
                Self::Union(inner) => inner,
                other => vec![other],
            };
            for part in parts {
                if !flat.contains(&part) {
                    flat.push(part);
                }
            }
        }
        if flat.len() == 1 {
            flat.remove(0)
        } else {
            Self::Union(flat)
        }
    }

    pub fn annotated(base: TypeAnnotation, metadata: Vec<Value>) -> Self {
        Self::Annotated(Annotated::new(base, metadata))
    }

    /// Shorthand for `Annotated[base, "description"]`
    pub fn described(base: TypeAnnotation, description: impl Into<String>) -> Self {
        Self::annotated(base, vec![Value::String(description.into())])
    }

    /// Metadata capability query
    pub fn metadata(&self) -> Option<&[Value]> {
        match self {
            Self::Annotated(annotated) => Some(&annotated.metadata),
            _ => None,
        }
    }

    /// Whether this is a parameterized container
    pub fn is_generic(&self) -> bool {
        matches!(self, Self::List(_) | Self::Dict(_, _) | Self::Union(_))
    }

    /// For `Union[T, None]` with exactly one non-`None` member, return `T`
    pub fn unwrap_optional(&self) -> Option<&TypeAnnotation> {
        let Self::Union(members) = self else {
            return None;
        };
        if !members.contains(&Self::None) {
            return None;
        }
        let mut rest = members.iter().filter(|m| **m != Self::None);
        match (rest.next(), rest.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }
}

impl fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str => write!(f, "str"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Bool => write!(f, "bool"),
            Self::None => write!(f, "None"),
            Self::Any => write!(f, "Any"),
            Self::List(inner) => write!(f, "list[{}]", inner),
            Self::Dict(key, value) => write!(f, "dict[{}, {}]", key, value),
            Self::Union(members) => {
                if let Some(inner) = self.unwrap_optional() {
                    return write!(f, "Optional[{}]", inner);
                }
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{}", member)?;
                }
                Ok(())
            }
            Self::Enum(e) => write!(f, "{}", e.name),
            Self::Object(o) => write!(f, "{}", o.name),
            Self::Annotated(annotated) => {
                write!(f, "Annotated[{}", annotated.base)?;
                for value in &annotated.metadata {
                    write!(f, ", {}", value)?;
                }
                write!(f, "]")
            }
        }
    }
}
