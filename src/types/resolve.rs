//! Annotated-type resolution
//!
//! Turns a possibly metadata-wrapped annotation into the effective type used
//! for wire classification, plus the description carried in its metadata.

use serde_json::Value;

use super::annotation::TypeAnnotation;

/// Result of resolving an annotation
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<'a> {
    /// Type to hand to the wire classifier
    pub effective: &'a TypeAnnotation,
    /// First metadata element, if any
    pub description: Option<String>,
}

/// Resolve an annotation into its effective type and description.
///
/// Plain annotations come back unchanged with no description. For an
/// `Annotated` wrapper the description is the first metadata element, and the
/// effective type is the wrapper's inner-type reference. When that reference
/// is absent (a simple base type) the wrapper itself is kept.
pub fn resolve(annotation: &TypeAnnotation) -> Resolved<'_> {
    let TypeAnnotation::Annotated(annotated) = annotation else {
        return Resolved {
            effective: annotation,
            description: None,
        };
    };

    let description = annotated.metadata.first().map(metadata_text);

    let effective = match annotated.origin() {
        Some(inner) => inner,
        None => annotation,
    };

    tracing::trace!(
        annotation = %annotation,
        effective = %effective,
        has_description = description.is_some(),
        "Resolved annotation"
    );

    Resolved { effective, description }
}

/// Text of a metadata element: strings as-is, anything else as compact JSON
pub(crate) fn metadata_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
