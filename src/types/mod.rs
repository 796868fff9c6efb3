//! Type annotations - shapes, parsing, named types, and resolution

mod annotation;
mod parser;
mod registry;
mod resolve;

pub use annotation::{Annotated, EnumType, ObjectField, ObjectType, TypeAnnotation};
pub use parser::parse_type;
pub use registry::TypeRegistry;
pub use resolve::{Resolved, resolve};

pub(crate) use resolve::metadata_text;
