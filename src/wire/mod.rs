//! Wire types - classification of annotations and value schemas

mod classify;
mod schema;

pub use classify::{WireTypeInfo, get_wire_type_info};
pub use schema::{ValueSchema, WireType};
