//! Tool System - signatures, definitions, and the catalog

mod catalog;
mod definition;
mod signature;

pub use catalog::{DEFAULT_TOOLKIT, ToolCatalog};
pub use definition::{InputParameter, OutputDefinition, OutputMode, ToolDefinition, ToolInput, to_pascal_case};
pub use signature::{
    FunctionSignature, Parameter, create_input_definition, create_output_definition, create_tool_definition,
};
