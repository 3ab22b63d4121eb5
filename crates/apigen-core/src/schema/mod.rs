//! Schema shape classification and type resolution

mod resolver;
mod shape;

pub use resolver::TypeResolver;
pub use shape::{PrimitiveType, SchemaShape};
