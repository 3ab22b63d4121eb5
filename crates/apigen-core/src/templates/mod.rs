//! TypeScript client rendering from the normalized API model

pub mod layout;
pub mod manager;
pub mod options;

pub use layout::*;
pub use manager::*;
pub use options::*;
