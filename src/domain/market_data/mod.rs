//! Market data aggregate: daily records, datasets and the selection that filters them.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
