//! Chart aggregate: scales, scene entities, configuration and the renderer service.

pub mod entities;
pub mod scales;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use scales::*;
pub use services::*;
pub use value_objects::*;
