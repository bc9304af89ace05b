pub mod chart_service;
pub mod selection;

pub use chart_service::*;
pub use selection::*;
