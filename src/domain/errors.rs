use derive_more::Display;

/// Errors raised at the boundaries of the widget: JSON input, DOM mounting and SVG export.
/// Building a scene never fails; missing data is a scene variant.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum AppError {
    #[display(fmt = "Invalid data: {}", _0)]
    InvalidData(String),
    #[display(fmt = "Invalid selection: {}", _0)]
    InvalidSelection(String),
    #[display(fmt = "Invalid config: {}", _0)]
    InvalidConfig(String),
    #[display(fmt = "Mount error: {}", _0)]
    Mount(String),
    #[display(fmt = "Export error: {}", _0)]
    Export(String),
}

impl std::error::Error for AppError {}

impl From<AppError> for wasm_bindgen::JsValue {
    fn from(err: AppError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
