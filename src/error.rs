use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("#{visible_id} has no companion field #{hidden_id}")]
    MissingCompanion {
        visible_id: String,
        hidden_id: String,
    },
    #[error("cannot tell which amount #{0} holds")]
    UnknownRole(String),
    #[error("#{0} is not an <input>")]
    NotAnInput(String),
    #[error("Chart.js is not loaded on this page")]
    ChartLibraryMissing,
    #[error("{0}")]
    Js(String),
}

impl From<JsValue> for FrontendError {
    fn from(value: JsValue) -> Self {
        if let Some(err) = value.dyn_ref::<js_sys::Error>() {
            return FrontendError::Js(String::from(err.message()));
        }
        let text = value
            .as_string()
            .or_else(|| {
                js_sys::JSON::stringify(&value)
                    .ok()
                    .and_then(|s| s.as_string())
            })
            .unwrap_or_else(|| "unknown JS error".to_string());
        FrontendError::Js(text)
    }
}

impl From<serde_wasm_bindgen::Error> for FrontendError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        FrontendError::Js(err.to_string())
    }
}

impl From<FrontendError> for JsValue {
    fn from(err: FrontendError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
