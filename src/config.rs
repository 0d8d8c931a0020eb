use js_sys::Reflect;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::amount::{Bounds, Role};

/// Page global a template can set to override any of the defaults below.
pub const CONFIG_GLOBAL: &str = "pengeluaranConfig";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldBinding {
    pub visible_id: String,
    pub role: Role,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageConfig {
    /// Element the Yew app mounts into. Pages without it are enhanced in place.
    pub mount_id: String,
    pub expense_form_id: String,
    pub income_form_id: String,
    pub field_bindings: Vec<FieldBinding>,
    /// Used when a hidden field declares no usable `min`/`max`.
    pub default_bounds: Bounds,
}

impl Default for PageConfig {
    fn default() -> Self {
        default_config()
    }
}

fn default_config() -> PageConfig {
    PageConfig {
        mount_id: "app".to_string(),
        expense_form_id: "expenseForm".to_string(),
        income_form_id: "incomeForm".to_string(),
        field_bindings: Role::ALL
            .into_iter()
            .map(|role| FieldBinding {
                visible_id: role.marker().to_string(),
                role,
            })
            .collect(),
        default_bounds: Bounds::default(),
    }
}

pub fn load_config() -> PageConfig {
    let raw = match Reflect::get(&js_sys::global(), &JsValue::from_str(CONFIG_GLOBAL)) {
        Ok(raw) if !raw.is_undefined() && !raw.is_null() => raw,
        _ => return default_config(),
    };

    match serde_wasm_bindgen::from_value::<PageConfig>(raw) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("ignoring malformed window.{}: {}", CONFIG_GLOBAL, e);
            default_config()
        }
    }
}
