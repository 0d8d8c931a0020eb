//! Browser side of the page: field pairs, submit guards, the globals the
//! server fills for the charts, and the Chart.js binding.

use js_sys::{Array, Reflect};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlInputElement};

use crate::amount::{BoundedAmount, Bounds, Role};
use crate::chart::{
    deserialize_points, render_charts, ChartConfig, ChartData, ChartHost, ChartSlot, Series,
};
use crate::config::{FieldBinding, PageConfig};
use crate::error::FrontendError;
use crate::guard::{check_expense, check_income, FieldReading, Rejection};
use crate::locale::format_id_number;

/// Name of the global function older templates call from `oninput`.
pub const FORMAT_HOOK: &str = "formatNominal";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Chart)]
    pub type ChartJs;

    #[wasm_bindgen(constructor, js_class = "Chart", catch)]
    fn new(item: &Element, config: &JsValue) -> Result<ChartJs, JsValue>;

    #[wasm_bindgen(method)]
    pub fn destroy(this: &ChartJs);
}

thread_local! {
    static VALUE_LABEL: Closure<dyn Fn(JsValue) -> String> =
        Closure::new(|value: JsValue| value.as_f64().map(format_id_number).unwrap_or_default());
}

pub fn document() -> Result<Document, FrontendError> {
    web_sys::window()
        .ok_or(FrontendError::NoWindow)?
        .document()
        .ok_or(FrontendError::NoDocument)
}

fn read_global(key: &str) -> Option<JsValue> {
    Reflect::get(&js_sys::global(), &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn input_by_id(document: &Document, id: &str) -> Result<Option<HtmlInputElement>, FrontendError> {
    match document.get_element_by_id(id) {
        Some(el) => el
            .dyn_into::<HtmlInputElement>()
            .map(Some)
            .map_err(|_| FrontendError::NotAnInput(id.to_string())),
        None => Ok(None),
    }
}

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Reformats a visible amount field and writes the clean integer into its
/// hidden companion. The companion must exist; a page without it is broken
/// markup and is reported, not patched over.
pub fn format_field(
    document: &Document,
    input: &HtmlInputElement,
    role: Role,
    fallback: Bounds,
) -> Result<BoundedAmount, FrontendError> {
    let hidden = input_by_id(document, role.hidden_id())?.ok_or_else(|| {
        FrontendError::MissingCompanion {
            visible_id: input.id(),
            hidden_id: role.hidden_id().to_string(),
        }
    })?;

    let bounds = Bounds::from_attrs_or(&hidden.min(), &hidden.max(), fallback);
    let amount = BoundedAmount::from_input(role, bounds, &input.value());
    input.set_value(&amount.display());
    hidden.set_value(&amount.raw());
    Ok(amount)
}

fn format_inferred(input: &HtmlInputElement, fallback: Bounds) -> Result<(), FrontendError> {
    let id = input.id();
    let role = Role::infer(&id).ok_or(FrontendError::UnknownRole(id))?;
    format_field(&document()?, input, role, fallback)?;
    Ok(())
}

// Errors thrown from here surface in the console at the template's call site.
fn expose_format_hook(fallback: Bounds) -> Result<(), FrontendError> {
    let hook = Closure::<dyn Fn(HtmlInputElement) -> Result<(), JsValue>>::new(
        move |input: HtmlInputElement| format_inferred(&input, fallback).map_err(JsValue::from),
    );
    Reflect::set(&js_sys::global(), &JsValue::from_str(FORMAT_HOOK), hook.as_ref())?;
    hook.forget();
    Ok(())
}

/// Returns false when the visible field is not on the page.
fn bind_field(
    document: &Document,
    binding: &FieldBinding,
    fallback: Bounds,
) -> Result<bool, FrontendError> {
    let Some(input) = input_by_id(document, &binding.visible_id)? else {
        return Ok(false);
    };

    let role = binding.role;
    let doc = document.clone();
    let field = input.clone();
    let listener = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
        match format_field(&doc, &field, role, fallback) {
            Ok(amount) => log::debug!("#{} -> {}", field.id(), amount.raw()),
            Err(e) => log::error!("{}", e),
        }
    });
    input.add_event_listener_with_callback("input", listener.as_ref().unchecked_ref())?;
    listener.forget();
    Ok(true)
}

/// A binding that cannot be wired is logged and skipped; the others still are.
fn bind_fields(document: &Document, config: &PageConfig) -> usize {
    let mut bound = 0;
    for binding in &config.field_bindings {
        match bind_field(document, binding, config.default_bounds) {
            Ok(true) => bound += 1,
            Ok(false) => {}
            Err(e) => log::error!("skipping amount field #{}: {}", binding.visible_id, e),
        }
    }
    bound
}

fn read_field(document: &Document, id: &str) -> FieldReading {
    match input_by_id(document, id) {
        Ok(Some(input)) => FieldReading::new(input.value(), input.min(), input.max()),
        Ok(None) => {
            log::warn!("#{} is missing, reading it as 0", id);
            FieldReading::default()
        }
        Err(e) => {
            log::warn!("{}, reading it as 0", e);
            FieldReading::default()
        }
    }
}

pub fn check_expense_form(document: &Document) -> Result<(), Rejection> {
    check_expense(&read_field(document, Role::Expense.hidden_id()))
}

pub fn check_income_form(document: &Document) -> Result<(), Rejection> {
    check_income(
        &read_field(document, Role::PurchaseCost.hidden_id()),
        &read_field(document, Role::SalePrice.hidden_id()),
    )
}

/// Cancels the form's submit event whenever `check` rejects. Returns false
/// when the page has no such form.
fn install_guard<F>(document: &Document, form_id: &str, check: F) -> Result<bool, FrontendError>
where
    F: Fn(&Document) -> Result<(), Rejection> + 'static,
{
    let Some(form) = document.get_element_by_id(form_id) else {
        return Ok(false);
    };

    let doc = document.clone();
    let id = form_id.to_string();
    let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Err(rejection) = check(&doc) {
            event.prevent_default();
            log::info!("blocked #{}: {}", id, rejection);
            alert(&rejection.to_string());
        }
    });
    form.add_event_listener_with_callback("submit", listener.as_ref().unchecked_ref())?;
    listener.forget();
    Ok(true)
}

fn read_global_array<T: DeserializeOwned>(key: &str) -> Vec<T> {
    let Some(raw) = read_global(key) else {
        return Vec::new();
    };
    serde_wasm_bindgen::from_value(raw).unwrap_or_else(|e| {
        log::warn!("window.{} is not a usable array: {}", key, e);
        Vec::new()
    })
}

fn read_global_points(key: &str) -> Vec<Option<f64>> {
    let Some(raw) = read_global(key) else {
        return Vec::new();
    };
    deserialize_points(serde_wasm_bindgen::Deserializer::from(raw)).unwrap_or_else(|e| {
        log::warn!("window.{} is not a usable array: {}", key, e);
        Vec::new()
    })
}

fn read_series(labels_key: &str, values_key: &str) -> Series {
    Series::new(read_global_array(labels_key), read_global_points(values_key))
}

impl ChartData {
    /// Collects the eight arrays the server template writes onto `window`.
    pub fn from_globals() -> Self {
        ChartData {
            weekly_expense: read_series("weeklyLabelsExp", "weeklyDataExp"),
            monthly_expense: read_series("monthlyLabelsExp", "monthlyDataExp"),
            weekly_income: read_series("weeklyLabelsInc", "weeklyDataInc"),
            monthly_income: read_series("monthlyLabelsInc", "monthlyDataInc"),
        }
    }
}

fn attach_value_labels(js_config: &JsValue) -> Result<(), FrontendError> {
    let options = Reflect::get(js_config, &JsValue::from_str("options"))?;
    let plugins = Reflect::get(&options, &JsValue::from_str("plugins"))?;
    let datalabels = Reflect::get(&plugins, &JsValue::from_str("datalabels"))?;
    VALUE_LABEL.with(|formatter| {
        Reflect::set(&datalabels, &JsValue::from_str("formatter"), formatter.as_ref())
    })?;

    match read_global("ChartDataLabels") {
        Some(plugin) => {
            Reflect::set(js_config, &JsValue::from_str("plugins"), &Array::of1(&plugin))?;
        }
        None => log::warn!("ChartDataLabels is not loaded, drawing without value labels"),
    }
    Ok(())
}

/// Hands one configuration to Chart.js, with the value-label formatter and
/// the datalabels plugin attached.
pub fn draw_chart(container: &Element, config: &ChartConfig) -> Result<ChartJs, FrontendError> {
    if read_global("Chart").is_none() {
        return Err(FrontendError::ChartLibraryMissing);
    }

    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    let js_config = config.serialize(&serializer)?;
    attach_value_labels(&js_config)?;
    Ok(ChartJs::new(container, &js_config)?)
}

pub struct PageCharts {
    document: Document,
}

impl PageCharts {
    pub fn new(document: Document) -> Self {
        PageCharts { document }
    }
}

impl ChartHost for PageCharts {
    type Container = Element;
    type Error = FrontendError;

    fn container(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn construct(
        &mut self,
        _slot: ChartSlot,
        container: Element,
        config: &ChartConfig,
    ) -> Result<(), FrontendError> {
        // the page keeps its charts until unload
        draw_chart(&container, config).map(drop)
    }
}

fn when_ready<F>(document: &Document, f: F) -> Result<(), FrontendError>
where
    F: FnOnce() + 'static,
{
    if document.ready_state() != "loading" {
        f();
        return Ok(());
    }
    let callback = Closure::once_into_js(f);
    document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())?;
    Ok(())
}

/// Wires a server-rendered page: amount formatting, both submit guards and
/// the charts, all once the document has been parsed.
pub fn enhance_page(document: &Document, config: &PageConfig) -> Result<(), FrontendError> {
    if let Err(e) = expose_format_hook(config.default_bounds) {
        log::error!("could not expose window.{}: {}", FORMAT_HOOK, e);
    }

    let doc = document.clone();
    let config = config.clone();
    when_ready(document, move || {
        wire(&doc, &config);
        let data = ChartData::from_globals();
        render_charts(&mut PageCharts::new(doc), &data);
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Wiring {
    fields: usize,
    expense_guard: bool,
    income_guard: bool,
}

fn guard_or_log<F>(document: &Document, form_id: &str, check: F) -> bool
where
    F: Fn(&Document) -> Result<(), Rejection> + 'static,
{
    install_guard(document, form_id, check).unwrap_or_else(|e| {
        log::error!("no submit guard on #{}: {}", form_id, e);
        false
    })
}

// Each behaviour is wired on its own so one broken element cannot leave a
// form unguarded.
fn wire(document: &Document, config: &PageConfig) -> Wiring {
    let wiring = Wiring {
        fields: bind_fields(document, config),
        expense_guard: guard_or_log(document, &config.expense_form_id, check_expense_form),
        income_guard: guard_or_log(document, &config.income_form_id, check_income_form),
    };
    log::info!(
        "bound {} amount fields, expense guard: {}, income guard: {}",
        wiring.fields,
        wiring.expense_guard,
        wiring.income_guard
    );
    wiring
}
