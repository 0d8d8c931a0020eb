use pengeluaran_frontend::chart::ChartData;
use pengeluaran_frontend::components::{App, AppProps};
use pengeluaran_frontend::config::{load_config, PageConfig};
use pengeluaran_frontend::dom;
use pengeluaran_frontend::error::FrontendError;

fn run(config: PageConfig) -> Result<(), FrontendError> {
    let document = dom::document()?;

    match document.get_element_by_id(&config.mount_id) {
        Some(root) => {
            log::info!("mounting into #{}", config.mount_id);
            let props = AppProps {
                data: ChartData::from_globals(),
                bounds: config.default_bounds,
                expense_form_id: config.expense_form_id.into(),
                income_form_id: config.income_form_id.into(),
            };
            yew::Renderer::<App>::with_root_and_props(root, props).render();
        }
        None => {
            log::info!("no #{}, enhancing server-rendered page", config.mount_id);
            dom::enhance_page(&document, &config)?;
        }
    }
    Ok(())
}

fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    wasm_logger::init(wasm_logger::Config::new(level));

    if let Err(e) = run(load_config()) {
        log::error!("{}", e);
    }
}
