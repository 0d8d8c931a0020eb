use web_sys::{Element, HtmlInputElement, InputEvent, SubmitEvent};
use yew::prelude::*;

use crate::amount::{BoundedAmount, Bounds, Role};
use crate::chart::{ChartConfig, ChartData, ChartSlot, Series};
use crate::dom::{alert, draw_chart};
use crate::guard::{check_expense, check_income, FieldReading, Rejection};

const FIELD_CLASS: &str =
    "w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none";
const LABEL_CLASS: &str = "text-[12px] font-bold text-muted-foreground";

fn today_iso() -> String {
    let now = js_sys::Date::new_0();
    format!(
        "{:04}-{:02}-{:02}",
        now.get_full_year(),
        now.get_month() + 1,
        now.get_date()
    )
}

fn block_submit(event: &SubmitEvent, result: Result<(), Rejection>) {
    if let Err(rejection) = result {
        event.prevent_default();
        log::info!("blocked submit: {}", rejection);
        alert(&rejection.to_string());
    }
}

#[derive(Properties, PartialEq)]
pub struct MoneyInputProps {
    pub label: &'static str,
    /// Form field name the server reads the clean integer from.
    pub name: &'static str,
    pub amount: BoundedAmount,
    pub on_change: Callback<BoundedAmount>,
}

/// Visible grouped text plus the hidden clean value, kept in the same ids as
/// the server-rendered markup.
#[function_component(MoneyInput)]
pub fn money_input(props: &MoneyInputProps) -> Html {
    let role = props.amount.role();
    let bounds = props.amount.bounds();

    let oninput = {
        let amount = props.amount;
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = amount;
            next.update(&input.value());
            // the vdom may not change when only a non-digit was typed
            input.set_value(&next.display());
            on_change.emit(next);
        })
    };

    html! {
        <div class="space-y-1">
            <label for={role.marker()} class={LABEL_CLASS}>{ props.label }</label>
            <input
                type="text"
                inputmode="numeric"
                autocomplete="off"
                id={role.marker()}
                placeholder="0"
                value={props.amount.display()}
                oninput={oninput}
                class={FIELD_CLASS} />
            <input
                type="hidden"
                id={role.hidden_id()}
                name={props.name}
                min={bounds.min.to_string()}
                max={bounds.max.to_string()}
                value={props.amount.raw()} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FormProps {
    pub form_id: AttrValue,
    pub bounds: Bounds,
    #[prop_or(AttrValue::Static("/"))]
    pub action: AttrValue,
}

#[function_component(ExpenseForm)]
pub fn expense_form(props: &FormProps) -> Html {
    let nominal = use_state(|| BoundedAmount::new(Role::Expense, props.bounds));

    let on_nominal = {
        let nominal = nominal.clone();
        Callback::from(move |next: BoundedAmount| nominal.set(next))
    };

    let onsubmit = {
        let nominal = nominal.clone();
        Callback::from(move |e: SubmitEvent| {
            block_submit(&e, check_expense(&FieldReading::from(&*nominal)));
        })
    };

    html! {
        <form id={props.form_id.clone()} method="post" action={props.action.clone()} onsubmit={onsubmit} class="bg-white p-5 rounded-[10px] shadow-sm border border-white/50">
            <h4 class="text-[#1D617A] font-bold text-[15px] mb-3 tracking-wider">{"Catat Pengeluaran"}</h4>
            <div class="grid grid-cols-2 md:grid-cols-4 gap-3 mb-4">
                <div class="space-y-1">
                    <label for="tanggal" class={LABEL_CLASS}>{"Tanggal"}</label>
                    <input type="date" id="tanggal" name="tanggal" value={today_iso()} class={FIELD_CLASS} />
                </div>
                <div class="space-y-1">
                    <label for="metode" class={LABEL_CLASS}>{"Metode"}</label>
                    <input type="text" id="metode" name="metode" placeholder="Tunai / Transfer" class={FIELD_CLASS} />
                </div>
                <MoneyInput label="Nominal (Rp)" name="nominal" amount={*nominal} on_change={on_nominal} />
                <div class="space-y-1">
                    <label for="catatan" class={LABEL_CLASS}>{"Catatan"}</label>
                    <input type="text" id="catatan" name="catatan" class={FIELD_CLASS} />
                </div>
            </div>
            <button type="submit" class="w-full bg-[#173E63] text-white py-2 rounded-[10px] text-[10px] font-bold">{"Simpan"}</button>
        </form>
    }
}

#[function_component(IncomeForm)]
pub fn income_form(props: &FormProps) -> Html {
    let modal = use_state(|| BoundedAmount::new(Role::PurchaseCost, props.bounds));
    let jual = use_state(|| BoundedAmount::new(Role::SalePrice, props.bounds));

    let on_modal = {
        let modal = modal.clone();
        Callback::from(move |next: BoundedAmount| modal.set(next))
    };
    let on_jual = {
        let jual = jual.clone();
        Callback::from(move |next: BoundedAmount| jual.set(next))
    };

    let onsubmit = {
        let modal = modal.clone();
        let jual = jual.clone();
        Callback::from(move |e: SubmitEvent| {
            let result = check_income(&FieldReading::from(&*modal), &FieldReading::from(&*jual));
            block_submit(&e, result);
        })
    };

    html! {
        <form id={props.form_id.clone()} method="post" action={props.action.clone()} onsubmit={onsubmit} class="bg-white p-5 rounded-[10px] shadow-sm border border-white/50">
            <h4 class="text-[#1D617A] font-bold text-[15px] mb-3 tracking-wider">{"Catat Pemasukan"}</h4>
            <div class="grid grid-cols-2 md:grid-cols-4 gap-3 mb-4">
                <div class="space-y-1">
                    <label for="tanggal_pemasukan" class={LABEL_CLASS}>{"Tanggal"}</label>
                    <input type="date" id="tanggal_pemasukan" name="tanggal" value={today_iso()} class={FIELD_CLASS} />
                </div>
                <MoneyInput label="Modal (Rp)" name="modal" amount={*modal} on_change={on_modal} />
                <MoneyInput label="Jual (Rp)" name="jual" amount={*jual} on_change={on_jual} />
                <div class="space-y-1">
                    <label for="catatan_pemasukan" class={LABEL_CLASS}>{"Catatan"}</label>
                    <input type="text" id="catatan_pemasukan" name="catatan" class={FIELD_CLASS} />
                </div>
            </div>
            <button type="submit" class="w-full bg-[#173E63] text-white py-2 rounded-[10px] text-[10px] font-bold">{"Simpan"}</button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
pub struct TrendChartProps {
    pub slot: ChartSlot,
    pub series: Series,
}

#[function_component(TrendChart)]
pub fn trend_chart(props: &TrendChartProps) -> Html {
    let canvas = use_node_ref();

    {
        let canvas = canvas.clone();
        use_effect_with_deps(
            move |(slot, series): &(ChartSlot, Series)| {
                let chart = canvas.cast::<Element>().and_then(|el| {
                    draw_chart(&el, &ChartConfig::for_slot(*slot, series))
                        .map_err(|e| log::error!("could not draw #{}: {}", slot, e))
                        .ok()
                });
                move || {
                    if let Some(chart) = chart {
                        chart.destroy();
                    }
                }
            },
            (props.slot, props.series.clone()),
        );
    }

    html! {
        <canvas id={props.slot.container_id()} ref={canvas}></canvas>
    }
}

fn chart_title(slot: ChartSlot) -> &'static str {
    match slot {
        ChartSlot::WeeklyExpense => "Pengeluaran 7 Hari Terakhir",
        ChartSlot::MonthlyExpense => "Pengeluaran 6 Bulan Terakhir",
        ChartSlot::WeeklyIncome => "Pemasukan 7 Hari Terakhir",
        ChartSlot::MonthlyIncome => "Pemasukan 6 Bulan Terakhir",
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub data: ChartData,
    pub bounds: Bounds,
    pub expense_form_id: AttrValue,
    pub income_form_id: AttrValue,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    html! {
        <main class="flex-1 overflow-y-auto p-6 space-y-6">
            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                <ExpenseForm form_id={props.expense_form_id.clone()} bounds={props.bounds} />
                <IncomeForm form_id={props.income_form_id.clone()} bounds={props.bounds} />
            </div>
            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                { for ChartSlot::ALL.into_iter().map(|slot| html! {
                    <div key={slot.container_id()} class="bg-card rounded-[10px] p-6 border border-border">
                        <h3 class="font-bold text-foreground text-lg mb-3">{ chart_title(slot) }</h3>
                        <TrendChart slot={slot} series={slot.series(&props.data).clone()} />
                    </div>
                }) }
            </div>
        </main>
    }
}
