use finance_core::present::{NO_DATA, category_color, empty_table_message};
use finance_core::{Dashboard, Dataset, ExpensePolicy, Presenter};
use leptos::prelude::*;
use shared::CONFIG;
use wasm_bindgen::JsValue;

use crate::api::{get_dataset, get_settings};
use crate::components::{CategoryTabs, ChartView, DataTable, Section, SummaryBoxes, ValuesToggle, YearToggles};
use crate::presenter::SignalPresenter;

/// Fetch once per page load; any failure ends in the error state
async fn load_dataset() -> Option<(Dataset, ExpensePolicy)> {
    let settings = get_settings().await;
    match get_dataset(&settings).await {
        Ok(dataset) => Some((dataset, settings.expense_policy)),
        Err(e) => {
            web_sys::console::error_1(&JsValue::from_str(&format!("Failed to load finance data: {}", e)));
            None
        }
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let dataset = LocalResource::new(load_dataset);

    view! {
        <main>
            <header>
                <h1>{CONFIG.name}</h1>
                <div class="placeholder">{CONFIG.tagline}</div>
            </header>
            <Suspense fallback=move || view! { <div class="placeholder">"Carregando dados..."</div> }>
                {move || {
                    dataset.get().map(|result| {
                        // Dereference SendWrapper to access inner Option
                        match &*result {
                            Some((data, policy)) => {
                                view! { <DashboardContent dataset=data.clone() policy={*policy} /> }.into_any()
                            }
                            None => view! { <LoadError /> }.into_any(),
                        }
                    })
                }}
            </Suspense>
        </main>
    }
}

/// Static error state: the table body is replaced by a message
#[component]
fn LoadError() -> impl IntoView {
    let mut presenter = SignalPresenter::new();
    presenter.render_error(CONFIG.labels.load_error);

    view! {
        <Section id="table" title="Tabela">
            <DataTable frame=presenter.table empty_message=NO_DATA />
        </Section>
    }
}

#[component]
fn DashboardContent(dataset: Dataset, policy: ExpensePolicy) -> impl IntoView {
    let years = dataset.years().to_vec();
    let empty_message = empty_table_message(&dataset);
    let categories: Vec<(String, &'static str)> = dataset
        .categories()
        .iter()
        .map(|c| (c.clone(), category_color(&dataset, c)))
        .collect();

    let presenter = SignalPresenter::new();
    let dashboard = StoredValue::new(Dashboard::new(dataset, policy, presenter));
    let state = RwSignal::new(dashboard.with_value(|d| d.state().clone()));

    // Every interaction goes through the dashboard, which re-renders into the signals
    let on_toggle_year = Callback::new(move |year: i32| {
        dashboard.update_value(|d| {
            d.toggle_year(year);
            state.set(d.state().clone());
        });
    });
    let on_select = Callback::new(move |category: Option<String>| {
        dashboard.update_value(|d| {
            d.select_category(category.as_deref());
            state.set(d.state().clone());
        });
    });
    let on_show_values = Callback::new(move |show: bool| {
        dashboard.update_value(|d| {
            d.set_show_values(show);
            state.set(d.state().clone());
        });
    });

    view! {
        <Section id="filters" title="Filtros">
            <YearToggles years=years state=state on_toggle=on_toggle_year />
            <CategoryTabs categories=categories state=state on_select=on_select />
            <ValuesToggle state=state on_change=on_show_values />
        </Section>

        <Section id="summary" title="Resumo">
            <SummaryBoxes boxes=presenter.boxes />
        </Section>

        <Section id="table" title="Tabela">
            <DataTable frame=presenter.table empty_message=empty_message />
        </Section>

        <Section id="chart" title="Gráfico">
            <ChartView chart=presenter.chart />
        </Section>
    }
}
