use finance_core::ViewState;
use leptos::prelude::*;
use shared::CONFIG;

fn chip_class(active: bool) -> &'static str {
    if active { "chip active" } else { "chip" }
}

/// One button per dataset year; inactive years drop out of every aggregate
#[component]
pub fn YearToggles(years: Vec<i32>, state: RwSignal<ViewState>, on_toggle: Callback<i32>) -> impl IntoView {
    view! {
        <div class="controls">
            {years
                .into_iter()
                .map(|year| {
                    let class = move || chip_class(state.with(|s| s.is_year_visible(year)));
                    view! {
                        <button type="button" class=class on:click=move |_| on_toggle.run(year)>
                            {year}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

/// Overview tab followed by one tab per category, income included
#[component]
pub fn CategoryTabs(
    categories: Vec<(String, &'static str)>,
    state: RwSignal<ViewState>,
    on_select: Callback<Option<String>>,
) -> impl IntoView {
    let overview_class = move || chip_class(state.with(|s| s.selected_category().is_none()));

    view! {
        <div class="controls">
            <button type="button" class=overview_class on:click=move |_| on_select.run(None)>
                {CONFIG.labels.overview_tab}
            </button>
            {categories
                .into_iter()
                .map(|(category, color)| {
                    let key = category.clone();
                    let class = move || chip_class(state.with(|s| s.selected_category() == Some(key.as_str())));
                    let selected = category.clone();
                    view! {
                        <button
                            type="button"
                            class=class
                            style=format!("border-left: 4px solid {}", color)
                            on:click=move |_| on_select.run(Some(selected.clone()))
                        >
                            {category}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

/// Show or mask every computed value
#[component]
pub fn ValuesToggle(state: RwSignal<ViewState>, on_change: Callback<bool>) -> impl IntoView {
    let showing = move || state.with(|s| s.show_values());
    let label = move || if showing() { "Ocultar valores" } else { "Mostrar valores" };

    view! {
        <div class="controls">
            <button type="button" class="chip" on:click=move |_| on_change.run(!showing())>
                {label}
            </button>
        </div>
    }
}
