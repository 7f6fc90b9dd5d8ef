use finance_core::SummaryBox;
use leptos::prelude::*;

/// Period totals, one colored box each
#[component]
pub fn SummaryBoxes(boxes: RwSignal<Vec<SummaryBox>>) -> impl IntoView {
    view! {
        <div class="boxes">
            {move || {
                boxes
                    .get()
                    .into_iter()
                    .map(|b| {
                        view! {
                            <div class="box" style=format!("border-color: {}", b.color)>
                                <div class="label">{b.label}</div>
                                <div class="value">{b.value}</div>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
