use finance_core::present::is_placeholder;
use leptos::prelude::*;

use crate::presenter::TableFrame;

/// Year table; an error replaces the whole body
///
/// `empty_message` tells a dataset without rows apart from a selection
/// without visible years.
#[component]
pub fn DataTable(frame: RwSignal<TableFrame>, empty_message: &'static str) -> impl IntoView {
    let header = move || {
        frame.with(|f| {
            f.headers
                .iter()
                .map(|h| view! { <th>{h.clone()}</th> })
                .collect_view()
        })
    };

    let body = move || {
        let f = frame.get();
        if let Some(message) = f.error {
            return view! {
                <tr>
                    <td class="error">{message}</td>
                </tr>
            }
            .into_any();
        }
        if f.rows.is_empty() {
            return view! {
                <tr>
                    <td class="placeholder" colspan={f.headers.len().max(1).to_string()}>
                        {empty_message}
                    </td>
                </tr>
            }
            .into_any();
        }

        f.rows
            .into_iter()
            .map(|row| {
                view! {
                    <tr>
                        {row
                            .into_iter()
                            .map(|cell| {
                                let class = if is_placeholder(&cell) { "placeholder" } else { "" };
                                view! { <td class=class>{cell}</td> }
                            })
                            .collect_view()}
                    </tr>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <table>
            <thead>
                <tr>{header}</tr>
            </thead>
            <tbody>{body}</tbody>
        </table>
    }
}
