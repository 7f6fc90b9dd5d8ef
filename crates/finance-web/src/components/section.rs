use leptos::prelude::*;

/// Section wrapper with a dashed ASCII rule
#[component]
pub fn Section(#[prop(into)] id: String, #[prop(into)] title: String, children: Children) -> impl IntoView {
    view! {
        <section id=id>
            <h2>{format!("─┤ {} ├─", title)}</h2>
            <div>{children()}</div>
        </section>
    }
}
