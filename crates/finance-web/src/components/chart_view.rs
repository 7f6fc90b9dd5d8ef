use finance_core::{Chart, ChartKind};
use leptos::prelude::*;

use crate::chart::{
    Domain, HEIGHT, PLOT_BOTTOM, PLOT_LEFT, PLOT_RIGHT, WIDTH, band_center, bars, polyline_points, tick_label,
};

/// Line chart in overview mode, bar chart per category
#[component]
pub fn ChartView(chart: RwSignal<Option<Chart>>) -> impl IntoView {
    let content = move || match chart.get() {
        Some(chart) if !chart.labels.is_empty() => view! { <ChartSvg chart=chart /> }.into_any(),
        _ => view! { <div class="placeholder">"Sem dados para o gráfico"</div> }.into_any(),
    };

    view! { <div>{content}</div> }
}

/// SVG coordinate
fn n(value: f64) -> String {
    format!("{:.1}", value)
}

#[component]
fn ChartSvg(chart: Chart) -> impl IntoView {
    let domain = Domain::of(&chart.series);
    let count = chart.labels.len();

    let ticks = domain
        .ticks()
        .into_iter()
        .map(|value| {
            let y = domain.y(value);
            view! {
                <line class="axis" x1={n(PLOT_LEFT)} x2={n(PLOT_RIGHT)} y1={n(y)} y2={n(y)} stroke-dasharray="2 4" />
                <text x={n(PLOT_LEFT - 6.0)} y={n(y + 4.0)} text-anchor="end">
                    {tick_label(value, chart.values_visible)}
                </text>
            }
        })
        .collect_view();

    let x_labels = chart
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            view! {
                <text x={n(band_center(i, count))} y={n(HEIGHT - 8.0)} text-anchor="middle">
                    {label.clone()}
                </text>
            }
        })
        .collect_view();

    let marks = match chart.kind {
        ChartKind::Line => chart
            .series
            .iter()
            .map(|s| {
                view! {
                    <polyline
                        points={polyline_points(&s.data, &domain)}
                        fill="none"
                        stroke={s.color.clone()}
                        stroke-width="2"
                    />
                }
            })
            .collect_view()
            .into_any(),
        ChartKind::Bar => bars(&chart, &domain)
            .into_iter()
            .map(|b| {
                view! { <rect x={n(b.x)} y={n(b.y)} width={n(b.width)} height={n(b.height)} fill={b.color} /> }
            })
            .collect_view()
            .into_any(),
    };

    let legend = chart
        .series
        .iter()
        .map(|s| view! { <span style={format!("--swatch: {}", s.color)}>{s.label.clone()}</span> })
        .collect_view();

    view! {
        <div class="chart">
            <svg viewBox={format!("0 0 {} {}", WIDTH, HEIGHT)} width="100%" role="img">
                {ticks}
                <line class="axis" x1={n(PLOT_LEFT)} x2={n(PLOT_RIGHT)} y1={n(PLOT_BOTTOM)} y2={n(PLOT_BOTTOM)} />
                {marks}
                {x_labels}
            </svg>
            <div class="legend">{legend}</div>
        </div>
    }
}
