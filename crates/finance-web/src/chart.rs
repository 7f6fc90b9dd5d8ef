//! SVG geometry for the line and bar charts

use finance_core::format::format_decimal;
use finance_core::{Chart, ChartSeries};

pub const WIDTH: f64 = 640.0;
pub const HEIGHT: f64 = 260.0;
pub const PLOT_LEFT: f64 = 84.0;
pub const PLOT_RIGHT: f64 = WIDTH - 12.0;
pub const PLOT_TOP: f64 = 12.0;
pub const PLOT_BOTTOM: f64 = HEIGHT - 28.0;

const TICKS: usize = 4;

/// Fraction of a year band covered by its bars
const BAR_FILL: f64 = 0.7;

/// Value range of the vertical axis, always including zero
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub floor: f64,
    pub ceiling: f64,
}

impl Domain {
    pub fn of(series: &[ChartSeries]) -> Self {
        let (mut floor, mut ceiling) = (0.0f64, 0.0f64);
        for value in series.iter().flat_map(|s| s.data.iter().copied()) {
            floor = floor.min(value);
            ceiling = ceiling.max(value);
        }
        if ceiling - floor <= 0.0 {
            ceiling = floor + 1.0;
        }
        Self { floor, ceiling }
    }

    pub fn y(&self, value: f64) -> f64 {
        let height = PLOT_BOTTOM - PLOT_TOP;
        PLOT_TOP + (self.ceiling - value) / (self.ceiling - self.floor) * height
    }

    /// Evenly spaced values from floor to ceiling
    pub fn ticks(&self) -> Vec<f64> {
        (0..=TICKS)
            .map(|i| self.floor + (self.ceiling - self.floor) * i as f64 / TICKS as f64)
            .collect()
    }
}

/// Horizontal center of the `index`-th year band
pub fn band_center(index: usize, count: usize) -> f64 {
    let width = PLOT_RIGHT - PLOT_LEFT;
    PLOT_LEFT + width * (index as f64 + 0.5) / count.max(1) as f64
}

/// `points` attribute of a polyline
pub fn polyline_points(data: &[f64], domain: &Domain) -> String {
    data.iter()
        .enumerate()
        .map(|(i, value)| format!("{:.1},{:.1}", band_center(i, data.len()), domain.y(*value)))
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
}

/// Side-by-side bars per year band, growing from the zero line
pub fn bars(chart: &Chart, domain: &Domain) -> Vec<Bar> {
    let count = chart.labels.len().max(1);
    let band = (PLOT_RIGHT - PLOT_LEFT) / count as f64;
    let width = band * BAR_FILL / chart.series.len().max(1) as f64;
    let zero = domain.y(0.0);

    chart
        .series
        .iter()
        .enumerate()
        .flat_map(|(s, series)| {
            series.data.iter().enumerate().map(move |(i, value)| {
                let y = domain.y(*value);
                Bar {
                    x: band_center(i, count) - band * BAR_FILL / 2.0 + width * s as f64,
                    y: y.min(zero),
                    width,
                    height: (zero - y).abs(),
                    color: series.color.clone(),
                }
            })
        })
        .collect()
}

/// Value axis label, hidden together with the table values
pub fn tick_label(value: f64, visible: bool) -> String {
    if visible {
        format_decimal(value, 0)
    } else {
        "•••".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finance_core::ChartKind;

    fn series(data: &[f64]) -> ChartSeries {
        ChartSeries {
            label: "RENT".to_string(),
            data: data.to_vec(),
            color: "#000".to_string(),
        }
    }

    #[test]
    fn test_domain_spans_zero_to_max() {
        let domain = Domain::of(&[series(&[500.0, 200.0]), series(&[1000.0, 0.0])]);
        assert_eq!(domain, Domain { floor: 0.0, ceiling: 1000.0 });
        assert_eq!(domain.y(1000.0), PLOT_TOP);
        assert_eq!(domain.y(0.0), PLOT_BOTTOM);
        assert_eq!(domain.ticks().len(), TICKS + 1);
    }

    #[test]
    fn test_domain_of_empty_or_flat_data() {
        assert_eq!(Domain::of(&[]), Domain { floor: 0.0, ceiling: 1.0 });
        assert_eq!(Domain::of(&[series(&[0.0, 0.0])]), Domain { floor: 0.0, ceiling: 1.0 });
    }

    #[test]
    fn test_negative_values_extend_floor() {
        let domain = Domain::of(&[series(&[-50.0, 150.0])]);
        assert_eq!(domain.floor, -50.0);
        assert!(domain.y(0.0) < PLOT_BOTTOM);
    }

    #[test]
    fn test_polyline_has_one_point_per_value() {
        let domain = Domain::of(&[series(&[1.0, 2.0, 3.0])]);
        let points = polyline_points(&[1.0, 2.0, 3.0], &domain);
        assert_eq!(points.split(' ').count(), 3);
    }

    #[test]
    fn test_bars_grow_from_zero_line() {
        let chart = Chart {
            kind: ChartKind::Bar,
            labels: vec!["2022".to_string(), "2023".to_string()],
            series: vec![series(&[500.0, 200.0])],
            values_visible: true,
        };
        let domain = Domain::of(&chart.series);

        let bars = bars(&chart, &domain);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].y + bars[0].height, PLOT_BOTTOM);
        assert!(bars[0].height > bars[1].height);
        assert!(bars[0].x < bars[1].x);
    }

    #[test]
    fn test_tick_labels_follow_visibility() {
        assert_eq!(tick_label(1250.0, true), "1.250");
        assert_eq!(tick_label(1250.0, false), "•••");
    }

    #[test]
    fn test_ticks_near_zero_have_no_sign() {
        let domain = Domain::of(&[series(&[-0.4, 0.3])]);
        assert_eq!(tick_label(domain.floor, true), "0");
        assert!(domain.ticks().iter().all(|t| !tick_label(*t, true).starts_with("-0")));
    }
}
