//! Chart geometry and aggregation shared by the four panel renderers.
//!
//! Everything here is pure so the SVG output can be checked natively; the
//! view layer only turns these values into markup.

use crate::models::Series;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt::Write;

/// Series colors, cycled by index.
pub const PALETTE: [&str; 10] = [
    "#6c53b1", "#2f9e44", "#1c7ed6", "#f08c00", "#e03131", "#0c8599", "#ae3ec9", "#5c940d",
    "#d6336c", "#495057",
];

/// Color for the series at `index`.
#[must_use]
pub const fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Summary row used by the table renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesSummary {
    /// Display name.
    pub name: String,
    /// Most recent finite value.
    pub last: Option<f64>,
    /// Smallest finite value.
    pub min: Option<f64>,
    /// Largest finite value.
    pub max: Option<f64>,
    /// Mean of finite values.
    pub avg: Option<f64>,
}

/// Summaries for every series, in input order.
#[must_use]
pub fn summarize(series: &[Series]) -> Vec<SeriesSummary> {
    series
        .iter()
        .map(|entry| {
            let mut count = 0_u32;
            let mut sum = 0.0;
            let mut min: Option<f64> = None;
            let mut max: Option<f64> = None;
            for value in entry.finite_values() {
                count += 1;
                sum += value;
                min = Some(min.map_or(value, |current| current.min(value)));
                max = Some(max.map_or(value, |current| current.max(value)));
            }
            SeriesSummary {
                name: entry.name.clone(),
                last: entry.last_value(),
                min,
                max,
                avg: (count > 0).then(|| sum / f64::from(count)),
            }
        })
        .collect()
}

/// One wedge of the pie renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct PieSlice {
    /// Display name.
    pub name: String,
    /// Last value of the series.
    pub value: f64,
    /// Share of the total in `0..=1`.
    pub fraction: f64,
    /// SVG path for the wedge in a `-1..1` viewBox.
    pub path: String,
    /// Fill color.
    pub color: &'static str,
}

/// Pie wedges from each series' last value. Non-positive or missing values
/// are left out; an all-zero input yields no slices.
#[must_use]
pub fn pie_slices(series: &[Series]) -> Vec<PieSlice> {
    let values: Vec<(usize, &Series, f64)> = series
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            entry
                .last_value()
                .filter(|value| *value > 0.0)
                .map(|value| (index, entry, value))
        })
        .collect();
    let total: f64 = values.iter().map(|(_, _, value)| value).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    let mut angle = -FRAC_PI_2;
    values
        .into_iter()
        .map(|(index, entry, value)| {
            let fraction = value / total;
            let sweep = fraction * TAU;
            let path = wedge_path(angle, sweep);
            angle += sweep;
            PieSlice {
                name: entry.name.clone(),
                value,
                fraction,
                path,
                color: palette_color(index),
            }
        })
        .collect()
}

fn wedge_path(start: f64, sweep: f64) -> String {
    if sweep >= TAU - 1e-9 {
        return "M 0 -1 A 1 1 0 1 1 0 1 A 1 1 0 1 1 0 -1 Z".to_string();
    }
    let end = start + sweep;
    let large_arc = u8::from(sweep > std::f64::consts::PI);
    format!(
        "M 0 0 L {:.4} {:.4} A 1 1 0 {large_arc} 1 {:.4} {:.4} Z",
        start.cos(),
        start.sin(),
        end.cos(),
        end.sin()
    )
}

/// Plot area size in SVG user units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotSize {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

/// One polyline set for a series; gaps (non-finite values) split segments.
#[derive(Clone, Debug, PartialEq)]
pub struct LinePath {
    /// Display name.
    pub name: String,
    /// Stroke color.
    pub color: &'static str,
    /// `points` attributes, one per contiguous segment.
    pub segments: Vec<String>,
}

/// Scaled line geometry for the time-series renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct LineChart {
    /// Lines in series order.
    pub lines: Vec<LinePath>,
    /// Lower bound of the value axis.
    pub y_min: f64,
    /// Upper bound of the value axis.
    pub y_max: f64,
    /// First timestamp.
    pub t_min: f64,
    /// Last timestamp.
    pub t_max: f64,
}

/// Scale all series into `size`. Returns `None` when no finite point exists.
#[must_use]
pub fn line_chart(series: &[Series], size: PlotSize) -> Option<LineChart> {
    let finite = || {
        series
            .iter()
            .flat_map(|entry| entry.points.iter())
            .filter(|(ts, value)| ts.is_finite() && value.is_finite())
    };
    let (mut t_min, mut t_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for (ts, value) in finite() {
        t_min = t_min.min(*ts);
        t_max = t_max.max(*ts);
        y_min = y_min.min(*value);
        y_max = y_max.max(*value);
    }
    if !t_min.is_finite() {
        return None;
    }
    y_min = y_min.min(0.0);
    if (y_max - y_min).abs() < f64::EPSILON {
        y_max = y_min + 1.0;
    }
    let t_span = (t_max - t_min).max(1.0);
    let y_span = y_max - y_min;
    let lines = series
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let mut segments = Vec::new();
            let mut current = String::new();
            for (ts, value) in &entry.points {
                if !(ts.is_finite() && value.is_finite()) {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                    continue;
                }
                let x = (ts - t_min) / t_span * size.width;
                let y = size.height - (value - y_min) / y_span * size.height;
                if !current.is_empty() {
                    current.push(' ');
                }
                let _ = write!(current, "{x:.1},{y:.1}");
            }
            if !current.is_empty() {
                segments.push(current);
            }
            LinePath {
                name: entry.name.clone(),
                color: palette_color(index),
                segments,
            }
        })
        .collect();
    Some(LineChart {
        lines,
        y_min,
        y_max,
        t_min,
        t_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn series(name: &str, points: &[(f64, f64)]) -> Series {
        Series {
            id: format!("A/{name}"),
            ref_id: "A".to_string(),
            name: name.to_string(),
            labels: BTreeMap::new(),
            points: points.to_vec(),
        }
    }

    #[test]
    fn summaries_ignore_specials() {
        let rows = summarize(&[series("a", &[(1.0, 4.0), (2.0, f64::NAN), (3.0, 2.0)])]);
        assert_eq!(rows[0].last, Some(2.0));
        assert_eq!(rows[0].min, Some(2.0));
        assert_eq!(rows[0].max, Some(4.0));
        assert_eq!(rows[0].avg, Some(3.0));
        let empty = summarize(&[series("b", &[(1.0, f64::INFINITY)])]);
        assert_eq!(empty[0].avg, None);
        assert_eq!(empty[0].last, None);
    }

    #[test]
    fn pie_fractions_sum_to_one() {
        let slices = pie_slices(&[
            series("a", &[(1.0, 1.0)]),
            series("b", &[(1.0, 0.0)]),
            series("c", &[(1.0, 3.0)]),
        ]);
        assert_eq!(slices.len(), 2);
        assert!((slices[0].fraction - 0.25).abs() < 1e-9);
        assert!((slices[1].fraction - 0.75).abs() < 1e-9);
        assert_eq!(slices[1].color, palette_color(2));
        assert!(slices[1].path.contains(" 1 1 0 1 1 "));
    }

    #[test]
    fn single_slice_is_a_full_circle() {
        let slices = pie_slices(&[series("only", &[(1.0, 5.0)])]);
        assert_eq!(slices.len(), 1);
        assert!(slices[0].path.starts_with("M 0 -1 A"));
        assert!(pie_slices(&[series("zero", &[(1.0, 0.0)])]).is_empty());
    }

    #[test]
    fn line_chart_scales_into_plot_and_splits_gaps() {
        let chart = line_chart(
            &[series("a", &[(0.0, 0.0), (10.0, 10.0), (20.0, f64::NAN), (30.0, 5.0)])],
            PlotSize {
                width: 300.0,
                height: 100.0,
            },
        )
        .expect("finite points");
        assert_eq!((chart.t_min, chart.t_max), (0.0, 30.0));
        assert_eq!((chart.y_min, chart.y_max), (0.0, 10.0));
        assert_eq!(chart.lines[0].segments, vec!["0.0,100.0 100.0,0.0", "300.0,50.0"]);
    }

    #[test]
    fn line_chart_without_points_is_none() {
        let size = PlotSize {
            width: 10.0,
            height: 10.0,
        };
        assert!(line_chart(&[], size).is_none());
        assert!(line_chart(&[series("nan", &[(1.0, f64::NAN)])], size).is_none());
    }
}
