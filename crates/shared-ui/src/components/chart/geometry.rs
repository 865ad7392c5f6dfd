//! Layout math for the inline SVG charts. Pure functions, no rendering.

use shared_types::{ChartDatum, Point, TrendLine};
use std::f64::consts::PI;

pub const PALETTE: [&str; 6] = [
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#F97316",
];

pub const VIEW_WIDTH: f64 = 400.0;
pub const VIEW_HEIGHT: f64 = 260.0;

pub fn color_at(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Plot area inside the view box, leaving room for axis labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            left: 40.0,
            top: 16.0,
            right: VIEW_WIDTH - 12.0,
            bottom: VIEW_HEIGHT - 48.0,
        }
    }
}

impl Frame {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Linear map from a data domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl Scale {
    /// A collapsed domain is widened by one unit each side.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let domain = if domain.0 == domain.1 {
            (domain.0 - 1.0, domain.1 + 1.0)
        } else {
            domain
        };
        Self { domain, range }
    }

    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }
}

/// Round an axis maximum up to 1, 2 or 5 times a power of ten.
pub fn nice_max(max: u64) -> u64 {
    if max == 0 {
        return 1;
    }
    let mut magnitude = 1u64;
    while magnitude.saturating_mul(10) <= max {
        magnitude *= 10;
    }
    [1, 2, 5, 10]
        .into_iter()
        .map(|step| step * magnitude)
        .find(|candidate| *candidate >= max)
        .unwrap_or(max)
}

/// Evenly spaced tick values from zero to `max` inclusive.
pub fn ticks(max: u64, count: u64) -> Vec<u64> {
    if count == 0 {
        return vec![0];
    }
    let step = (max / count).max(1);
    (0..=max).step_by(step as usize).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: String,
    pub value: u64,
}

pub fn bar_layout(data: &[ChartDatum], frame: Frame) -> Vec<Bar> {
    if data.is_empty() {
        return Vec::new();
    }
    let max = nice_max(data.iter().map(|d| d.value).max().unwrap_or(0)) as f64;
    let slot = frame.width() / data.len() as f64;
    let width = slot * 0.7;
    data.iter()
        .enumerate()
        .map(|(i, d)| {
            let height = d.value as f64 / max * frame.height();
            Bar {
                x: frame.left + slot * i as f64 + (slot - width) / 2.0,
                y: frame.bottom - height,
                width,
                height,
                label: d.name.clone(),
                value: d.value,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub path: String,
    pub color: &'static str,
    pub label: String,
    pub value: u64,
    pub percent: f64,
}

/// SVG arc paths for a pie centred at (`cx`, `cy`). Zero totals draw nothing.
pub fn pie_slices(data: &[ChartDatum], cx: f64, cy: f64, radius: f64) -> Vec<Slice> {
    let total: u64 = data.iter().map(|d| d.value).sum();
    if total == 0 {
        return Vec::new();
    }
    let mut angle = -PI / 2.0;
    data.iter()
        .enumerate()
        .filter(|(_, d)| d.value > 0)
        .map(|(i, d)| {
            let fraction = d.value as f64 / total as f64;
            let sweep = fraction * 2.0 * PI;
            let path = if fraction >= 1.0 {
                // Two half arcs; a single 360° arc collapses to nothing.
                format!(
                    "M {cx} {top} A {radius} {radius} 0 1 1 {cx} {bottom} A {radius} {radius} 0 1 1 {cx} {top} Z",
                    top = cy - radius,
                    bottom = cy + radius,
                )
            } else {
                let (x0, y0) = (cx + radius * angle.cos(), cy + radius * angle.sin());
                let end = angle + sweep;
                let (x1, y1) = (cx + radius * end.cos(), cy + radius * end.sin());
                let large_arc = if sweep > PI { 1 } else { 0 };
                format!(
                    "M {cx} {cy} L {x0:.2} {y0:.2} A {radius} {radius} 0 {large_arc} 1 {x1:.2} {y1:.2} Z"
                )
            };
            angle += sweep;
            Slice {
                path,
                color: color_at(i),
                label: d.name.clone(),
                value: d.value,
                percent: fraction * 100.0,
            }
        })
        .collect()
}

/// Vertices of a line chart, one per datum, evenly spaced along x.
pub fn line_points(data: &[ChartDatum], frame: Frame) -> Vec<(f64, f64)> {
    if data.is_empty() {
        return Vec::new();
    }
    let max = nice_max(data.iter().map(|d| d.value).max().unwrap_or(0)) as f64;
    let y = Scale::new((0.0, max), (frame.bottom, frame.top));
    let step = if data.len() > 1 {
        frame.width() / (data.len() - 1) as f64
    } else {
        0.0
    };
    data.iter()
        .enumerate()
        .map(|(i, d)| {
            let x = if data.len() > 1 {
                frame.left + step * i as f64
            } else {
                frame.left + frame.width() / 2.0
            };
            (x, y.map(d.value as f64))
        })
        .collect()
}

pub fn points_attr(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{x:.2},{y:.2}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// X and Y scales covering every point, with a little headroom.
pub fn scatter_scales(points: &[Point], frame: Frame) -> Option<(Scale, Scale)> {
    let first = points.first()?;
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    let pad_x = ((max_x - min_x) * 0.05).max(0.5);
    let pad_y = ((max_y - min_y) * 0.05).max(0.5);
    Some((
        Scale::new((min_x - pad_x, max_x + pad_x), (frame.left, frame.right)),
        Scale::new((min_y - pad_y, max_y + pad_y), (frame.bottom, frame.top)),
    ))
}

/// Trend segment in pixel space.
pub fn trend_segment(trend: &TrendLine, x: &Scale, y: &Scale) -> ((f64, f64), (f64, f64)) {
    (
        (x.map(trend.start.x), y.map(trend.start.y)),
        (x.map(trend.end.x), y.map(trend.end.y)),
    )
}
