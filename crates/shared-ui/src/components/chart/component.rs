use dioxus::prelude::*;
use shared_types::{fit_trend, ChartDatum, Point};

use super::geometry::{
    bar_layout, color_at, line_points, nice_max, pie_slices, points_attr, scatter_scales, ticks,
    trend_segment, Frame, Scale, VIEW_HEIGHT, VIEW_WIDTH,
};

const AXIS_COLOR: &str = "#9CA3AF";
const GRID_COLOR: &str = "#E5E7EB";
const TREND_COLOR: &str = "#EF4444";

fn view_box() -> String {
    format!("0 0 {VIEW_WIDTH} {VIEW_HEIGHT}")
}

/// Truncate long category names so they fit under a bar.
fn short_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        label.to_string()
    } else {
        let head: String = label.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{head}…")
    }
}

#[component]
fn EmptyChart() -> Element {
    rsx! {
        div { class: "chart-empty", "No data available" }
    }
}

/// Horizontal gridlines with value labels along the left edge.
#[component]
fn ValueAxis(max: u64, frame: Frame) -> Element {
    let scale = Scale::new((0.0, max as f64), (frame.bottom, frame.top));
    rsx! {
        for tick in ticks(max, 4) {
            line {
                x1: "{frame.left}",
                x2: "{frame.right}",
                y1: "{scale.map(tick as f64)}",
                y2: "{scale.map(tick as f64)}",
                stroke: GRID_COLOR,
                stroke_dasharray: "3 3",
            }
            text {
                x: "{frame.left - 6.0}",
                y: "{scale.map(tick as f64) + 4.0}",
                text_anchor: "end",
                font_size: "10",
                fill: AXIS_COLOR,
                "{tick}"
            }
        }
    }
}

#[component]
pub fn BarChart(
    data: Vec<ChartDatum>,
    #[props(default = "#3B82F6".to_string())] color: String,
) -> Element {
    if data.is_empty() {
        return rsx! { EmptyChart {} };
    }
    let frame = Frame::default();
    let max = nice_max(data.iter().map(|d| d.value).max().unwrap_or(0));
    let bars = bar_layout(&data, frame);
    let label_chars = ((frame.width() / data.len() as f64) / 6.0).max(3.0) as usize;

    rsx! {
        svg { class: "chart chart-bar", view_box: view_box(), role: "img",
            ValueAxis { max, frame }
            for bar in bars {
                g { key: "{bar.label}",
                    rect {
                        x: "{bar.x:.2}",
                        y: "{bar.y:.2}",
                        width: "{bar.width:.2}",
                        height: "{bar.height:.2}",
                        rx: "3",
                        fill: "{color}",
                        title { "{bar.label}: {bar.value}" }
                    }
                    text {
                        x: "{bar.x + bar.width / 2.0:.2}",
                        y: "{frame.bottom + 14.0}",
                        text_anchor: "middle",
                        font_size: "10",
                        fill: AXIS_COLOR,
                        "{short_label(&bar.label, label_chars)}"
                    }
                }
            }
        }
    }
}

#[component]
pub fn PieChart(data: Vec<ChartDatum>) -> Element {
    let (cx, cy, radius) = (VIEW_WIDTH / 2.0 - 70.0, VIEW_HEIGHT / 2.0, 95.0);
    let slices = pie_slices(&data, cx, cy, radius);
    if slices.is_empty() {
        return rsx! { EmptyChart {} };
    }

    rsx! {
        svg { class: "chart chart-pie", view_box: view_box(), role: "img",
            for slice in slices.iter() {
                path {
                    key: "{slice.label}",
                    d: "{slice.path}",
                    fill: slice.color,
                    stroke: "#ffffff",
                    stroke_width: "1",
                    title { "{slice.label}: {slice.value}" }
                }
            }
            for (i, slice) in slices.iter().enumerate() {
                g { key: "legend-{slice.label}",
                    rect {
                        x: "{VIEW_WIDTH - 140.0}",
                        y: "{20.0 + i as f64 * 18.0}",
                        width: "10",
                        height: "10",
                        fill: slice.color,
                    }
                    text {
                        x: "{VIEW_WIDTH - 124.0}",
                        y: "{29.0 + i as f64 * 18.0}",
                        font_size: "11",
                        fill: AXIS_COLOR,
                        "{short_label(&slice.label, 14)} ({slice.percent:.0}%)"
                    }
                }
            }
        }
    }
}

#[component]
pub fn LineChart(
    data: Vec<ChartDatum>,
    #[props(default = "#3B82F6".to_string())] color: String,
) -> Element {
    if data.is_empty() {
        return rsx! { EmptyChart {} };
    }
    let frame = Frame::default();
    let max = nice_max(data.iter().map(|d| d.value).max().unwrap_or(0));
    let points = line_points(&data, frame);
    let polyline = points_attr(&points);

    rsx! {
        svg { class: "chart chart-line", view_box: view_box(), role: "img",
            ValueAxis { max, frame }
            polyline {
                points: "{polyline}",
                fill: "none",
                stroke: "{color}",
                stroke_width: "2",
            }
            for (datum, (x, y)) in data.iter().zip(points.iter()) {
                g { key: "{datum.name}",
                    circle {
                        cx: "{x:.2}",
                        cy: "{y:.2}",
                        r: "3.5",
                        fill: "{color}",
                        title { "{datum.name}: {datum.value}" }
                    }
                    text {
                        x: "{x:.2}",
                        y: "{frame.bottom + 14.0}",
                        text_anchor: "middle",
                        font_size: "10",
                        fill: AXIS_COLOR,
                        "{datum.name}"
                    }
                }
            }
        }
    }
}

/// Scatter plot with an optional least-squares trend line.
#[component]
pub fn ScatterPlot(
    points: Vec<Point>,
    #[props(default = "X".to_string())] x_label: String,
    #[props(default = "Y".to_string())] y_label: String,
    #[props(default = "#3B82F6".to_string())] color: String,
    #[props(default = false)] show_trend: bool,
) -> Element {
    let frame = Frame::default();
    let Some((x_scale, y_scale)) = scatter_scales(&points, frame) else {
        return rsx! { EmptyChart {} };
    };
    let trend = if show_trend { fit_trend(&points) } else { None };
    let segment = trend.map(|t| trend_segment(&t, &x_scale, &y_scale));

    rsx! {
        svg { class: "chart chart-scatter", view_box: view_box(), role: "img",
            line {
                x1: "{frame.left}", x2: "{frame.right}",
                y1: "{frame.bottom}", y2: "{frame.bottom}",
                stroke: AXIS_COLOR,
            }
            line {
                x1: "{frame.left}", x2: "{frame.left}",
                y1: "{frame.top}", y2: "{frame.bottom}",
                stroke: AXIS_COLOR,
            }
            for (i, p) in points.iter().enumerate() {
                circle {
                    key: "{i}",
                    cx: "{x_scale.map(p.x):.2}",
                    cy: "{y_scale.map(p.y):.2}",
                    r: "3",
                    fill: "{color}",
                    fill_opacity: "0.6",
                    title { "{x_label}: {p.x}, {y_label}: {p.y}" }
                }
            }
            if let Some(((x1, y1), (x2, y2))) = segment {
                line {
                    class: "chart-trend",
                    x1: "{x1:.2}", y1: "{y1:.2}",
                    x2: "{x2:.2}", y2: "{y2:.2}",
                    stroke: TREND_COLOR,
                    stroke_width: "2",
                    stroke_dasharray: "5 5",
                }
            }
            text {
                x: "{(frame.left + frame.right) / 2.0}",
                y: "{VIEW_HEIGHT - 8.0}",
                text_anchor: "middle",
                font_size: "11",
                fill: AXIS_COLOR,
                "{x_label}"
            }
            text {
                x: "12",
                y: "{(frame.top + frame.bottom) / 2.0}",
                text_anchor: "middle",
                font_size: "11",
                fill: AXIS_COLOR,
                transform: "rotate(-90 12 {(frame.top + frame.bottom) / 2.0})",
                "{y_label}"
            }
        }
    }
}

/// Legend swatch color for the n-th category, matching the pie palette.
pub fn series_color(index: usize) -> &'static str {
    color_at(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(element: Element) -> String {
        dioxus_ssr::render_element(element)
    }

    fn sample() -> Vec<ChartDatum> {
        vec![ChartDatum::new("Theft", 4), ChartDatum::new("Fraud", 2)]
    }

    #[test]
    fn empty_data_renders_placeholder() {
        let html = render(rsx! { BarChart { data: Vec::new() } });
        assert!(html.contains("No data available"));
        let html = render(rsx! { PieChart { data: vec![ChartDatum::new("x", 0)] } });
        assert!(html.contains("No data available"));
    }

    #[test]
    fn bar_chart_draws_one_rect_per_datum() {
        let html = render(rsx! { BarChart { data: sample() } });
        assert_eq!(html.matches("<rect").count(), 2);
        assert!(html.contains("Theft: 4"));
    }

    #[test]
    fn pie_chart_has_legend_percentages() {
        let html = render(rsx! { PieChart { data: sample() } });
        assert!(html.contains("Theft (67%)"));
        assert!(html.contains("Fraud (33%)"));
    }

    #[test]
    fn scatter_trend_line_only_when_fit_exists() {
        let points = vec![Point::new(2020.0, 20.0), Point::new(2022.0, 30.0)];
        let html = render(rsx! { ScatterPlot { points: points.clone(), show_trend: true } });
        assert!(html.contains("chart-trend"));

        let vertical = vec![Point::new(2020.0, 20.0), Point::new(2020.0, 30.0)];
        let html = render(rsx! { ScatterPlot { points: vertical, show_trend: true } });
        assert!(!html.contains("chart-trend"));

        let html = render(rsx! { ScatterPlot { points: points, show_trend: false } });
        assert!(!html.contains("chart-trend"));
    }

    #[test]
    fn long_labels_are_shortened() {
        assert_eq!(short_label("Domestic Violence", 8), "Domesti…");
        assert_eq!(short_label("Theft", 8), "Theft");
    }
}
