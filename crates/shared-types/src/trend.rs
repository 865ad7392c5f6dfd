use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Least-squares line drawn across the observed x range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
    pub start: Point,
    pub end: Point,
}

impl TrendLine {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least squares over `points`.
///
/// Returns `None` for fewer than two points, when every x is equal, or when
/// the arithmetic overflows to a non-finite value.
pub fn fit_trend(points: &[Point]) -> Option<TrendLine> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in points {
        sum_x += p.x;
        sum_y += p.y;
        sum_xy += p.x * p.y;
        sum_xx += p.x * p.x;
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
    }

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 || min_x == max_x {
        return None;
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    if !slope.is_finite() || !intercept.is_finite() {
        return None;
    }

    let line = |x: f64| Point::new(x, slope * x + intercept);
    Some(TrendLine {
        slope,
        intercept,
        start: line(min_x),
        end: line(max_x),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn exact_line_is_recovered() {
        let points: Vec<Point> = (0..5).map(|i| Point::new(i as f64, 2.0 * i as f64 + 1.0)).collect();
        let trend = fit_trend(&points).unwrap();
        assert!(close(trend.slope, 2.0));
        assert!(close(trend.intercept, 1.0));
        assert_eq!(trend.start.x, 0.0);
        assert_eq!(trend.end.x, 4.0);
        assert!(close(trend.end.y, 9.0));
    }

    #[test]
    fn endpoints_lie_on_the_line() {
        let points = vec![
            Point::new(2020.0, 25.0),
            Point::new(2021.0, 31.0),
            Point::new(2022.0, 29.0),
            Point::new(2024.0, 40.0),
        ];
        let trend = fit_trend(&points).unwrap();
        assert!(close(trend.start.y, trend.at(trend.start.x)));
        assert!(close(trend.end.y, trend.at(trend.end.x)));
        assert_eq!(trend.start.x, 2020.0);
        assert_eq!(trend.end.x, 2024.0);
    }

    #[test]
    fn too_few_points_has_no_trend() {
        assert!(fit_trend(&[]).is_none());
        assert!(fit_trend(&[Point::new(1.0, 1.0)]).is_none());
    }

    #[test]
    fn vertical_data_has_no_trend() {
        let points = vec![Point::new(3.0, 1.0), Point::new(3.0, 7.0), Point::new(3.0, 2.0)];
        assert!(fit_trend(&points).is_none());
    }

    #[test]
    fn non_finite_input_has_no_trend() {
        let points = vec![Point::new(0.0, f64::NAN), Point::new(1.0, 2.0)];
        assert!(fit_trend(&points).is_none());
    }
}
