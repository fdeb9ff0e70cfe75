//! Inline SVG line chart for one title's score-over-time series

use chrono::NaiveDate;

use crate::trend::TrendSeries;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 320.0;
const MARGIN_LEFT: f64 = 50.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 70.0;

/// Render one series as an SVG chart: score (y, 0-100) against
/// registration date (x), line with point markers, axis labels, date tick
/// labels rotated for readability.
///
/// Points whose score is missing are skipped when drawing; their dates
/// still produce ticks.
pub fn render_chart(series: &TrendSeries) -> String {
    // points are date-ascending, so first/last bound the x range
    let (min_date, max_date) = match (series.points.first(), series.points.last()) {
        (Some(first), Some(last)) => (first.date, last.date),
        _ => return String::new(),
    };

    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let x_axis_y = MARGIN_TOP + plot_h;

    let span_days = (max_date - min_date).num_days();
    let x_for = |date: NaiveDate| -> f64 {
        if span_days == 0 {
            // every attempt on the same day collapses to a single x
            MARGIN_LEFT + plot_w / 2.0
        } else {
            MARGIN_LEFT + (date - min_date).num_days() as f64 / span_days as f64 * plot_w
        }
    };
    let y_for = |score: u32| -> f64 {
        MARGIN_TOP + (1.0 - f64::from(score.min(100)) / 100.0) * plot_h
    };

    let mut svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img">"##,
        w = WIDTH,
        h = HEIGHT
    );

    // axes
    svg.push_str(&format!(
        r##"<line x1="{l:.1}" y1="{t:.1}" x2="{l:.1}" y2="{b:.1}" stroke="#333"/>"##,
        l = MARGIN_LEFT,
        t = MARGIN_TOP,
        b = x_axis_y
    ));
    svg.push_str(&format!(
        r##"<line x1="{l:.1}" y1="{b:.1}" x2="{r:.1}" y2="{b:.1}" stroke="#333"/>"##,
        l = MARGIN_LEFT,
        r = MARGIN_LEFT + plot_w,
        b = x_axis_y
    ));

    // y ticks
    for tick in [0u32, 25, 50, 75, 100] {
        let y = y_for(tick);
        svg.push_str(&format!(
            r##"<line x1="{x1:.1}" y1="{y:.1}" x2="{x2:.1}" y2="{y:.1}" stroke="#ccc"/>"##,
            x1 = MARGIN_LEFT - 4.0,
            x2 = MARGIN_LEFT,
            y = y
        ));
        svg.push_str(&format!(
            r##"<text x="{x:.1}" y="{y:.1}" font-size="10" text-anchor="end">{tick}</text>"##,
            x = MARGIN_LEFT - 8.0,
            y = y + 3.0,
            tick = tick
        ));
    }

    // one rotated date label per distinct date
    let mut tick_dates: Vec<NaiveDate> = Vec::new();
    for point in &series.points {
        if !tick_dates.contains(&point.date) {
            tick_dates.push(point.date);
        }
    }
    for date in tick_dates {
        let x = x_for(date);
        svg.push_str(&format!(
            r##"<line x1="{x:.1}" y1="{y1:.1}" x2="{x:.1}" y2="{y2:.1}" stroke="#ccc"/>"##,
            x = x,
            y1 = x_axis_y,
            y2 = x_axis_y + 4.0
        ));
        svg.push_str(&format!(
            r##"<text x="{x:.1}" y="{y:.1}" font-size="10" text-anchor="start" transform="rotate(45 {x:.1} {y:.1})">{date}</text>"##,
            x = x,
            y = x_axis_y + 14.0,
            date = date.format("%Y-%m-%d")
        ));
    }

    // line and markers over the scored points only
    let scored: Vec<(f64, f64)> = series
        .points
        .iter()
        .filter_map(|p| p.score.map(|s| (x_for(p.date), y_for(s))))
        .collect();

    if scored.len() >= 2 {
        let path: Vec<String> = scored
            .iter()
            .map(|(x, y)| format!("{:.1},{:.1}", x, y))
            .collect();
        svg.push_str(&format!(
            r##"<polyline points="{}" fill="none" stroke="#4477aa" stroke-width="1.5"/>"##,
            path.join(" ")
        ));
    }
    for (x, y) in &scored {
        svg.push_str(&format!(
            r##"<circle cx="{:.1}" cy="{:.1}" r="3" fill="#4477aa"/>"##,
            x, y
        ));
    }

    // axis labels
    svg.push_str(&format!(
        r##"<text x="{x:.1}" y="{y:.1}" font-size="11" text-anchor="middle">Date</text>"##,
        x = MARGIN_LEFT + plot_w / 2.0,
        y = HEIGHT - 6.0
    ));
    svg.push_str(&format!(
        r##"<text x="{x:.1}" y="{y:.1}" font-size="11" text-anchor="middle" transform="rotate(-90 {x:.1} {y:.1})">Score</text>"##,
        x = 14.0,
        y = MARGIN_TOP + plot_h / 2.0
    ));

    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trend::TrendPoint;

    fn point(date: &str, score: Option<u32>) -> TrendPoint {
        TrendPoint {
            date: date.parse().unwrap(),
            score,
        }
    }

    fn series(points: Vec<TrendPoint>) -> TrendSeries {
        TrendSeries {
            title: "A".to_string(),
            points,
        }
    }

    #[test]
    fn test_two_points_draw_line_and_markers() {
        let svg = render_chart(&series(vec![
            point("2026-01-01", Some(80)),
            point("2026-02-01", Some(95)),
        ]));

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("<polyline"));
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains("2026-01-01"));
        assert!(svg.contains("2026-02-01"));
        assert!(svg.contains(">Date<"));
        assert!(svg.contains(">Score<"));
    }

    #[test]
    fn test_same_date_points_do_not_divide_by_zero() {
        let svg = render_chart(&series(vec![
            point("2026-01-01", Some(70)),
            point("2026-01-01", Some(95)),
        ]));

        assert_eq!(svg.matches("<circle").count(), 2);
        // one tick for the single distinct date
        assert_eq!(svg.matches("rotate(45").count(), 1);
    }

    #[test]
    fn test_missing_scores_are_not_plotted() {
        let svg = render_chart(&series(vec![
            point("2026-01-01", Some(80)),
            point("2026-02-01", None),
        ]));

        // a single scored point: marker but no line
        assert_eq!(svg.matches("<circle").count(), 1);
        assert!(!svg.contains("<polyline"));
        // the unscored date still gets a tick
        assert!(svg.contains("2026-02-01"));
    }
}
