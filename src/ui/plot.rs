use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{RichText, Stroke, Ui};
use egui_plot::{Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use student_profile::data::profile::{CompetencyScore, GpaTrend};
use student_profile::theme;

/// Radius (in plot units) of the 100-point ring.
const RADAR_RADIUS: f64 = 1.0;
const RADAR_RINGS: [f64; 5] = [20.0, 40.0, 60.0, 80.0, 100.0];

// ---------------------------------------------------------------------------
// Competency radar
// ---------------------------------------------------------------------------

/// Unit vector of spoke `i` out of `n`, starting at 12 o'clock and going
/// clockwise.
fn spoke(i: usize, n: usize) -> [f64; 2] {
    let angle = FRAC_PI_2 - TAU * i as f64 / n as f64;
    [angle.cos(), angle.sin()]
}

/// Closed polygon vertices for `values` (0–100) on `n` spokes.
fn radar_vertices(values: &[f64]) -> Vec<[f64; 2]> {
    let n = values.len();
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let [x, y] = spoke(i, n);
            let r = RADAR_RADIUS * v.clamp(0.0, 100.0) / 100.0;
            [x * r, y * r]
        })
        .collect()
}

/// Render the five-axis competency chart as a filled polygon over rings.
pub fn radar_chart(ui: &mut Ui, scores: &[CompetencyScore]) {
    let n = scores.len();
    if n < 3 {
        return;
    }
    let grid = theme::hex(theme::GRID);
    let accent = theme::hex(theme::ACCENT);
    let values: Vec<f64> = scores.iter().map(|s| s.score).collect();

    Plot::new("competency_radar")
        .height(340.0)
        .data_aspect(1.0)
        .include_x(-1.45)
        .include_x(1.45)
        .include_y(-1.35)
        .include_y(1.4)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for ring in RADAR_RINGS {
                let mut pts = radar_vertices(&vec![ring; n]);
                pts.push(pts[0]);
                plot_ui.line(Line::new(PlotPoints::from(pts)).color(grid).width(1.0));
            }
            for (i, score) in scores.iter().enumerate() {
                let [x, y] = spoke(i, n);
                plot_ui.line(
                    Line::new(PlotPoints::from(vec![[0.0, 0.0], [x, y]]))
                        .color(grid)
                        .width(1.0),
                );
                plot_ui.text(Text::new(
                    PlotPoint::new(x * 1.22, y * 1.12),
                    RichText::new(score.caption()).size(12.0),
                ));
            }

            let vertices = radar_vertices(&values);
            plot_ui.polygon(
                Polygon::new(PlotPoints::from(vertices.clone()))
                    .name("综合评分")
                    .fill_color(theme::hex_alpha(theme::ACCENT, 0.3))
                    .stroke(Stroke::new(2.0, accent)),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(vertices))
                    .radius(3.5)
                    .color(accent),
            );
        });
}

// ---------------------------------------------------------------------------
// GPA trend
// ---------------------------------------------------------------------------

/// Line chart of the recorded semesters, x labelled by semester name.
pub fn gpa_chart(ui: &mut Ui, trend: &GpaTrend) {
    let (labels, gpas) = trend.series();
    let color = theme::hex(theme::GPA_LINE);
    let points: Vec<[f64; 2]> = gpas
        .iter()
        .enumerate()
        .map(|(i, &gpa)| [i as f64, gpa])
        .collect();

    Plot::new("gpa_trend")
        .height(260.0)
        .x_axis_label("学期")
        .y_axis_label("绩点")
        .include_x(-0.5)
        .include_x(points.len() as f64 - 0.5)
        .include_y(0.0)
        .include_y(4.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name("绩点")
                    .color(color)
                    .width(3.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(points.clone()))
                    .radius(5.0)
                    .color(color),
            );
            for (i, gpa) in gpas.iter().enumerate() {
                plot_ui.text(Text::new(
                    PlotPoint::new(i as f64, gpa + 0.25),
                    RichText::new(format!("{gpa:.2}")).color(color),
                ));
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_spoke_points_up() {
        let [x, y] = spoke(0, 5);
        assert!(x.abs() < 1e-12);
        assert!((y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn vertices_scale_with_score() {
        let v = radar_vertices(&[100.0, 50.0, 0.0, 150.0, -10.0]);
        let len = |p: [f64; 2]| (p[0] * p[0] + p[1] * p[1]).sqrt();
        assert!((len(v[0]) - 1.0).abs() < 1e-12);
        assert!((len(v[1]) - 0.5).abs() < 1e-12);
        assert!(len(v[2]) < 1e-12);
        assert!((len(v[3]) - 1.0).abs() < 1e-12);
        assert!(len(v[4]) < 1e-12);
    }
}
