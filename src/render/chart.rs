use std::cmp::Reverse;

use plotters::coord::ranged3d::Cartesian3d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;

use super::format::{format_scientific, format_time};
use super::{RenderError, ViewAngles};
use crate::color::rainbow;
use crate::data::model::PerformanceSurface;

const X_LABEL: &str = "filter size";
const Y_LABEL: &str = "number of pixels";
const Z_LABEL: &str = "time";

/// Tick labels on the pixel axis; more than this crowd the front corner.
const PIXEL_TICKS: usize = 4;

/// Offset of the axis titles beyond their edge, as a fraction of the axis span.
const TITLE_OFFSET: f64 = 0.25;

// Plotters' 3D coordinates put the vertical axis second, so the chart is built
// as (filter size, time, number of pixels).
type Point3 = (f64, f64, f64);
type SurfaceCoord = Cartesian3d<RangedCoordf64, RangedCoordf64, RangedCoordf64>;

fn draw_error<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

/// `(min, max)` of the values, widened so the range is never empty.
fn axis_bounds(values: &[f64]) -> (f64, f64) {
    let (min, max) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if min > max {
        (0.0, 1.0)
    } else if min == max {
        (min, min + 1.0)
    } else {
        (min, max)
    }
}

/// Vertical range: always includes zero, with some headroom above the peak.
fn time_bounds(surface: &PerformanceSurface) -> (f64, f64) {
    let (min, max) = surface.timings().range();
    let lo = min.min(0.0);
    let hi = if max > lo { max + (max - lo) * 0.05 } else { lo + 1.0 };
    (lo, hi)
}

/// Check that the meshgrid built from the axes lines up with the timing grid.
pub fn check_alignment(surface: &PerformanceSurface) -> Result<(), RenderError> {
    surface.check_alignment().map_err(|_| RenderError::ShapeMismatch {
        expected: surface.meshgrid().0.dim(),
        found: surface.timings().shape(),
    })
}

// ---------------------------------------------------------------------------
// Chart geometry
// ---------------------------------------------------------------------------

/// Data ranges of the three chart axes.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ChartBounds {
    x: (f64, f64),
    t: (f64, f64),
    p: (f64, f64),
}

impl ChartBounds {
    fn of(surface: &PerformanceSurface) -> Self {
        Self {
            x: axis_bounds(surface.filter_sizes()),
            t: time_bounds(surface),
            p: axis_bounds(surface.pixel_counts()),
        }
    }
}

fn build_chart<'a, DB: DrawingBackend>(
    root: &'a DrawingArea<DB, Shift>,
    bounds: &ChartBounds,
    view: ViewAngles,
) -> Result<ChartContext<'a, DB, SurfaceCoord>, RenderError> {
    let mut chart = ChartBuilder::on(root)
        .margin(30)
        .build_cartesian_3d(
            bounds.x.0..bounds.x.1,
            bounds.t.0..bounds.t.1,
            bounds.p.0..bounds.p.1,
        )
        .map_err(draw_error)?;

    chart.with_projection(|mut pb| {
        pb.yaw = view.yaw;
        pb.pitch = view.pitch;
        pb.scale = 0.75;
        pb.into_matrix()
    });
    Ok(chart)
}

/// Screen row of the floor point below `(x, p)`.
///
/// The projection is orthographic. Seen from above (pitch >= 0) the floor
/// recedes up the screen, so a smaller row is farther from the viewer. Seen
/// from below the order flips.
fn floor_row<DB: DrawingBackend>(
    area: &DrawingArea<DB, SurfaceCoord>,
    bounds: &ChartBounds,
    x: f64,
    p: f64,
) -> i32 {
    area.map_coordinate(&(x, bounds.t.0, p)).1
}

/// Whether a floor point on screen row `a` is nearer the viewer than one on `b`.
fn nearer(view: ViewAngles, a: i32, b: i32) -> bool {
    if view.pitch >= 0.0 {
        a > b
    } else {
        a < b
    }
}

/// Grid cells `(row, col)` ordered back to front, keyed by the screen row of
/// each cell's floor centre.
fn back_to_front(
    rows: usize,
    cols: usize,
    view: ViewAngles,
    floor_row_of: impl Fn(usize, usize) -> i32,
) -> Vec<(usize, usize)> {
    let mut cells: Vec<(usize, usize)> = (0..rows.saturating_sub(1))
        .flat_map(|r| (0..cols.saturating_sub(1)).map(move |c| (r, c)))
        .collect();
    if view.pitch >= 0.0 {
        cells.sort_by_key(|&(r, c)| floor_row_of(r, c));
    } else {
        cells.sort_by_key(|&(r, c)| Reverse(floor_row_of(r, c)));
    }
    cells
}

/// Axis titles, each placed just outside the floor edge nearest the viewer,
/// which is where plotters puts the tick labels.
fn title_anchors<DB: DrawingBackend>(
    area: &DrawingArea<DB, SurfaceCoord>,
    bounds: &ChartBounds,
    view: ViewAngles,
) -> [(&'static str, Point3); 3] {
    let x_mid = (bounds.x.0 + bounds.x.1) / 2.0;
    let p_mid = (bounds.p.0 + bounds.p.1) / 2.0;

    let (p_near, p_far) = if nearer(
        view,
        floor_row(area, bounds, x_mid, bounds.p.1),
        floor_row(area, bounds, x_mid, bounds.p.0),
    ) {
        (bounds.p.1, bounds.p.0)
    } else {
        (bounds.p.0, bounds.p.1)
    };
    let (x_near, x_far) = if nearer(
        view,
        floor_row(area, bounds, bounds.x.1, p_mid),
        floor_row(area, bounds, bounds.x.0, p_mid),
    ) {
        (bounds.x.1, bounds.x.0)
    } else {
        (bounds.x.0, bounds.x.1)
    };

    let (t_min, t_max) = bounds.t;
    [
        (
            X_LABEL,
            (x_mid, t_min, p_near + (p_near - p_far) * TITLE_OFFSET),
        ),
        (
            Y_LABEL,
            (x_near + (x_near - x_far) * TITLE_OFFSET, t_min, p_mid),
        ),
        (
            Z_LABEL,
            (x_far + (x_far - x_near) * TITLE_OFFSET, t_max, p_far),
        ),
    ]
}

// ---------------------------------------------------------------------------
// Surface chart
// ---------------------------------------------------------------------------

/// Draw the timing surface onto `root`.
///
/// Every grid cell becomes one opaque quad shaded by its mean height and
/// outlined at stride 1. Cells are painted back to front for the current
/// view, so nearer cells cover farther ones together with their outlines.
pub fn draw_surface<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    surface: &PerformanceSurface,
    view: ViewAngles,
) -> Result<(), RenderError> {
    check_alignment(surface)?;

    let filter_sizes = surface.filter_sizes();
    let pixel_counts = surface.pixel_counts();
    let grid = surface.timings().values();
    let (rows, cols) = surface.timings().shape();

    let bounds = ChartBounds::of(surface);
    let (data_min, data_max) = surface.timings().range();
    let span = (data_max - data_min).max(f64::EPSILON);

    let height = |r: usize, c: usize| {
        let v = grid[[r, c]];
        if v.is_finite() {
            v
        } else {
            bounds.t.0
        }
    };
    let point =
        |r: usize, c: usize| -> Point3 { (filter_sizes[c], height(r, c), pixel_counts[r]) };

    root.fill(&WHITE).map_err(draw_error)?;

    let mut chart = build_chart(root, &bounds, view)?;

    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.1))
        .max_light_lines(2)
        .z_labels(PIXEL_TICKS)
        .label_style(("sans-serif", 13))
        .x_formatter(&|x| format!("{x:.0}"))
        .y_formatter(&|t| format_time(*t))
        .z_formatter(&|p| format_scientific(*p, 1))
        .draw()
        .map_err(draw_error)?;

    let area = chart.plotting_area();
    let order = back_to_front(rows, cols, view, |r, c| {
        floor_row(
            area,
            &bounds,
            (filter_sizes[c] + filter_sizes[c + 1]) / 2.0,
            (pixel_counts[r] + pixel_counts[r + 1]) / 2.0,
        )
    });

    for (r, c) in order {
        let corners = [(r, c), (r, c + 1), (r + 1, c + 1), (r + 1, c)];
        let mean = corners.iter().map(|&(i, j)| height(i, j)).sum::<f64>() / 4.0;
        let [red, green, blue] = rainbow((mean - data_min) / span);

        let mut outline: Vec<Point3> = corners.iter().map(|&(i, j)| point(i, j)).collect();
        area.draw(&Polygon::new(
            outline.clone(),
            RGBColor(red, green, blue).filled(),
        ))
        .map_err(draw_error)?;

        outline.push(outline[0]);
        area.draw(&PathElement::new(outline, BLACK.mix(0.3)))
            .map_err(draw_error)?;
    }

    let title_style = ("sans-serif", 18).into_font();
    for (text, pos) in title_anchors(area, &bounds, view) {
        area.draw(&Text::new(text, pos, title_style.clone()))
            .map_err(draw_error)?;
    }

    Ok(())
}

/// Rasterise the surface into a tightly packed RGB8 buffer of `size`.
pub fn render_rgb(
    surface: &PerformanceSurface,
    view: ViewAngles,
    (width, height): (u32, u32),
) -> Result<Vec<u8>, RenderError> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidSize { width, height });
    }

    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw_surface(&root, surface, view)?;
        root.present().map_err(draw_error)?;
    }
    Ok(buffer)
}
