use eframe::egui::{self, ColorImage, Sense, TextureHandle, TextureOptions, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::color::generate_palette;
use crate::render::chart::render_rgb;
use crate::state::ViewerState;

/// Radians of rotation per dragged point.
const DRAG_SENSITIVITY: f64 = 0.01;

// ---------------------------------------------------------------------------
// 3D surface (central panel)
// ---------------------------------------------------------------------------

/// Show the rendered surface; dragging rotates the camera.
pub fn surface_view(ui: &mut Ui, state: &mut ViewerState, texture: &mut Option<TextureHandle>) {
    if state.needs_redraw {
        refresh_texture(ui.ctx(), state, texture);
    }

    let Some(tex) = texture.as_ref() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Surface could not be rendered");
        });
        return;
    };

    let response = ui.add(
        egui::Image::from_texture(egui::load::SizedTexture::from_handle(tex))
            .shrink_to_fit()
            .sense(Sense::drag()),
    );

    if response.dragged() {
        let delta = response.drag_delta();
        state.rotate(
            f64::from(delta.x) * DRAG_SENSITIVITY,
            f64::from(delta.y) * DRAG_SENSITIVITY,
        );
    }
}

fn refresh_texture(
    ctx: &egui::Context,
    state: &mut ViewerState,
    texture: &mut Option<TextureHandle>,
) {
    let (width, height) = state.render_size;
    match render_rgb(&state.surface, state.view, state.render_size) {
        Ok(buffer) => {
            let image = ColorImage::from_rgb([width as usize, height as usize], &buffer);
            if let Some(tex) = texture.as_mut() {
                tex.set(image, TextureOptions::LINEAR);
            } else {
                *texture = Some(ctx.load_texture("timing_surface", image, TextureOptions::LINEAR));
            }
        }
        Err(e) => {
            log::error!("Failed to render surface: {e}");
            state.status_message = Some(format!("Error: {e}"));
        }
    }
    state.needs_redraw = false;
}

// ---------------------------------------------------------------------------
// Timing curves (side panel)
// ---------------------------------------------------------------------------

/// Time vs filter size, one line per image size.
pub fn timing_curves(ui: &mut Ui, state: &ViewerState) {
    let surface = &state.surface;
    let colors = generate_palette(surface.edge_lengths().len());

    Plot::new("timing_curves")
        .legend(Legend::default())
        .x_axis_label("filter size")
        .y_axis_label("time")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (i, (&edge, &color)) in surface.edge_lengths().iter().zip(&colors).enumerate() {
                let points: PlotPoints = surface
                    .filter_sizes()
                    .iter()
                    .zip(surface.timings().row(i).iter())
                    .map(|(&f, &t)| [f, t])
                    .collect();

                let line = Line::new(points)
                    .name(format!("{edge}×{edge}"))
                    .color(color)
                    .width(1.5);

                plot_ui.line(line);
            }
        });
}
