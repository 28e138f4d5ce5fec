use eframe::egui;

use crate::state::ViewerState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SurfaceViewerApp {
    pub state: ViewerState,
    /// Last rendered chart; refreshed when `state.needs_redraw` is set.
    texture: Option<egui::TextureHandle>,
}

impl SurfaceViewerApp {
    pub fn new(state: ViewerState) -> Self {
        Self {
            state,
            texture: None,
        }
    }
}

impl eframe::App for SurfaceViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: view controls and 2D curves ----
        egui::SidePanel::left("control_panel")
            .default_width(360.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: 3D surface ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::surface_view(ui, &mut self.state, &mut self.texture);
        });
    }
}
