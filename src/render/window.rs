use std::path::PathBuf;

use eframe::egui;

use super::{RenderError, RenderResult, SurfaceRenderer, ViewAngles};
use crate::app::SurfaceViewerApp;
use crate::data::model::PerformanceSurface;
use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Interactive renderer: eframe window, blocks until closed
// ---------------------------------------------------------------------------

pub struct WindowRenderer {
    results_dir: PathBuf,
    size: (u32, u32),
    view: ViewAngles,
}

impl WindowRenderer {
    /// `results_dir` is where the viewer reloads from when the domain changes.
    pub fn new(results_dir: PathBuf, size: (u32, u32), view: ViewAngles) -> Self {
        Self {
            results_dir,
            size,
            view,
        }
    }
}

impl SurfaceRenderer for WindowRenderer {
    fn render(&mut self, surface: &PerformanceSurface) -> RenderResult {
        let state = ViewerState::new(
            surface.clone(),
            self.results_dir.clone(),
            self.view,
            self.size,
        );

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1400.0, 900.0])
                .with_min_inner_size([800.0, 500.0]),
            ..Default::default()
        };

        log::info!("Opening viewer for {} domain surface", surface.domain());
        eframe::run_native(
            "Convolution Timing Surface",
            options,
            Box::new(move |_cc| Ok(Box::new(SurfaceViewerApp::new(state)))),
        )
        .map_err(|e| RenderError::Window(e.to_string()))
    }
}
