use std::f64::consts::PI;

use eframe::egui::{self, Color32, RichText, Slider, Ui};

use super::plot;
use crate::data::model::ResultDomain;
use crate::render::ViewAngles;
use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Left side panel – view controls and per-size curves
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut ViewerState) {
    ui.heading("View");
    ui.separator();

    let mut view = state.view;
    ui.add(Slider::new(&mut view.yaw, -PI..=PI).text("yaw"));
    ui.add(
        Slider::new(
            &mut view.pitch,
            -ViewAngles::PITCH_LIMIT..=ViewAngles::PITCH_LIMIT,
        )
        .text("pitch"),
    );
    state.set_view(view);

    if ui.button("Reset view").clicked() {
        state.reset_view();
    }
    ui.label(RichText::new("Drag the surface to rotate it.").weak());

    ui.add_space(8.0);
    ui.strong("Domain");
    let current = state.domain();
    egui::ComboBox::from_id_salt("domain")
        .selected_text(current.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for domain in ResultDomain::ALL {
                if ui
                    .selectable_label(current == domain, domain.to_string())
                    .clicked()
                {
                    state.set_domain(domain);
                }
            }
        });

    ui.separator();
    ui.heading("Timing by image size");
    plot::timing_curves(ui, state);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open results folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let (rows, cols) = state.surface.timings().shape();
        let (_, max) = state.surface.timings().range();
        ui.label(format!(
            "{} domain, {} ({rows}×{cols} grid, max time {max:.4})",
            state.domain(),
            state.results_dir.display(),
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut ViewerState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open benchmark results")
        .set_directory(&state.results_dir)
        .pick_folder();

    if let Some(dir) = folder {
        state.set_results_dir(dir);
    }
}
