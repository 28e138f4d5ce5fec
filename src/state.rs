use std::path::PathBuf;

use crate::data::axes::ParameterGrid;
use crate::data::loader::load_surface;
use crate::data::model::{PerformanceSurface, ResultDomain};
use crate::render::ViewAngles;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
pub struct ViewerState {
    /// Surface currently on screen. Only replaced by a complete, valid load.
    pub surface: PerformanceSurface,

    /// Directory the surface was loaded from.
    pub results_dir: PathBuf,

    /// Current camera orientation.
    pub view: ViewAngles,

    /// Orientation restored by "Reset view".
    pub initial_view: ViewAngles,

    /// Raster size of the rendered chart.
    pub render_size: (u32, u32),

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether the chart texture is out of date.
    pub needs_redraw: bool,
}

impl ViewerState {
    pub fn new(
        surface: PerformanceSurface,
        results_dir: PathBuf,
        view: ViewAngles,
        render_size: (u32, u32),
    ) -> Self {
        Self {
            surface,
            results_dir,
            view,
            initial_view: view,
            render_size,
            status_message: None,
            needs_redraw: true,
        }
    }

    pub fn domain(&self) -> ResultDomain {
        self.surface.domain()
    }

    pub fn set_view(&mut self, view: ViewAngles) {
        if view != self.view {
            self.view = view;
            self.needs_redraw = true;
        }
    }

    /// Rotate the camera by the given deltas in radians.
    pub fn rotate(&mut self, d_yaw: f64, d_pitch: f64) {
        self.set_view(self.view.rotated(d_yaw, d_pitch));
    }

    pub fn reset_view(&mut self) {
        self.set_view(self.initial_view);
    }

    /// Switch to the other result family in the same directory.
    pub fn set_domain(&mut self, domain: ResultDomain) -> bool {
        if domain == self.domain() {
            return true;
        }
        self.load(self.results_dir.clone(), domain)
    }

    /// Load the current domain from a different directory.
    pub fn set_results_dir(&mut self, dir: PathBuf) -> bool {
        self.load(dir, self.domain())
    }

    /// Load `domain` from `dir`. On failure the current surface stays and the
    /// error is kept in `status_message`.
    pub fn load(&mut self, dir: PathBuf, domain: ResultDomain) -> bool {
        match load_surface(&dir, &ParameterGrid::default(), domain) {
            Ok(surface) => {
                log::info!(
                    "Loaded {domain} domain surface {:?} from {}",
                    surface.timings().shape(),
                    dir.display()
                );
                self.surface = surface;
                self.results_dir = dir;
                self.status_message = None;
                self.needs_redraw = true;
                true
            }
            Err(e) => {
                let e = anyhow::Error::from(e);
                log::error!("Failed to load results: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;
    use crate::data::axes::IMAGE_EDGE_LENGTHS;
    use crate::data::loader::result_file_name;
    use crate::data::model::TimingGrid;

    fn write_domain(dir: &Path, domain: ResultDomain, value: f64) {
        let contents = vec![value.to_string(); 20].join("\n");
        for &edge in &IMAGE_EDGE_LENGTHS {
            fs::write(
                dir.join(result_file_name(domain.base_name(), edge)),
                &contents,
            )
            .unwrap();
        }
    }

    fn state_in(dir: &Path) -> ViewerState {
        let axes = ParameterGrid::default();
        let grid = TimingGrid::from_rows(&vec![vec![1.0; 20]; 7], 20).unwrap();
        let surface = PerformanceSurface::new(ResultDomain::Frequency, &axes, grid).unwrap();
        let mut state = ViewerState::new(
            surface,
            dir.to_path_buf(),
            ViewAngles::default(),
            (640, 480),
        );
        state.needs_redraw = false;
        state
    }

    #[test]
    fn rotation_marks_redraw() {
        let dir = TempDir::new().unwrap();
        let mut state = state_in(dir.path());

        state.rotate(0.0, 0.0);
        assert!(!state.needs_redraw);

        state.rotate(0.1, 0.1);
        assert!(state.needs_redraw);
        assert_ne!(state.view, state.initial_view);

        state.reset_view();
        assert_eq!(state.view, state.initial_view);
    }

    #[test]
    fn domain_switch_reloads_from_same_directory() {
        let dir = TempDir::new().unwrap();
        write_domain(dir.path(), ResultDomain::Spatial, 7.0);
        let mut state = state_in(dir.path());

        assert!(state.set_domain(ResultDomain::Spatial));
        assert_eq!(state.domain(), ResultDomain::Spatial);
        assert_eq!(state.surface.timings().get(3, 3), Some(7.0));
        assert!(state.needs_redraw);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn failed_reload_keeps_current_surface() {
        let dir = TempDir::new().unwrap();
        write_domain(dir.path(), ResultDomain::Spatial, 7.0);
        fs::remove_file(
            dir.path()
                .join(result_file_name(ResultDomain::Spatial.base_name(), 2048)),
        )
        .unwrap();
        let mut state = state_in(dir.path());
        let before = state.surface.clone();

        assert!(!state.set_domain(ResultDomain::Spatial));
        assert_eq!(state.surface, before);
        assert_eq!(state.domain(), ResultDomain::Frequency);
        assert!(!state.needs_redraw);
        let message = state.status_message.as_deref().unwrap();
        assert!(message.contains("2048"), "{message}");
    }

    #[test]
    fn failed_directory_change_keeps_directory() {
        let dir = TempDir::new().unwrap();
        let mut state = state_in(dir.path());

        assert!(!state.set_results_dir(dir.path().join("missing")));
        assert_eq!(state.results_dir, dir.path());
        assert!(state.status_message.is_some());
    }
}
