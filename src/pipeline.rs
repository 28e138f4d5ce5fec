use anyhow::{Context, Result};

use crate::config::PlotConfig;
use crate::data::axes::ParameterGrid;
use crate::data::loader::load_surface;
use crate::render::{PngRenderer, SurfaceRenderer, WindowRenderer};

// ---------------------------------------------------------------------------
// Axes → loader → renderer
// ---------------------------------------------------------------------------

/// PNG when an output path is configured, otherwise an interactive window.
pub fn renderer_for(config: &PlotConfig) -> Box<dyn SurfaceRenderer> {
    match &config.output {
        Some(path) => Box::new(PngRenderer::new(path.clone(), config.size, config.view)),
        None => Box::new(WindowRenderer::new(
            config.results_dir.clone(),
            config.size,
            config.view,
        )),
    }
}

/// Load every result file, then render once. Any load failure returns before
/// the renderer is touched.
pub fn run(config: &PlotConfig, renderer: &mut dyn SurfaceRenderer) -> Result<()> {
    let axes = ParameterGrid::default();
    let surface = load_surface(&config.results_dir, &axes, config.domain).with_context(|| {
        format!(
            "loading {} domain results from {}",
            config.domain,
            config.results_dir.display()
        )
    })?;

    renderer
        .render(&surface)
        .context("rendering timing surface")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;
    use crate::data::axes::IMAGE_EDGE_LENGTHS;
    use crate::data::loader::{result_file_name, LoadError, LoadErrorKind};
    use crate::data::model::{PerformanceSurface, ResultDomain};
    use crate::render::RenderResult;

    /// Keeps every surface it is asked to render.
    #[derive(Default)]
    struct RecordingRenderer {
        rendered: Vec<PerformanceSurface>,
    }

    impl SurfaceRenderer for RecordingRenderer {
        fn render(&mut self, surface: &PerformanceSurface) -> RenderResult {
            self.rendered.push(surface.clone());
            Ok(())
        }
    }

    fn write_ramp_files(dir: &Path, domain: ResultDomain) {
        let contents: String = (1..=20).map(|v| format!("{v}.0\n")).collect();
        for &edge in &IMAGE_EDGE_LENGTHS {
            fs::write(
                dir.join(result_file_name(domain.base_name(), edge)),
                &contents,
            )
            .unwrap();
        }
    }

    fn config_for(dir: &Path) -> PlotConfig {
        PlotConfig {
            results_dir: dir.to_path_buf(),
            ..PlotConfig::default()
        }
    }

    #[test]
    fn end_to_end_ramp() {
        let dir = TempDir::new().unwrap();
        write_ramp_files(dir.path(), ResultDomain::Frequency);
        let mut renderer = RecordingRenderer::default();

        run(&config_for(dir.path()), &mut renderer).unwrap();

        assert_eq!(renderer.rendered.len(), 1);
        let surface = &renderer.rendered[0];
        assert_eq!(surface.timings().shape(), (7, 20));
        let (pixels, row) = surface.row_for_edge(512).unwrap();
        assert_eq!(pixels, 262_144.0);
        let expected: Vec<f64> = (1..=20).map(f64::from).collect();
        assert_eq!(row.to_vec(), expected);
    }

    #[test]
    fn missing_file_aborts_before_render() {
        let dir = TempDir::new().unwrap();
        write_ramp_files(dir.path(), ResultDomain::Frequency);
        fs::remove_file(
            dir.path()
                .join(result_file_name(ResultDomain::Frequency.base_name(), 128)),
        )
        .unwrap();
        let mut renderer = RecordingRenderer::default();

        let err = run(&config_for(dir.path()), &mut renderer).unwrap_err();

        assert!(renderer.rendered.is_empty());
        let load_err = err.downcast_ref::<LoadError>().unwrap();
        assert_eq!(load_err.kind(), LoadErrorKind::FileNotFound);
    }

    #[test]
    fn configured_domain_is_loaded() {
        let dir = TempDir::new().unwrap();
        write_ramp_files(dir.path(), ResultDomain::Spatial);
        let config = PlotConfig {
            domain: ResultDomain::Spatial,
            ..config_for(dir.path())
        };
        let mut renderer = RecordingRenderer::default();

        run(&config, &mut renderer).unwrap();
        assert_eq!(renderer.rendered[0].domain(), ResultDomain::Spatial);
    }
}
