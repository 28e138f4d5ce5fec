use std::path::PathBuf;

use image::{ImageFormat, RgbImage};

use super::chart::render_rgb;
use super::{RenderError, RenderResult, SurfaceRenderer, ViewAngles};
use crate::data::model::PerformanceSurface;

// ---------------------------------------------------------------------------
// Headless renderer: write the chart to a PNG file
// ---------------------------------------------------------------------------

pub struct PngRenderer {
    path: PathBuf,
    size: (u32, u32),
    view: ViewAngles,
}

impl PngRenderer {
    pub fn new(path: PathBuf, size: (u32, u32), view: ViewAngles) -> Self {
        Self { path, size, view }
    }
}

impl SurfaceRenderer for PngRenderer {
    fn render(&mut self, surface: &PerformanceSurface) -> RenderResult {
        let (width, height) = self.size;
        let buffer = render_rgb(surface, self.view, self.size)?;
        let image = RgbImage::from_raw(width, height, buffer)
            .ok_or(RenderError::InvalidSize { width, height })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| RenderError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        image.save_with_format(&self.path, ImageFormat::Png)?;

        log::info!(
            "Wrote {width}x{height} {} domain surface to {}",
            surface.domain(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use image::GenericImageView;
    use tempfile::TempDir;

    use super::*;
    use crate::data::axes::ParameterGrid;
    use crate::data::model::{ResultDomain, TimingGrid};

    fn flat_surface() -> PerformanceSurface {
        let axes = ParameterGrid::default();
        let rows = vec![(1..=20).map(f64::from).collect::<Vec<_>>(); 7];
        let grid = TimingGrid::from_rows(&rows, 20).unwrap();
        PerformanceSurface::new(ResultDomain::Frequency, &axes, grid).unwrap()
    }

    #[test]
    fn invalid_size_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("surface.png");
        let mut renderer = PngRenderer::new(path.clone(), (0, 0), ViewAngles::default());

        assert!(renderer.render(&flat_surface()).is_err());
        assert!(!path.exists());
    }

    // Needs a system sans-serif font for the axis labels.
    #[test]
    #[ignore]
    fn writes_decodable_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plots").join("surface.png");
        let mut renderer = PngRenderer::new(path.clone(), (400, 300), ViewAngles::default());

        renderer.render(&flat_surface()).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.dimensions(), (400, 300));
    }
}
