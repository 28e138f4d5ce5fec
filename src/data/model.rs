use std::fmt;
use std::str::FromStr;

use ndarray::{Array2, ArrayView1};
use thiserror::Error;

use super::axes::ParameterGrid;

// ---------------------------------------------------------------------------
// ResultDomain – which family of result files is plotted
// ---------------------------------------------------------------------------

/// The convolution strategy whose timings a result file family records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultDomain {
    Spatial,
    #[default]
    Frequency,
}

impl ResultDomain {
    pub const ALL: [ResultDomain; 2] = [ResultDomain::Spatial, ResultDomain::Frequency];

    /// Fixed file base name the benchmark uses for this family.
    pub fn base_name(self) -> &'static str {
        match self {
            ResultDomain::Spatial => "convolutionSpatialDomain",
            ResultDomain::Frequency => "convolutionFrequencyDomain",
        }
    }
}

impl fmt::Display for ResultDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultDomain::Spatial => write!(f, "spatial"),
            ResultDomain::Frequency => write!(f, "frequency"),
        }
    }
}

impl FromStr for ResultDomain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spatial" => Ok(ResultDomain::Spatial),
            "frequency" => Ok(ResultDomain::Frequency),
            other => Err(format!(
                "unknown domain '{other}' (expected 'spatial' or 'frequency')"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// GridError – shape violations while building or aligning a grid
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A row handed to [`TimingGrid::from_rows`] has the wrong length.
    #[error("row {row} has {found} values, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// The grid does not line up with the parameter axes.
    #[error("grid shape {found:?} does not match axes shape {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
}

// ---------------------------------------------------------------------------
// TimingGrid – dense (image size × filter size) timings
// ---------------------------------------------------------------------------

/// Cell (i, j) holds the timing for image size i and filter size j.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingGrid {
    values: Array2<f64>,
}

impl TimingGrid {
    /// Stack equally long rows, in the given order, into a grid.
    pub fn from_rows(rows: &[Vec<f64>], columns: usize) -> Result<Self, GridError> {
        let mut flat = Vec::with_capacity(rows.len() * columns);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != columns {
                return Err(GridError::RowLength {
                    row,
                    expected: columns,
                    found: values.len(),
                });
            }
            flat.extend_from_slice(values);
        }
        let values = Array2::from_shape_vec((rows.len(), columns), flat).map_err(|_| {
            GridError::ShapeMismatch {
                expected: (rows.len(), columns),
                found: (rows.len(), 0),
            }
        })?;
        Ok(Self { values })
    }

    /// (rows, columns).
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    pub fn row(&self, index: usize) -> ArrayView1<'_, f64> {
        self.values.row(index)
    }

    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.values.get((row, column)).copied()
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Smallest and largest finite timing, or `(0.0, 0.0)` if there are none.
    pub fn range(&self) -> (f64, f64) {
        let (min, max) = self
            .values
            .iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if min > max {
            (0.0, 0.0)
        } else {
            (min, max)
        }
    }
}

// ---------------------------------------------------------------------------
// PerformanceSurface – grid plus the axis values it is plotted against
// ---------------------------------------------------------------------------

/// A timing grid aligned with its plot axes.
///
/// The X axis is the filter size and the Y axis is the number of pixels
/// (edge length squared). Construction checks that the grid shape matches
/// the axes, so every accessor can index without further checks.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceSurface {
    domain: ResultDomain,
    filter_sizes: Vec<f64>,
    pixel_counts: Vec<f64>,
    edge_lengths: Vec<u32>,
    timings: TimingGrid,
}

impl PerformanceSurface {
    pub fn new(
        domain: ResultDomain,
        axes: &ParameterGrid,
        timings: TimingGrid,
    ) -> Result<Self, GridError> {
        if timings.shape() != axes.shape() {
            return Err(GridError::ShapeMismatch {
                expected: axes.shape(),
                found: timings.shape(),
            });
        }
        Ok(Self {
            domain,
            filter_sizes: axes.filter_sizes.iter().map(|&f| f64::from(f)).collect(),
            pixel_counts: axes.pixel_counts().iter().map(|&p| p as f64).collect(),
            edge_lengths: axes.image_sizes.clone(),
            timings,
        })
    }

    pub fn domain(&self) -> ResultDomain {
        self.domain
    }

    pub fn filter_sizes(&self) -> &[f64] {
        &self.filter_sizes
    }

    pub fn pixel_counts(&self) -> &[f64] {
        &self.pixel_counts
    }

    pub fn edge_lengths(&self) -> &[u32] {
        &self.edge_lengths
    }

    pub fn timings(&self) -> &TimingGrid {
        &self.timings
    }

    /// `(X, Y)` coordinate matrices shaped (image sizes, filter sizes):
    /// `X[i, j]` is filter size j, `Y[i, j]` is the pixel count of image i.
    pub fn meshgrid(&self) -> (Array2<f64>, Array2<f64>) {
        let shape = (self.pixel_counts.len(), self.filter_sizes.len());
        let x = Array2::from_shape_fn(shape, |(_, j)| self.filter_sizes[j]);
        let y = Array2::from_shape_fn(shape, |(i, _)| self.pixel_counts[i]);
        (x, y)
    }

    /// Fails if the meshgrid built from the axes does not match the grid.
    pub fn check_alignment(&self) -> Result<(), GridError> {
        let (x, _) = self.meshgrid();
        if x.dim() != self.timings.shape() {
            return Err(GridError::ShapeMismatch {
                expected: x.dim(),
                found: self.timings.shape(),
            });
        }
        Ok(())
    }

    /// Pixel count and timing row for the image with the given edge length.
    pub fn row_for_edge(&self, edge_length: u32) -> Option<(f64, ArrayView1<'_, f64>)> {
        let i = self.edge_lengths.iter().position(|&e| e == edge_length)?;
        Some((self.pixel_counts[i], self.timings.row(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_rows(rows: usize, columns: usize) -> Vec<Vec<f64>> {
        (0..rows)
            .map(|i| (0..columns).map(|j| (i * columns + j) as f64).collect())
            .collect()
    }

    #[test]
    fn domain_base_names() {
        assert_eq!(ResultDomain::Spatial.base_name(), "convolutionSpatialDomain");
        assert_eq!(
            ResultDomain::Frequency.base_name(),
            "convolutionFrequencyDomain"
        );
        assert_eq!(ResultDomain::default(), ResultDomain::Frequency);
    }

    #[test]
    fn domain_parses_case_insensitively() {
        assert_eq!("Spatial".parse::<ResultDomain>(), Ok(ResultDomain::Spatial));
        assert_eq!(
            "frequency".parse::<ResultDomain>(),
            Ok(ResultDomain::Frequency)
        );
        assert!("wavelet".parse::<ResultDomain>().is_err());
    }

    #[test]
    fn rows_are_stacked_in_order() {
        let grid = TimingGrid::from_rows(&ramp_rows(7, 20), 20).unwrap();
        assert_eq!(grid.shape(), (7, 20));
        assert_eq!(grid.get(0, 0), Some(0.0));
        assert_eq!(grid.get(2, 3), Some(43.0));
        assert_eq!(grid.get(7, 0), None);
        assert_eq!(grid.range(), (0.0, 139.0));
    }

    #[test]
    fn short_row_is_rejected() {
        let mut rows = ramp_rows(7, 20);
        rows[4].pop();
        let err = TimingGrid::from_rows(&rows, 20).unwrap_err();
        assert_eq!(
            err,
            GridError::RowLength {
                row: 4,
                expected: 20,
                found: 19
            }
        );
    }

    #[test]
    fn range_ignores_non_finite_values() {
        let rows = vec![vec![f64::NAN, 2.0], vec![0.5, f64::INFINITY]];
        let grid = TimingGrid::from_rows(&rows, 2).unwrap();
        assert_eq!(grid.range(), (0.5, 2.0));

        let empty = TimingGrid::from_rows(&[vec![f64::NAN]], 1).unwrap();
        assert_eq!(empty.range(), (0.0, 0.0));
    }

    #[test]
    fn surface_requires_matching_shape() {
        let axes = ParameterGrid::default();
        let grid = TimingGrid::from_rows(&ramp_rows(6, 20), 20).unwrap();
        let err = PerformanceSurface::new(ResultDomain::Frequency, &axes, grid).unwrap_err();
        assert_eq!(
            err,
            GridError::ShapeMismatch {
                expected: (7, 20),
                found: (6, 20)
            }
        );
    }

    #[test]
    fn meshgrid_matches_grid_and_axes() {
        let axes = ParameterGrid::default();
        let grid = TimingGrid::from_rows(&ramp_rows(7, 20), 20).unwrap();
        let surface = PerformanceSurface::new(ResultDomain::Spatial, &axes, grid).unwrap();

        let (x, y) = surface.meshgrid();
        assert_eq!(x.dim(), (7, 20));
        assert_eq!(y.dim(), (7, 20));
        assert_eq!(x[[3, 0]], 5.0);
        assert_eq!(x[[3, 19]], 81.0);
        assert_eq!(y[[0, 7]], 16_384.0);
        assert_eq!(y[[6, 7]], 4_194_304.0);
    }

    #[test]
    fn alignment_compares_axes_with_grid() {
        let axes = ParameterGrid::default();
        let grid = TimingGrid::from_rows(&ramp_rows(7, 20), 20).unwrap();
        let surface = PerformanceSurface::new(ResultDomain::Frequency, &axes, grid).unwrap();
        assert_eq!(surface.check_alignment(), Ok(()));

        let misaligned = PerformanceSurface {
            timings: TimingGrid::from_rows(&ramp_rows(7, 19), 19).unwrap(),
            ..surface
        };
        assert_eq!(misaligned.meshgrid().0.dim(), (7, 20));
        assert_eq!(
            misaligned.check_alignment(),
            Err(GridError::ShapeMismatch {
                expected: (7, 20),
                found: (7, 19)
            })
        );
    }

    #[test]
    fn row_lookup_by_edge_length() {
        let axes = ParameterGrid::default();
        let grid = TimingGrid::from_rows(&ramp_rows(7, 20), 20).unwrap();
        let surface = PerformanceSurface::new(ResultDomain::Frequency, &axes, grid).unwrap();

        let (pixels, row) = surface.row_for_edge(512).unwrap();
        assert_eq!(pixels, 262_144.0);
        assert_eq!(row[0], 40.0);
        assert!(surface.row_for_edge(300).is_none());
    }
}
