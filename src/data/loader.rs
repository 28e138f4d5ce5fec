use std::io;
use std::num::ParseFloatError;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::axes::ParameterGrid;
use super::model::{GridError, PerformanceSurface, ResultDomain, TimingGrid};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure while loading a result set. All variants abort the load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("result file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("reading {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: expected {expected} timings, found {found}", path.display())]
    ShapeMismatch {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("{}: token {index} '{token}' is not a number", path.display())]
    Parse {
        path: PathBuf,
        index: usize,
        token: String,
        #[source]
        source: ParseFloatError,
    },
}

/// Coarse classification of a [`LoadError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    FileNotFound,
    Io,
    ShapeMismatch,
    Parse,
}

impl LoadError {
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            LoadError::FileNotFound { .. } => LoadErrorKind::FileNotFound,
            LoadError::Io { .. } => LoadErrorKind::Io,
            LoadError::ShapeMismatch { .. } => LoadErrorKind::ShapeMismatch,
            LoadError::Parse { .. } => LoadErrorKind::Parse,
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// `"<base> - <edge>.txt"`, keyed by edge length rather than pixel count.
pub fn result_file_name(base_name: &str, edge_length: u32) -> String {
    format!("{base_name} - {edge_length}.txt")
}

/// Load one timing vector per image size and stack them into a grid.
///
/// Rows follow `axes.image_sizes` in order. The first missing, malformed or
/// short file aborts the whole load; no partial grid is returned.
pub fn load_result_grid(
    dir: &Path,
    axes: &ParameterGrid,
    base_name: &str,
) -> Result<TimingGrid, LoadError> {
    let expected = axes.filter_sizes.len();
    let mut rows = Vec::with_capacity(axes.image_sizes.len());

    for &edge in &axes.image_sizes {
        let path = dir.join(result_file_name(base_name, edge));
        rows.push(load_timing_vector(&path, expected)?);
    }

    let grid = TimingGrid::from_rows(&rows, expected).map_err(|e| match e {
        GridError::RowLength { row, expected, found } => LoadError::ShapeMismatch {
            path: dir.join(result_file_name(base_name, axes.image_sizes[row])),
            expected,
            found,
        },
        GridError::ShapeMismatch { expected, found } => LoadError::ShapeMismatch {
            path: dir.to_path_buf(),
            expected: expected.1,
            found: found.1,
        },
    })?;

    let (_, max) = grid.range();
    log::info!(
        "Assembled {:?} timing grid for '{base_name}' (max {max})",
        grid.shape()
    );
    Ok(grid)
}

/// Load the result family for `domain` and align it with `axes`.
pub fn load_surface(
    dir: &Path,
    axes: &ParameterGrid,
    domain: ResultDomain,
) -> Result<PerformanceSurface, LoadError> {
    log::info!("Loading {domain} domain results from {}", dir.display());
    let grid = load_result_grid(dir, axes, domain.base_name())?;
    PerformanceSurface::new(domain, axes, grid).map_err(|e| {
        let (expected, found) = match e {
            GridError::ShapeMismatch { expected, found } => (expected.0, found.0),
            GridError::RowLength { expected, found, .. } => (expected, found),
        };
        LoadError::ShapeMismatch {
            path: dir.to_path_buf(),
            expected,
            found,
        }
    })
}

/// Read one result file. The file is closed before this returns.
pub fn load_timing_vector(path: &Path, expected: usize) -> Result<Vec<f64>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            LoadError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let values = parse_timing_vector(&text, expected, path)?;
    log::debug!("Read {} timings from {}", values.len(), path.display());
    Ok(values)
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Whitespace-separated floats, exactly `expected` of them.
///
/// Tokens are parsed before the count is checked, so a file that is both
/// short and malformed reports the parse error.
pub fn parse_timing_vector(
    text: &str,
    expected: usize,
    path: &Path,
) -> Result<Vec<f64>, LoadError> {
    let values = text
        .split_whitespace()
        .enumerate()
        .map(|(index, tok)| {
            tok.parse::<f64>().map_err(|source| LoadError::Parse {
                path: path.to_path_buf(),
                index,
                token: tok.to_string(),
                source,
            })
        })
        .collect::<Result<Vec<f64>, _>>()?;

    if values.len() != expected {
        return Err(LoadError::ShapeMismatch {
            path: path.to_path_buf(),
            expected,
            found: values.len(),
        });
    }

    if let Some((index, v)) = values
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite() || **v < 0.0)
    {
        log::warn!(
            "{}: timing {index} is {v}, expected a non-negative number",
            path.display()
        );
    }

    Ok(values)
}
