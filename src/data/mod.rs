/// Data layer: parameter axes, result loading, and the timing model.
///
/// Architecture:
/// ```text
///   axes::ParameterGrid          filter sizes 5..81, edge lengths 128..2048
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  "<base> - <edge>.txt" × 7 → TimingGrid (7 × 20)
///   └──────────┘
///        │
///        ▼
///   ┌────────────────────┐
///   │ PerformanceSurface │  axes as plot values + grid, meshgrid
///   └────────────────────┘
///        │
///        ▼
///      render
/// ```

pub mod axes;
pub mod loader;
pub mod model;
