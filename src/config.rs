use std::path::PathBuf;

use clap::Parser;

use crate::data::model::ResultDomain;
use crate::render::ViewAngles;

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Plot convolution benchmark timings as a 3D surface over filter size and
/// number of pixels.
#[derive(Parser, Debug)]
#[command(name = "conv-surface")]
#[command(version)]
pub struct Args {
    /// Directory containing "<base> - <edge>.txt" result files
    #[arg(long, default_value = ".")]
    pub results_dir: PathBuf,

    /// Result family to plot: "spatial" or "frequency"
    #[arg(long, default_value_t = ResultDomain::Frequency)]
    pub domain: ResultDomain,

    /// Write the chart to this PNG file instead of opening a window
    #[arg(long, value_name = "PNG")]
    pub output: Option<PathBuf>,

    /// Chart width in pixels
    #[arg(long, default_value_t = 1024)]
    pub width: u32,

    /// Chart height in pixels
    #[arg(long, default_value_t = 768)]
    pub height: u32,

    /// Initial yaw in radians
    #[arg(long, default_value_t = 0.5, allow_negative_numbers = true)]
    pub yaw: f64,

    /// Initial pitch in radians
    #[arg(long, default_value_t = 0.3, allow_negative_numbers = true)]
    pub pitch: f64,
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub results_dir: PathBuf,
    pub domain: ResultDomain,
    /// `None` means interactive.
    pub output: Option<PathBuf>,
    pub size: (u32, u32),
    pub view: ViewAngles,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("."),
            domain: ResultDomain::default(),
            output: None,
            size: (1024, 768),
            view: ViewAngles::default(),
        }
    }
}

impl From<Args> for PlotConfig {
    fn from(args: Args) -> Self {
        Self {
            results_dir: args.results_dir,
            domain: args.domain,
            output: args.output,
            size: (args.width, args.height),
            view: ViewAngles {
                yaw: 0.0,
                pitch: 0.0,
            }
            .rotated(args.yaw, args.pitch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> PlotConfig {
        PlotConfig::from(Args::try_parse_from(argv).unwrap())
    }

    #[test]
    fn no_flags_is_default_config() {
        assert_eq!(parse(&["conv-surface"]), PlotConfig::default());
    }

    #[test]
    fn headless_spatial_run() {
        let config = parse(&[
            "conv-surface",
            "--results-dir",
            "bench/out",
            "--domain",
            "spatial",
            "--output",
            "plots/spatial.png",
            "--width",
            "800",
            "--height",
            "600",
            "--yaw",
            "-1.0",
        ]);
        assert_eq!(config.results_dir, PathBuf::from("bench/out"));
        assert_eq!(config.domain, ResultDomain::Spatial);
        assert_eq!(config.output, Some(PathBuf::from("plots/spatial.png")));
        assert_eq!(config.size, (800, 600));
        assert_eq!(config.view.yaw, -1.0);
    }

    #[test]
    fn unknown_domain_is_rejected() {
        assert!(Args::try_parse_from(["conv-surface", "--domain", "wavelet"]).is_err());
    }
}
