//! Write a synthetic set of benchmark result files.
//!
//! Produces "<base> - <edge>.txt" for both result families and every image
//! edge length, 20 timings each, so the viewer can be tried without running
//! the convolution benchmark.
//!
//! Usage:
//! ```
//! cargo run --bin generate_sample -- --out-dir sample_results
//! cargo run -- --results-dir sample_results
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

const EDGE_LENGTHS: [u32; 7] = [128, 256, 512, 768, 1024, 1536, 2048];
const FILTER_SIZES: usize = 20;

#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
#[command(about = "Write synthetic convolution timing files")]
struct Args {
    /// Directory to write the result files into
    #[arg(long, default_value = "sample_results")]
    out_dir: PathBuf,

    /// Seed for the timing jitter
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// SplitMix64; enough for reproducible jitter.
struct Jitter(u64);

impl Jitter {
    fn next_unit(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Multiplicative factor in [1 - amount, 1 + amount].
    fn factor(&mut self, amount: f64) -> f64 {
        1.0 + amount * (2.0 * self.next_unit() - 1.0)
    }
}

/// Direct convolution: one multiply-add per pixel per kernel element.
fn spatial_seconds(pixels: f64, filter: f64) -> f64 {
    2.0e-9 * pixels * filter * filter
}

/// FFT convolution: dominated by the transforms, nearly independent of the
/// kernel size.
fn frequency_seconds(pixels: f64, filter: f64) -> f64 {
    3.0e-8 * pixels * pixels.log2() + 1.0e-6 * filter
}

fn timings(edge: u32, model: fn(f64, f64) -> f64, jitter: &mut Jitter) -> String {
    let pixels = f64::from(edge) * f64::from(edge);
    let mut out = String::new();
    for i in 0..FILTER_SIZES {
        let filter = (4 * i + 5) as f64;
        let seconds = model(pixels, filter) * jitter.factor(0.05);
        out.push_str(&format!("{seconds:.6e}\n"));
    }
    out
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let families: [(&str, fn(f64, f64) -> f64); 2] = [
        ("convolutionSpatialDomain", spatial_seconds),
        ("convolutionFrequencyDomain", frequency_seconds),
    ];

    let mut jitter = Jitter(args.seed);
    let mut written = 0;
    for (base, model) in families {
        for edge in EDGE_LENGTHS {
            let path = args.out_dir.join(format!("{base} - {edge}.txt"));
            std::fs::write(&path, timings(edge, model, &mut jitter))
                .with_context(|| format!("writing {}", path.display()))?;
            log::debug!("Wrote {}", path.display());
            written += 1;
        }
    }

    println!(
        "Wrote {written} result files ({FILTER_SIZES} timings each) to {}",
        args.out_dir.display()
    );
    Ok(())
}
