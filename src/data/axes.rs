// ---------------------------------------------------------------------------
// Benchmark parameter axes
// ---------------------------------------------------------------------------

/// Number of filter sizes measured per image size.
pub const FILTER_SIZE_COUNT: usize = 20;

/// Edge lengths (pixels per side) of the square benchmark images.
pub const IMAGE_EDGE_LENGTHS: [u32; 7] = [128, 256, 512, 768, 1024, 1536, 2048];

/// Kernel size measured at position `index` of the filter axis: 5, 9, 13, ...
pub fn filter_size(index: usize) -> u32 {
    4 * index as u32 + 5
}

/// Number of pixels in a square image with the given edge length.
pub fn pixel_count(edge_length: u32) -> u64 {
    u64::from(edge_length) * u64::from(edge_length)
}

/// The two independent axes of the benchmark.
///
/// Rows of a timing grid follow `image_sizes`, columns follow `filter_sizes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterGrid {
    pub filter_sizes: Vec<u32>,
    /// Edge lengths, not pixel counts. See [`ParameterGrid::pixel_counts`].
    pub image_sizes: Vec<u32>,
}

impl Default for ParameterGrid {
    fn default() -> Self {
        Self {
            filter_sizes: (0..FILTER_SIZE_COUNT).map(filter_size).collect(),
            image_sizes: IMAGE_EDGE_LENGTHS.to_vec(),
        }
    }
}

impl ParameterGrid {
    /// Pixel count per image size; this is the plotted axis, not the edge length.
    pub fn pixel_counts(&self) -> Vec<u64> {
        self.image_sizes.iter().map(|&s| pixel_count(s)).collect()
    }

    /// Grid shape as (rows, columns) = (image sizes, filter sizes).
    pub fn shape(&self) -> (usize, usize) {
        (self.image_sizes.len(), self.filter_sizes.len())
    }
}
