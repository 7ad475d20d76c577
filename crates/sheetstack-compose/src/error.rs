//! Error types for the composition pipeline.

use thiserror::Error;

/// Errors that can occur during a merge or overlay run.
///
/// A run either completes fully or fails with one of these; there is no
/// partial output.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// A frame duration did not normalize to a finite number of seconds.
    /// Rejected before the frame enters timeline subdivision.
    #[error(
        "state \"{state}\": frame {index} has unparseable duration \"{value}\""
    )]
    InvalidDuration {
        /// State name the frame belongs to.
        state: String,
        /// Zero-based frame index within the animation.
        index: usize,
        /// The raw duration string.
        value: String,
    },

    /// A frame rectangle reaches outside its source raster.
    #[error(
        "state \"{state}\": frame rect {x},{y} {w}x{h} from source {source_index} \
         exceeds its {raster_w}x{raster_h} raster"
    )]
    FrameOutOfBounds {
        /// State name the frame belongs to.
        state: String,
        /// Index of the owning source.
        source_index: usize,
        /// Frame rectangle.
        x: u32,
        /// Frame rectangle.
        y: u32,
        /// Frame rectangle.
        w: u32,
        /// Frame rectangle.
        h: u32,
        /// Source raster width.
        raster_w: u32,
        /// Source raster height.
        raster_h: u32,
    },

    /// PNG decode/encode failure.
    #[error("PNG error: {0}")]
    Png(#[from] crate::png::PngError),
}
