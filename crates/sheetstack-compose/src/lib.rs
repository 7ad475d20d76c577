//! Sheetstack composition core.
//!
//! Consolidates multiple sprite animation sheets into a single packed sheet.
//! Two modes are provided:
//!
//! - [`merge`]: concatenate every animation from every source and repack the
//!   frames into one raster. Timing is untouched.
//! - [`overlay`]: animations sharing a state name across sources are
//!   time-synchronized (their timelines subdivided into a common refinement)
//!   and composited layer-on-layer, producing one merged timeline per state.
//!
//! The pipeline is: timeline subdivision ([`timeline`]) → origin/bounding
//! resolution → rectangle packing ([`pack`], an injected strategy) →
//! compositing onto a fresh [`raster::Raster`]. A post-pass ([`dedup`])
//! consolidates pixel-identical output frames into shared regions and
//! shrinks the raster.
//!
//! Everything is single-threaded and run-to-completion; one call per mode
//! invocation, one terminal error per run.

pub mod compose;
pub mod dedup;
pub mod error;
pub mod pack;
pub mod png;
pub mod raster;
pub mod timeline;

pub use compose::{merge, overlay, Composed, Source, PADDING};
pub use dedup::dedup_sheet;
pub use error::ComposeError;
pub use pack::{GrowingPacker, PackBox, PackStrategy, PackedLayout, Placement};
pub use self::png::{decode_rgba, encode_rgba_with_hash, PngConfig, PngError};
pub use raster::Raster;
