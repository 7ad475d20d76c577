//! Sheetstack animation sheet library.
//!
//! This crate provides the data model for sprite animation sheets (a sheet
//! is a set of named animation states, each an ordered list of timed frames
//! cut from one raster image), duration normalization, and the line-oriented
//! text format the sheets are stored in.
//!
//! # Overview
//!
//! A sheet file looks like:
//!
//! ```text
//! version="2"
//! imagePath="hero.png"
//!
//! animation state="IDLE"
//! frame duration="0.05" x="0" y="0" w="60" h="60" originx="30" originy="60"
//! frame duration="30f" x="60" y="0" w="60" h="60" originx="30" originy="60"
//! point label="HILT" x="12" y="40"
//! ```
//!
//! Frame durations are opaque strings until normalized: either decimal
//! seconds (`"0.05"`) or a frame count at 60 ticks per second (`"30f"`).
//!
//! # Modules
//!
//! - [`model`]: Sheet, Animation, Frame and Point types
//! - [`duration`]: duration string normalization
//! - [`parse`]: text format parser
//! - [`serialize`]: text format writer
//! - [`error`]: error types

pub mod duration;
pub mod error;
pub mod model;
pub mod parse;
pub mod serialize;

pub use duration::{format_duration, parse_duration};
pub use error::SheetError;
pub use model::{Animation, Frame, Point, Sheet, SheetVersion};
pub use parse::parse_sheet;
pub use serialize::serialize_sheet;
