//! Data model for animation sheets.

/// Sheet format revision.
///
/// Modern sheets carry a `version="2"` header; everything else is legacy.
/// When sheets are consolidated, the output is modern if any input is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SheetVersion {
    /// No version header (or `version="1"`).
    #[default]
    Legacy,
    /// `version="2"` header present.
    Modern,
}

impl SheetVersion {
    /// Returns the header value for serialization, if any.
    pub fn header_value(&self) -> Option<&'static str> {
        match self {
            SheetVersion::Legacy => None,
            SheetVersion::Modern => Some("2"),
        }
    }
}

/// A parsed animation sheet: format revision plus an ordered list of
/// animation states.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    /// Format revision.
    pub version: SheetVersion,
    /// Raster path from the `imagePath` header, preserved verbatim.
    pub image_path: Option<String>,
    /// Animations in file order.
    pub animations: Vec<Animation>,
}

/// One named animation state: an ordered sequence of timed frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    /// State name. Free-form; sheets consolidated in overlay mode are
    /// grouped on this exact string.
    pub state: String,
    /// Frames in playback order.
    pub frames: Vec<Frame>,
}

impl Animation {
    /// Create an empty animation for a state.
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            frames: Vec::new(),
        }
    }
}

/// One frame of an animation: a rectangle into the owning sheet's raster,
/// an anchor origin, flip flags, a duration string and attached points.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// X position of the rectangle in the raster.
    pub x: u32,
    /// Y position of the rectangle in the raster.
    pub y: u32,
    /// Rectangle width in pixels.
    pub w: u32,
    /// Rectangle height in pixels.
    pub h: u32,
    /// Anchor X, in the same coordinate space as `w` (may sit outside the
    /// rectangle).
    pub originx: i32,
    /// Anchor Y, in the same coordinate space as `h`.
    pub originy: i32,
    /// Mirror the frame across its own vertical midline when drawn.
    pub flipx: bool,
    /// Mirror the frame across its own horizontal midline when drawn.
    pub flipy: bool,
    /// Raw duration string, either decimal seconds or a `f`-suffixed frame
    /// count. See [`crate::duration::parse_duration`].
    pub duration: String,
    /// Labelled points attached to this frame. Opaque pass-through data.
    pub points: Vec<Point>,
}

impl Frame {
    /// Create a frame with the given rectangle and duration, origin at
    /// (0, 0), no flips and no points.
    pub fn new(x: u32, y: u32, w: u32, h: u32, duration: impl Into<String>) -> Self {
        Self {
            x,
            y,
            w,
            h,
            originx: 0,
            originy: 0,
            flipx: false,
            flipy: false,
            duration: duration.into(),
            points: Vec::new(),
        }
    }

    /// Set the anchor origin.
    pub fn with_origin(mut self, originx: i32, originy: i32) -> Self {
        self.originx = originx;
        self.originy = originy;
        self
    }

    /// Set the flip flags.
    pub fn with_flips(mut self, flipx: bool, flipy: bool) -> Self {
        self.flipx = flipx;
        self.flipy = flipy;
        self
    }
}

/// A labelled point attached to a frame (hit markers, attachment anchors).
/// Not interpreted by sheetstack, only carried through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Point {
    /// Point label.
    pub label: String,
    /// X coordinate, relative to the frame rectangle.
    pub x: i32,
    /// Y coordinate, relative to the frame rectangle.
    pub y: i32,
}
