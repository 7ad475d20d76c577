//! Machine-readable run report for `--json`.

use serde::Serialize;

/// Report printed to stdout when `--json` is passed.
#[derive(Debug, Serialize)]
pub struct Report {
    /// Whether the run completed.
    pub ok: bool,
    /// `"merge"` or `"overlay"`.
    pub mode: &'static str,
    /// One entry per input stem.
    pub inputs: Vec<InputReport>,
    /// Packed canvas width (after dedup, when enabled).
    pub canvas_width: u32,
    /// Packed canvas height.
    pub canvas_height: u32,
    /// Number of output animation states.
    pub states: usize,
    /// Number of output frames.
    pub frames: usize,
    /// Whether the dedup pass ran.
    pub dedup: bool,
    /// Output image path.
    pub image: String,
    /// Output sheet path.
    pub sheet: String,
    /// BLAKE3 hash of the encoded output image.
    pub image_hash: String,
    /// Wall-clock run time in milliseconds.
    pub duration_ms: u64,
}

impl Report {
    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Per-input entry of the report.
#[derive(Debug, Serialize)]
pub struct InputReport {
    /// Input stem.
    pub name: String,
    /// Whether the source contributed to the output.
    pub used: bool,
    /// Which half was missing, for skipped sources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<&'static str>,
}
