//! Writer for the sheet text format.

use std::fmt::Write;

use crate::model::{Frame, Sheet};

/// Serialize a sheet back to its text form.
///
/// Emits headers, then one block per animation. Optional frame attributes
/// are only written when they differ from their defaults, so legacy sheets
/// round-trip without gaining noise.
pub fn serialize_sheet(sheet: &Sheet) -> String {
    let mut out = String::new();

    if let Some(version) = sheet.version.header_value() {
        let _ = writeln!(out, "version=\"{version}\"");
    }
    if let Some(path) = &sheet.image_path {
        let _ = writeln!(out, "imagePath=\"{path}\"");
    }
    if !out.is_empty() {
        out.push('\n');
    }

    for animation in &sheet.animations {
        let _ = writeln!(out, "animation state=\"{}\"", animation.state);

        for frame in &animation.frames {
            write_frame(&mut out, frame);
        }

        out.push('\n');
    }

    out
}

fn write_frame(out: &mut String, frame: &Frame) {
    let _ = write!(
        out,
        "frame duration=\"{}\" x=\"{}\" y=\"{}\" w=\"{}\" h=\"{}\"",
        frame.duration, frame.x, frame.y, frame.w, frame.h
    );
    if frame.originx != 0 || frame.originy != 0 {
        let _ = write!(out, " originx=\"{}\" originy=\"{}\"", frame.originx, frame.originy);
    }
    if frame.flipx {
        let _ = write!(out, " flipx=\"1\"");
    }
    if frame.flipy {
        let _ = write!(out, " flipy=\"1\"");
    }
    out.push('\n');

    for point in &frame.points {
        let _ = writeln!(
            out,
            "point label=\"{}\" x=\"{}\" y=\"{}\"",
            point.label, point.x, point.y
        );
    }
}
