//! The `merge` and `overlay` commands.
//!
//! Both commands share one driver: pair and load the inputs, run the
//! requested composition mode, optionally dedup, then write the packed
//! image and the consolidated sheet next to each other.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use sheetstack_compose::{
    dedup_sheet, encode_rgba_with_hash, merge, overlay, GrowingPacker, PngConfig, Source,
};
use sheetstack_sheet::{serialize_sheet, Sheet, SheetVersion};

use crate::cli_args::ComposeArgs;
use crate::input::{load_sources, pair_inputs};
use crate::report::{InputReport, Report};

/// Which composition mode to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Concatenate and repack.
    Merge,
    /// Time-synchronize and composite per state.
    Overlay,
}

impl Mode {
    fn as_str(&self) -> &'static str {
        match self {
            Mode::Merge => "merge",
            Mode::Overlay => "overlay",
        }
    }
}

/// Run one composition command end to end.
pub fn run(mode: Mode, args: &ComposeArgs) -> Result<()> {
    let started = Instant::now();
    let chatty = !args.quiet && !args.json;

    let (pairs, ignored) = pair_inputs(&args.inputs);
    if chatty {
        for path in &ignored {
            eprintln!(
                "{} ignoring {} (not a .png or .animation file)",
                "warning:".yellow().bold(),
                path.display()
            );
        }
    }

    let mut loaded = load_sources(&pairs)?;
    if chatty {
        for source in loaded.iter().filter(|s| s.missing.is_some()) {
            eprintln!(
                "{} skipping \"{}\": no {} provided",
                "warning:".yellow().bold(),
                source.name,
                source.missing.unwrap_or_default()
            );
        }
    }

    let version = if loaded
        .iter()
        .any(|s| s.version == Some(SheetVersion::Modern))
    {
        SheetVersion::Modern
    } else {
        SheetVersion::Legacy
    };

    let sources: Vec<Source> = loaded
        .iter_mut()
        .map(|s| std::mem::take(&mut s.source))
        .collect();

    let packer = GrowingPacker;
    let composed = match mode {
        Mode::Merge => merge(&sources, &packer)?,
        Mode::Overlay => overlay(&sources, &packer)?,
    };

    let mut animations = composed.animations;
    let raster = if args.no_dedup {
        composed.raster
    } else {
        dedup_sheet(&composed.raster, &mut animations, &packer)
    };

    if raster.width == 0 || raster.height == 0 {
        bail!("nothing to pack: no input provided both an image and a sheet");
    }

    let (png_bytes, image_hash) = encode_rgba_with_hash(&raster, &PngConfig::default())?;
    fs::write(&args.output, &png_bytes)
        .with_context(|| format!("writing {}", args.output.display()))?;

    let sheet_path = sheet_path(args);
    let sheet = Sheet {
        version,
        image_path: args
            .output
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.to_string()),
        animations,
    };
    fs::write(&sheet_path, serialize_sheet(&sheet))
        .with_context(|| format!("writing {}", sheet_path.display()))?;

    let frames: usize = sheet.animations.iter().map(|a| a.frames.len()).sum();

    if args.json {
        let report = Report {
            ok: true,
            mode: mode.as_str(),
            inputs: loaded
                .iter()
                .map(|s| InputReport {
                    name: s.name.clone(),
                    used: s.missing.is_none(),
                    missing: s.missing,
                })
                .collect(),
            canvas_width: raster.width,
            canvas_height: raster.height,
            states: sheet.animations.len(),
            frames,
            dedup: !args.no_dedup,
            image: args.output.display().to_string(),
            sheet: sheet_path.display().to_string(),
            image_hash,
            duration_ms: started.elapsed().as_millis() as u64,
        };
        println!("{}", report.to_json_pretty()?);
    } else if !args.quiet {
        println!(
            "{} {} {} states, {} frames into {}x{} ({})",
            "ok:".green().bold(),
            mode.as_str(),
            sheet.animations.len(),
            frames,
            raster.width,
            raster.height,
            args.output.display()
        );
    }

    Ok(())
}

fn sheet_path(args: &ComposeArgs) -> PathBuf {
    args.sheet
        .clone()
        .unwrap_or_else(|| args.output.with_extension("animation"))
}
