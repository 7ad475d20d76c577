//! Input file discovery and loading.
//!
//! Sources are assembled by file stem: `hero.png` plus `hero.animation` (or
//! `hero.anim`) form one source, in first-seen order. A stem with only one
//! half is kept but marked incomplete; the compositor excludes it silently,
//! and the CLI surfaces the skip as a warning and in the report.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use sheetstack_compose::{decode_rgba, Source};
use sheetstack_sheet::{parse_sheet, SheetVersion};

/// Recognized image extensions.
pub const IMAGE_EXTENSIONS: &[&str] = &["png"];

/// Recognized sheet extensions.
pub const SHEET_EXTENSIONS: &[&str] = &["animation", "anim"];

/// The files contributing to one source, paired by stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    /// File stem shared by the pair.
    pub name: String,
    /// Path of the image half, if seen.
    pub image: Option<PathBuf>,
    /// Path of the sheet half, if seen.
    pub sheet: Option<PathBuf>,
}

/// Group input paths into per-stem pairs, in first-seen order.
///
/// Returns the pairs plus any paths with unrecognized extensions (which are
/// ignored, matching the original tool's drag-and-drop intake).
pub fn pair_inputs(paths: &[PathBuf]) -> (Vec<SourcePaths>, Vec<PathBuf>) {
    let mut pairs: Vec<SourcePaths> = Vec::new();
    let mut ignored = Vec::new();

    for path in paths {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let is_image = ext.as_deref().is_some_and(|e| IMAGE_EXTENSIONS.contains(&e));
        let is_sheet = ext.as_deref().is_some_and(|e| SHEET_EXTENSIONS.contains(&e));

        if !is_image && !is_sheet {
            ignored.push(path.clone());
            continue;
        }

        let name = stem_of(path);
        let slot = match pairs.iter().position(|p| p.name == name) {
            Some(found) => found,
            None => {
                pairs.push(SourcePaths {
                    name,
                    image: None,
                    sheet: None,
                });
                pairs.len() - 1
            }
        };
        let entry = &mut pairs[slot];

        if is_image {
            entry.image = Some(path.clone());
        } else {
            entry.sheet = Some(path.clone());
        }
    }

    (pairs, ignored)
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

/// One loaded source plus the metadata the report needs.
#[derive(Debug)]
pub struct LoadedSource {
    /// Stem name.
    pub name: String,
    /// Version of the sheet half, if present.
    pub version: Option<SheetVersion>,
    /// Which half is missing, if any.
    pub missing: Option<&'static str>,
    /// The source handed to the compositor.
    pub source: Source,
}

/// Read and decode every paired source. Unreadable or malformed files are
/// fatal; missing halves are not.
pub fn load_sources(pairs: &[SourcePaths]) -> Result<Vec<LoadedSource>> {
    let mut loaded = Vec::with_capacity(pairs.len());

    for pair in pairs {
        let image = match &pair.image {
            Some(path) => {
                let bytes =
                    fs::read(path).with_context(|| format!("reading {}", path.display()))?;
                Some(
                    decode_rgba(&bytes)
                        .with_context(|| format!("decoding {}", path.display()))?,
                )
            }
            None => None,
        };

        let mut version = None;
        let animations = match &pair.sheet {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                let sheet = parse_sheet(&text)
                    .with_context(|| format!("parsing {}", path.display()))?;
                version = Some(sheet.version);
                Some(sheet.animations)
            }
            None => None,
        };

        let missing = match (&image, &animations) {
            (None, Some(_)) => Some("image"),
            (Some(_), None) => Some("sheet"),
            _ => None,
        };

        loaded.push(LoadedSource {
            name: pair.name.clone(),
            version,
            missing,
            source: Source { image, animations },
        });
    }

    Ok(loaded)
}
