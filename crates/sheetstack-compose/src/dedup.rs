//! Frame deduplication post-pass.
//!
//! Consolidation often produces pixel-identical frames (held last frames,
//! repeated idle cells). This pass hashes every output frame's pixel region,
//! keeps one copy of each distinct region, repacks the survivors into a
//! fresh raster, and rewrites every frame rectangle in place. It relies on
//! the compositor's guarantee that frame rectangles are tight: regions are
//! compared on exact bytes.

use std::collections::HashMap;

use sheetstack_sheet::Animation;

use crate::compose::PADDING;
use crate::pack::{PackBox, PackStrategy};
use crate::raster::Raster;

/// Deduplicate pixel-identical frame regions.
///
/// `animations` must reference `raster`; frame rectangles are rewritten to
/// point into the returned raster, which is never larger than the input.
/// Frames whose `(w, h)` and region bytes match share one packed slot.
pub fn dedup_sheet(
    raster: &Raster,
    animations: &mut [Animation],
    packer: &dyn PackStrategy,
) -> Raster {
    // Distinct regions in first-seen order; frames map onto them by index.
    let mut region_index: HashMap<(u32, u32, [u8; 32]), usize> = HashMap::new();
    let mut regions: Vec<(u32, u32, u32, u32)> = Vec::new();
    let mut frame_regions: Vec<usize> = Vec::new();

    for animation in animations.iter() {
        for frame in &animation.frames {
            let key = (frame.w, frame.h, region_hash(raster, frame.x, frame.y, frame.w, frame.h));
            let slot = *region_index.entry(key).or_insert_with(|| {
                regions.push((frame.x, frame.y, frame.w, frame.h));
                regions.len() - 1
            });
            frame_regions.push(slot);
        }
    }

    let boxes: Vec<PackBox> = regions
        .iter()
        .map(|&(_, _, w, h)| PackBox {
            width: w + 2 * PADDING,
            height: h + 2 * PADDING,
        })
        .collect();
    let layout = packer.pack(&boxes);

    let mut out = Raster::new(layout.width, layout.height);
    for (&(x, y, w, h), placement) in regions.iter().zip(&layout.placements) {
        out.copy_from(raster, x, y, w, h, placement.x + PADDING, placement.y + PADDING);
    }

    let mut next = 0;
    for animation in animations.iter_mut() {
        for frame in &mut animation.frames {
            let placement = layout.placements[frame_regions[next]];
            next += 1;
            frame.x = placement.x + PADDING;
            frame.y = placement.y + PADDING;
        }
    }

    out
}

fn region_hash(raster: &Raster, x: u32, y: u32, w: u32, h: u32) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    for row in 0..h {
        let start = (((y + row) as usize) * (raster.width as usize) + (x as usize)) * 4;
        hasher.update(&raster.data[start..start + (w as usize) * 4]);
    }
    *hasher.finalize().as_bytes()
}
