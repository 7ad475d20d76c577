//! Merge and overlay mode drivers.
//!
//! Both modes share the same shape: gather frames, pack padded boxes with
//! the injected [`PackStrategy`], composite onto a fresh raster, and return
//! the rewritten animation list together with that raster. Neither mode
//! mutates caller-owned data; animations are cloned before their frame
//! positions are rewritten.

use sheetstack_sheet::{format_duration, Animation, Frame};

use crate::error::ComposeError;
use crate::pack::{PackBox, PackStrategy};
use crate::raster::Raster;
use crate::timeline::Timeline;

/// Padding applied around every packed item (1 unit on each side) so packed
/// frames never touch. Applied by the drivers, never by the packer, and
/// never baked into output frame rectangles.
pub const PADDING: u32 = 1;

/// One input sheet slot: a raster and its animations. A source missing
/// either part is silently excluded from both modes.
#[derive(Debug, Clone, Default)]
pub struct Source {
    /// The source raster, decoded to RGBA8.
    pub image: Option<Raster>,
    /// The source's animations.
    pub animations: Option<Vec<Animation>>,
}

/// Result of a merge or overlay run: the consolidated animation list and
/// the packed raster it refers to.
#[derive(Debug, Clone)]
pub struct Composed {
    /// Animations with frame rectangles pointing into `raster`.
    pub animations: Vec<Animation>,
    /// The packed destination raster.
    pub raster: Raster,
}

/// Merge mode: concatenate every animation from every complete source and
/// repack all frames into one raster. Timing is untouched; only frame
/// positions change.
pub fn merge(sources: &[Source], packer: &dyn PackStrategy) -> Result<Composed, ComposeError> {
    let mut animations: Vec<Animation> = Vec::new();
    // (source, animation, frame) index of every packed box.
    let mut entries: Vec<(usize, usize, usize)> = Vec::new();

    for (index, source) in sources.iter().enumerate() {
        let (Some(image), Some(source_animations)) = (&source.image, &source.animations) else {
            continue;
        };

        for animation in source_animations {
            for (fi, f) in animation.frames.iter().enumerate() {
                check_bounds(&animation.state, index, f, image)?;
                entries.push((index, animations.len(), fi));
            }
            animations.push(animation.clone());
        }
    }

    let boxes: Vec<PackBox> = entries
        .iter()
        .map(|&(_, ai, fi)| padded_box(&animations[ai].frames[fi]))
        .collect();
    let layout = packer.pack(&boxes);

    let mut canvas = Raster::new(layout.width, layout.height);

    for (&(si, ai, fi), placement) in entries.iter().zip(&layout.placements) {
        let Some(image) = sources[si].image.as_ref() else {
            continue;
        };
        let frame = &mut animations[ai].frames[fi];

        let dx = placement.x + PADDING;
        let dy = placement.y + PADDING;
        canvas.copy_from(image, frame.x, frame.y, frame.w, frame.h, dx, dy);
        frame.x = dx;
        frame.y = dy;
    }

    Ok(Composed {
        animations,
        raster: canvas,
    })
}

/// Overlay mode: group animations by state name across all complete
/// sources, subdivide each state's timelines into a common refinement,
/// resolve merged origins and boxes, pack every bin of every state into one
/// canvas, and composite the layers.
pub fn overlay(sources: &[Source], packer: &dyn PackStrategy) -> Result<Composed, ComposeError> {
    // States in first-seen order so the output is deterministic.
    let mut states: Vec<(String, Timeline<'_>)> = Vec::new();

    for (index, source) in sources.iter().enumerate() {
        let (Some(image), Some(animations)) = (&source.image, &source.animations) else {
            continue;
        };

        for animation in animations {
            for frame in &animation.frames {
                check_bounds(&animation.state, index, frame, image)?;
            }

            let slot = match states.iter().position(|(state, _)| state == &animation.state) {
                Some(found) => found,
                None => {
                    states.push((animation.state.clone(), Timeline::new()));
                    states.len() - 1
                }
            };
            states[slot]
                .1
                .add_animation(index, &animation.state, &animation.frames)?;
        }
    }

    for (_, timeline) in &mut states {
        timeline.resolve();
    }

    // Pack all bins across all states into a single shared canvas.
    let boxes: Vec<PackBox> = states
        .iter()
        .flat_map(|(_, timeline)| timeline.bins().iter().map(|bin| padded_box(&bin.out)))
        .collect();
    let layout = packer.pack(&boxes);

    let mut canvas = Raster::new(layout.width, layout.height);
    let mut next = 0;

    for (_, timeline) in &mut states {
        for bin in timeline.bins_mut() {
            let placement = layout.placements[next];
            next += 1;

            bin.out.x = placement.x + PADDING;
            bin.out.y = placement.y + PADDING;
            bin.out.duration = format_duration(bin.duration);

            // Layers draw in insertion order so later sources land on top,
            // each anchored so its origin coincides with the merged origin
            // and mirrored about its own box when flipped.
            for layer in &bin.layers {
                let Some(image) = sources[layer.source].image.as_ref() else {
                    continue;
                };
                let f = layer.frame;
                let dx = bin.out.x + (bin.out.originx - f.originx) as u32;
                let dy = bin.out.y + (bin.out.originy - f.originy) as u32;
                canvas.blend_from(image, f.x, f.y, f.w, f.h, dx, dy, f.flipx, f.flipy);
            }
        }
    }

    let animations = states
        .iter()
        .map(|(state, timeline)| Animation {
            state: state.clone(),
            frames: timeline.bins().iter().map(|bin| bin.out.clone()).collect(),
        })
        .collect();

    Ok(Composed {
        animations,
        raster: canvas,
    })
}

fn padded_box(frame: &Frame) -> PackBox {
    PackBox {
        width: frame.w + 2 * PADDING,
        height: frame.h + 2 * PADDING,
    }
}

fn check_bounds(
    state: &str,
    source: usize,
    frame: &Frame,
    image: &Raster,
) -> Result<(), ComposeError> {
    if image.contains_rect(frame.x, frame.y, frame.w, frame.h) {
        return Ok(());
    }
    Err(ComposeError::FrameOutOfBounds {
        state: state.to_string(),
        source_index: source,
        x: frame.x,
        y: frame.y,
        w: frame.w,
        h: frame.h,
        raster_w: image.width,
        raster_h: image.height,
    })
}
