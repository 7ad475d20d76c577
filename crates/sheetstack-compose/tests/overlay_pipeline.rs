//! End-to-end pipeline tests: subdivision, resolution, packing,
//! compositing and deduplication working together.

use pretty_assertions::assert_eq;
use sheetstack_compose::{
    dedup_sheet, merge, overlay, GrowingPacker, Raster, Source, PADDING,
};
use sheetstack_sheet::{parse_duration, Animation, Frame};

fn solid(width: u32, height: u32, color: [u8; 4]) -> Raster {
    let mut raster = Raster::new(width, height);
    for y in 0..height {
        for x in 0..width {
            raster.set(x, y, color);
        }
    }
    raster
}

fn source(raster: Raster, animations: Vec<Animation>) -> Source {
    Source {
        image: Some(raster),
        animations: Some(animations),
    }
}

fn animation(state: &str, frames: Vec<Frame>) -> Animation {
    let mut a = Animation::new(state);
    a.frames = frames;
    a
}

#[test]
fn overlay_two_sources_shared_state() {
    // Body: one 1s frame, 16x16, origin at its bottom center.
    let body = source(
        solid(16, 16, [200, 0, 0, 255]),
        vec![animation(
            "idle",
            vec![Frame::new(0, 0, 16, 16, "1").with_origin(8, 16)],
        )],
    );
    // Hat: two 0.5s frames, 8x4, origin below its own box so it sits above
    // the body's anchor.
    let hat = source(
        solid(16, 4, [0, 0, 200, 255]),
        vec![animation(
            "idle",
            vec![
                Frame::new(0, 0, 8, 4, "0.5").with_origin(4, 20),
                Frame::new(8, 0, 8, 4, "0.5").with_origin(4, 20),
            ],
        )],
    );

    let composed = overlay(&[body, hat], &GrowingPacker).unwrap();
    assert_eq!(composed.animations.len(), 1);

    let out = &composed.animations[0];
    assert_eq!(out.state, "idle");
    assert_eq!(out.frames.len(), 2);

    for frame in &out.frames {
        // Merged origin is the componentwise max: (8, 20).
        assert_eq!((frame.originx, frame.originy), (8, 20));
        // Body extent: 8-8+16 = 16 wide, 20-16+16 = 20 tall.
        // Hat extent:  8-4+8  = 12 wide, 20-20+4  = 4 tall.
        assert_eq!((frame.w, frame.h), (16, 20));
        assert_eq!(parse_duration(&frame.duration), 0.5);
    }

    // Hat pixels land at the top (origin alignment), body below.
    let f = &out.frames[0];
    let hat_x = f.x + (8 - 4) as u32;
    assert_eq!(composed.raster.get(hat_x, f.y), [0, 0, 200, 255]);
    let body_y = f.y + (20 - 16) as u32;
    assert_eq!(composed.raster.get(f.x, body_y), [200, 0, 0, 255]);
}

#[test]
fn overlay_timeline_duration_matches_longest_source() {
    let a = source(
        solid(8, 8, [1, 0, 0, 255]),
        vec![animation(
            "run",
            vec![
                Frame::new(0, 0, 8, 8, "0.2"),
                Frame::new(0, 0, 8, 8, "0.2"),
                Frame::new(0, 0, 8, 8, "0.2"),
            ],
        )],
    );
    let b = source(
        solid(8, 8, [0, 1, 0, 255]),
        vec![animation("run", vec![Frame::new(0, 0, 8, 8, "0.25")])],
    );

    let composed = overlay(&[a, b], &GrowingPacker).unwrap();
    let total: f64 = composed.animations[0]
        .frames
        .iter()
        .map(|f| parse_duration(&f.duration))
        .sum();
    assert!((total - 0.6).abs() < 1e-6);
}

#[test]
fn merge_is_idempotent_on_single_source() {
    let raster = {
        let mut r = Raster::new(24, 8);
        for y in 0..8 {
            for x in 0..24 {
                r.set(x, y, [x as u8 * 10, y as u8 * 30, 7, 255]);
            }
        }
        r
    };
    let anims = vec![animation(
        "A",
        vec![
            Frame::new(0, 0, 8, 8, "0.1"),
            Frame::new(8, 0, 8, 8, "0.1"),
            Frame::new(16, 0, 8, 8, "0.1"),
        ],
    )];

    let once = merge(&[source(raster, anims)], &GrowingPacker).unwrap();
    let twice = merge(
        &[source(once.raster.clone(), once.animations.clone())],
        &GrowingPacker,
    )
    .unwrap();

    assert_eq!(once.animations.len(), twice.animations.len());
    for (a, b) in once.animations.iter().zip(&twice.animations) {
        assert_eq!(a.frames.len(), b.frames.len());
        for (fa, fb) in a.frames.iter().zip(&b.frames) {
            assert_eq!((fa.w, fa.h), (fb.w, fb.h));
            assert_eq!(fa.duration, fb.duration);
            // Same pixel content in both rasters, placement aside.
            for y in 0..fa.h {
                for x in 0..fa.w {
                    assert_eq!(
                        once.raster.get(fa.x + x, fa.y + y),
                        twice.raster.get(fb.x + x, fb.y + y)
                    );
                }
            }
        }
    }
}

#[test]
fn packed_frames_have_padding_between_them() {
    let a = source(
        solid(32, 8, [5, 5, 5, 255]),
        vec![animation(
            "A",
            (0..4).map(|i| Frame::new(i * 8, 0, 8, 8, "0.1")).collect(),
        )],
    );
    let composed = merge(&[a], &GrowingPacker).unwrap();

    let frames: Vec<&Frame> = composed
        .animations
        .iter()
        .flat_map(|a| a.frames.iter())
        .collect();
    for (i, fa) in frames.iter().enumerate() {
        // Placements sit at least one unit in from every canvas edge.
        assert!(fa.x >= PADDING && fa.y >= PADDING);
        assert!(fa.x + fa.w + PADDING <= composed.raster.width);
        assert!(fa.y + fa.h + PADDING <= composed.raster.height);

        for fb in &frames[i + 1..] {
            let overlap = fa.x < fb.x + fb.w + PADDING
                && fb.x < fa.x + fa.w + PADDING
                && fa.y < fb.y + fb.h + PADDING
                && fb.y < fa.y + fa.h + PADDING;
            assert!(!overlap, "padded frames touch");
        }
    }
}

#[test]
fn dedup_collapses_held_frames() {
    // Overlaying a 1-frame source with a 4-frame source of identical cells
    // produces four identical output bins; dedup should collapse them.
    let a = source(
        solid(8, 8, [9, 9, 9, 255]),
        vec![animation("idle", vec![Frame::new(0, 0, 8, 8, "1")])],
    );
    let b = source(
        solid(8, 8, [30, 60, 90, 128]),
        vec![animation(
            "idle",
            (0..4).map(|_| Frame::new(0, 0, 8, 8, "0.25")).collect(),
        )],
    );

    let composed = overlay(&[a, b], &GrowingPacker).unwrap();
    assert_eq!(composed.animations[0].frames.len(), 4);
    let before = composed.raster.width * composed.raster.height;

    let mut animations = composed.animations;
    let out = dedup_sheet(&composed.raster, &mut animations, &GrowingPacker);
    let after = out.width * out.height;

    assert!(after < before, "dedup did not shrink the raster");
    let positions: Vec<(u32, u32)> = animations[0].frames.iter().map(|f| (f.x, f.y)).collect();
    assert!(positions.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn overlay_applies_layer_flips() {
    // A two-pixel-wide frame drawn flipped: columns swap.
    let mut raster = Raster::new(2, 1);
    raster.set(0, 0, [10, 0, 0, 255]);
    raster.set(1, 0, [20, 0, 0, 255]);

    let a = source(
        raster,
        vec![animation(
            "x",
            vec![Frame::new(0, 0, 2, 1, "1").with_flips(true, false)],
        )],
    );
    let composed = overlay(&[a], &GrowingPacker).unwrap();
    let f = &composed.animations[0].frames[0];
    assert_eq!(composed.raster.get(f.x, f.y), [20, 0, 0, 255]);
    assert_eq!(composed.raster.get(f.x + 1, f.y), [10, 0, 0, 255]);
}
