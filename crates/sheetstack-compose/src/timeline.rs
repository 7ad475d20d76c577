//! Timeline subdivision and origin/bounding resolution.
//!
//! Overlay mode must reconcile frame sequences with independent, non-aligned
//! durations. Per state, every contributing source's animation is folded
//! into one shared ordered list of time bins; each bin covers a slice of
//! time and records which source layers are active during it. The result is
//! a common refinement of all contributing timelines: bins only ever get
//! split, never merged, so every source's frame boundaries land exactly on
//! bin boundaries.

use sheetstack_sheet::{parse_duration, Frame};

use crate::error::ComposeError;

/// One source's frame contributing to a bin. The frame is a read-only
/// borrow of caller-owned sheet data.
#[derive(Debug, Clone, Copy)]
pub struct Layer<'a> {
    /// Index of the owning source in the input list.
    pub source: usize,
    /// The contributing frame.
    pub frame: &'a Frame,
}

/// A time slice of a merged state timeline.
#[derive(Debug, Clone)]
pub struct TimeBin<'a> {
    /// Slice duration in seconds.
    pub duration: f64,
    /// Active layers in insertion order (source processing order). At most
    /// one entry per source index.
    pub layers: Vec<Layer<'a>>,
    /// The resolved output frame. Origin and box are filled by
    /// [`Timeline::resolve`], position and duration string by the
    /// compositor.
    pub out: Frame,
}

impl<'a> TimeBin<'a> {
    fn new(duration: f64, layers: Vec<Layer<'a>>) -> Self {
        Self {
            duration,
            layers,
            out: Frame::new(0, 0, 0, 0, ""),
        }
    }

    /// Add a layer, replacing any prior entry for the same source.
    fn set_layer(&mut self, source: usize, frame: &'a Frame) {
        if let Some(layer) = self.layers.iter_mut().find(|l| l.source == source) {
            layer.frame = frame;
        } else {
            self.layers.push(Layer { source, frame });
        }
    }
}

/// The merged timeline for one state: an ordered bin sequence supporting
/// mid-sequence splits and appends.
#[derive(Debug, Default)]
pub struct Timeline<'a> {
    bins: Vec<TimeBin<'a>>,
}

impl<'a> Timeline<'a> {
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// The bins in time order.
    pub fn bins(&self) -> &[TimeBin<'a>] {
        &self.bins
    }

    /// Mutable access for the compositor.
    pub fn bins_mut(&mut self) -> &mut [TimeBin<'a>] {
        &mut self.bins
    }

    /// Total covered time in seconds.
    pub fn total_duration(&self) -> f64 {
        self.bins.iter().map(|b| b.duration).sum()
    }

    /// Fold one source's animation into the shared timeline.
    ///
    /// All frame durations are normalized and validated up front; a
    /// non-finite duration rejects the whole run before any bin is touched.
    /// Zero-frame animations contribute nothing. After the source's own
    /// frames run out, its last frame is held as a layer in every remaining
    /// bin, so shorter animations freeze on their last frame instead of
    /// disappearing mid-timeline.
    pub fn add_animation(
        &mut self,
        source: usize,
        state: &str,
        frames: &'a [Frame],
    ) -> Result<(), ComposeError> {
        let mut durations = Vec::with_capacity(frames.len());
        for (index, frame) in frames.iter().enumerate() {
            let secs = parse_duration(&frame.duration);
            if !secs.is_finite() {
                return Err(ComposeError::InvalidDuration {
                    state: state.to_string(),
                    index,
                    value: frame.duration.clone(),
                });
            }
            durations.push(secs);
        }

        // Cursor into the shared bin list; one pass per source.
        let mut i = 0;

        for (frame, &secs) in frames.iter().zip(&durations) {
            let mut remaining = secs;

            while remaining > 0.0 {
                if i == self.bins.len() {
                    // Past every existing bin: open a new one covering the
                    // rest of this frame. Layers of other sources still
                    // running at this point carry over from the previous
                    // bin.
                    let mut layers: Vec<Layer<'a>> = self
                        .bins
                        .last()
                        .map(|bin| {
                            bin.layers
                                .iter()
                                .filter(|l| l.source != source)
                                .copied()
                                .collect()
                        })
                        .unwrap_or_default();
                    layers.push(Layer { source, frame });

                    self.bins.push(TimeBin::new(remaining, layers));
                    i = self.bins.len();
                    break;
                }

                if self.bins[i].duration > remaining {
                    // This frame ends inside the bin: split it. The tail
                    // keeps an independent copy of the layer list. A frame
                    // ending exactly on the bin boundary consumes the bin
                    // without splitting (strict `>`).
                    let mut tail = self.bins[i].clone();
                    tail.duration -= remaining;
                    self.bins[i].duration = remaining;
                    self.bins.insert(i + 1, tail);
                }

                remaining -= self.bins[i].duration;
                self.bins[i].set_layer(source, frame);
                i += 1;
            }
        }

        // The timeline extends past this source: hold its last frame.
        if let Some(last) = frames.last() {
            for bin in &mut self.bins[i..] {
                bin.set_layer(source, last);
            }
        }

        Ok(())
    }

    /// Resolve every bin's output origin and bounding box.
    ///
    /// Two passes per bin, origin first: the merged origin is the
    /// componentwise maximum over layer origins, then the box is sized so
    /// every layer fits when anchored at that origin
    /// (`origin - layer.origin + layer.size`, componentwise max).
    pub fn resolve(&mut self) {
        for bin in &mut self.bins {
            let mut originx = i32::MIN;
            let mut originy = i32::MIN;
            for layer in &bin.layers {
                originx = originx.max(layer.frame.originx);
                originy = originy.max(layer.frame.originy);
            }
            if bin.layers.is_empty() {
                originx = 0;
                originy = 0;
            }
            bin.out.originx = originx;
            bin.out.originy = originy;

            let mut w = 0u32;
            let mut h = 0u32;
            for layer in &bin.layers {
                // Non-negative: the merged origin dominates every layer's.
                let extent_x = (originx - layer.frame.originx) as u32 + layer.frame.w;
                let extent_y = (originy - layer.frame.originy) as u32 + layer.frame.h;
                w = w.max(extent_x);
                h = h.max(extent_y);
            }
            bin.out.w = w;
            bin.out.h = h;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetstack_sheet::Frame;

    const EPS: f64 = 1e-9;

    fn frame(duration: &str) -> Frame {
        Frame::new(0, 0, 10, 10, duration)
    }

    fn layer_sources(bin: &TimeBin<'_>) -> Vec<usize> {
        bin.layers.iter().map(|l| l.source).collect()
    }

    #[test]
    fn single_source_passes_through() {
        let frames = vec![frame("0.1"), frame("0.2"), frame("0.3")];
        let mut timeline = Timeline::new();
        timeline.add_animation(0, "IDLE", &frames).unwrap();
        timeline.resolve();

        let bins = timeline.bins();
        assert_eq!(bins.len(), 3);
        for (bin, frame) in bins.iter().zip(&frames) {
            assert_eq!(bin.layers.len(), 1);
            assert!((bin.duration - parse_duration(&frame.duration)).abs() < EPS);
            assert_eq!(bin.out.w, frame.w);
            assert_eq!(bin.out.h, frame.h);
            assert_eq!(bin.out.originx, frame.originx);
            assert_eq!(bin.out.originy, frame.originy);
        }
    }

    #[test]
    fn one_second_against_two_halves() {
        // Source A: one frame of 1s. Source B: two frames of 0.5s.
        let a = vec![frame("1")];
        let b = vec![frame("0.5"), frame("0.5")];

        let mut timeline = Timeline::new();
        timeline.add_animation(0, "idle", &a).unwrap();
        timeline.add_animation(1, "idle", &b).unwrap();

        let bins = timeline.bins();
        assert_eq!(bins.len(), 2);
        assert!((bins[0].duration - 0.5).abs() < EPS);
        assert!((bins[1].duration - 0.5).abs() < EPS);

        assert_eq!(layer_sources(&bins[0]), vec![0, 1]);
        assert_eq!(layer_sources(&bins[1]), vec![0, 1]);
        assert!(std::ptr::eq(bins[0].layers[0].frame, &a[0]));
        assert!(std::ptr::eq(bins[1].layers[0].frame, &a[0]));
        assert!(std::ptr::eq(bins[0].layers[1].frame, &b[0]));
        assert!(std::ptr::eq(bins[1].layers[1].frame, &b[1]));
    }

    #[test]
    fn durations_sum_to_longest_source() {
        let a = vec![frame("0.3"), frame("0.3")];
        let b = vec![frame("0.25"), frame("0.25"), frame("0.25"), frame("0.25")];

        let mut timeline = Timeline::new();
        timeline.add_animation(0, "run", &a).unwrap();
        timeline.add_animation(1, "run", &b).unwrap();

        assert!((timeline.total_duration() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn short_source_holds_last_frame() {
        // B is shorter and processed second; its last frame must still
        // cover the rest of A's timeline.
        let a = vec![frame("0.5"), frame("0.5")];
        let b = vec![frame("0.25")];

        let mut timeline = Timeline::new();
        timeline.add_animation(0, "run", &a).unwrap();
        timeline.add_animation(1, "run", &b).unwrap();

        let bins = timeline.bins();
        assert_eq!(bins.len(), 3);
        for bin in bins {
            assert_eq!(layer_sources(bin), vec![0, 1]);
        }
        // Every bin past B's total duration holds B's last (only) frame.
        assert!(std::ptr::eq(bins[1].layers[1].frame, &b[0]));
        assert!(std::ptr::eq(bins[2].layers[1].frame, &b[0]));
    }

    #[test]
    fn short_source_first_is_carried_forward() {
        // Same as above with processing order reversed: the carry happens
        // at bin creation instead.
        let a = vec![frame("0.25")];
        let b = vec![frame("0.5"), frame("0.5")];

        let mut timeline = Timeline::new();
        timeline.add_animation(0, "run", &a).unwrap();
        timeline.add_animation(1, "run", &b).unwrap();

        let bins = timeline.bins();
        assert_eq!(bins.len(), 3);
        for bin in bins {
            let mut sources = layer_sources(bin);
            sources.sort_unstable();
            assert_eq!(sources, vec![0, 1]);
        }
        assert!((timeline.total_duration() - 1.0).abs() < EPS);
    }

    #[test]
    fn exact_boundary_does_not_split() {
        let a = vec![frame("0.5"), frame("0.5")];
        let b = vec![frame("0.5"), frame("0.5")];

        let mut timeline = Timeline::new();
        timeline.add_animation(0, "x", &a).unwrap();
        timeline.add_animation(1, "x", &b).unwrap();

        assert_eq!(timeline.bins().len(), 2);
    }

    #[test]
    fn zero_frame_animation_contributes_nothing() {
        let a = vec![frame("0.5")];
        let empty: Vec<Frame> = Vec::new();

        let mut timeline = Timeline::new();
        timeline.add_animation(0, "x", &a).unwrap();
        timeline.add_animation(1, "x", &empty).unwrap();

        let bins = timeline.bins();
        assert_eq!(bins.len(), 1);
        assert_eq!(layer_sources(&bins[0]), vec![0]);
    }

    #[test]
    fn frame_unit_durations_subdivide_exactly() {
        // 30f at 60 ticks/second is exactly half a second.
        let a = vec![frame("30f")];
        let b = vec![frame("0.25"), frame("0.25")];

        let mut timeline = Timeline::new();
        timeline.add_animation(0, "walk", &a).unwrap();
        timeline.add_animation(1, "walk", &b).unwrap();

        let bins = timeline.bins();
        assert_eq!(bins.len(), 2);
        assert!((timeline.total_duration() - 0.5).abs() < EPS);
    }

    #[test]
    fn bad_duration_is_fatal_before_subdivision() {
        let a = vec![frame("0.5"), frame("soon")];
        let mut timeline = Timeline::new();
        let err = timeline.add_animation(0, "IDLE", &a).unwrap_err();

        match err {
            ComposeError::InvalidDuration {
                state,
                index,
                value,
            } => {
                assert_eq!(state, "IDLE");
                assert_eq!(index, 1);
                assert_eq!(value, "soon");
            }
            other => panic!("unexpected error: {other}"),
        }
        // Nothing was added.
        assert!(timeline.bins().is_empty());
    }

    #[test]
    fn split_copies_layers_independently() {
        // A's single bin is split by B; mutating the head bin's layer list
        // must not affect the tail.
        let a = vec![frame("1")];
        let b = vec![frame("0.25")];
        let c = vec![frame("0.25"), frame("0.75")];

        let mut timeline = Timeline::new();
        timeline.add_animation(0, "x", &a).unwrap();
        timeline.add_animation(1, "x", &b).unwrap();
        timeline.add_animation(2, "x", &c).unwrap();

        let bins = timeline.bins();
        assert_eq!(bins.len(), 2);
        assert_eq!(layer_sources(&bins[0]), vec![0, 1, 2]);
        assert_eq!(layer_sources(&bins[1]), vec![0, 1, 2]);
        // Bin 1 holds B's last frame but C's second frame.
        assert!(std::ptr::eq(bins[1].layers[1].frame, &b[0]));
        assert!(std::ptr::eq(bins[1].layers[2].frame, &c[1]));
    }

    #[test]
    fn resolve_merges_origins_and_sizes() {
        let mut a = frame("1");
        a.originx = 5;
        a.originy = 2;
        a.w = 10;
        a.h = 10;
        let mut b = frame("1");
        b.originx = 1;
        b.originy = 8;
        b.w = 20;
        b.h = 4;
        let fa = vec![a];
        let fb = vec![b];

        let mut timeline = Timeline::new();
        timeline.add_animation(0, "x", &fa).unwrap();
        timeline.add_animation(1, "x", &fb).unwrap();
        timeline.resolve();

        let out = &timeline.bins()[0].out;
        assert_eq!((out.originx, out.originy), (5, 8));
        // A: 5-5+10 = 10, B: 5-1+20 = 24 -> w = 24
        // A: 8-2+10 = 16, B: 8-8+4  = 4  -> h = 16
        assert_eq!((out.w, out.h), (24, 16));

        // Containment invariant, componentwise.
        for layer in &timeline.bins()[0].layers {
            let f = layer.frame;
            assert!((out.originx - f.originx) as u32 + f.w <= out.w);
            assert!((out.originy - f.originy) as u32 + f.h <= out.h);
        }
    }
}
