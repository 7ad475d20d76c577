//! Rectangle packing.
//!
//! Packing is an injected strategy so heuristics can be swapped without
//! touching subdivision, resolution or compositing. The contract is small:
//! callers pass boxes that are *already padded* (the compositor adds 1 unit
//! on each side so packed items never touch), the packer returns one
//! placement per input box plus the total canvas size. No optimality is
//! promised, only that placements are disjoint, fit in the reported bounds,
//! and are deterministic for a given input order.

/// One box to pack. Dimensions include any padding the caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackBox {
    /// Padded width.
    pub width: u32,
    /// Padded height.
    pub height: u32,
}

/// Placement of one packed box, indexed like the input slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// X position of the box's top-left corner.
    pub x: u32,
    /// Y position of the box's top-left corner.
    pub y: u32,
}

/// Result of packing: per-box placements plus the enclosing canvas size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedLayout {
    /// Total canvas width.
    pub width: u32,
    /// Total canvas height.
    pub height: u32,
    /// `placements[i]` is the position of `boxes[i]`.
    pub placements: Vec<Placement>,
}

impl PackedLayout {
    /// An empty layout (zero-size canvas).
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            placements: Vec::new(),
        }
    }
}

/// A rectangle packing heuristic.
pub trait PackStrategy {
    /// Pack `boxes` into a minimal canvas. Always succeeds for finite
    /// positive sizes; an empty input yields a zero-size layout.
    fn pack(&self, boxes: &[PackBox]) -> PackedLayout;
}

/// Growing binary-tree packer.
///
/// Boxes are visited in order of decreasing longest side (stable, so ties
/// keep input order) and inserted into a binary tree of free regions; when
/// nothing fits, the canvas grows right or down, whichever keeps it closer
/// to square. This trades some density for a canvas sized by the content
/// rather than fixed up front.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrowingPacker;

#[derive(Debug, Clone)]
struct Node {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    used: bool,
    right: Option<usize>,
    down: Option<usize>,
}

impl Node {
    fn leaf(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            x,
            y,
            w,
            h,
            used: false,
            right: None,
            down: None,
        }
    }
}

/// Node arena; the tree only ever grows within one pack call.
struct Tree {
    nodes: Vec<Node>,
    root: usize,
}

impl Tree {
    fn new(w: u32, h: u32) -> Self {
        Self {
            nodes: vec![Node::leaf(0, 0, w, h)],
            root: 0,
        }
    }

    fn push(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Find an unused node at least `w` x `h`, depth-first right-then-down.
    fn find(&self, at: usize, w: u32, h: u32) -> Option<usize> {
        let node = &self.nodes[at];
        if node.used {
            node.right
                .and_then(|r| self.find(r, w, h))
                .or_else(|| node.down.and_then(|d| self.find(d, w, h)))
        } else if w <= node.w && h <= node.h {
            Some(at)
        } else {
            None
        }
    }

    /// Claim `w` x `h` out of node `at`, splitting the remainder into a
    /// down strip and a right strip.
    fn split(&mut self, at: usize, w: u32, h: u32) -> Placement {
        let (x, y, nw, nh) = {
            let node = &self.nodes[at];
            (node.x, node.y, node.w, node.h)
        };
        let down = self.push(Node::leaf(x, y + h, nw, nh - h));
        let right = self.push(Node::leaf(x + w, y, nw - w, h));

        let node = &mut self.nodes[at];
        node.used = true;
        node.down = Some(down);
        node.right = Some(right);

        Placement { x, y }
    }

    fn grow_right(&mut self, w: u32, h: u32) -> Placement {
        let (root_w, root_h) = (self.nodes[self.root].w, self.nodes[self.root].h);
        let new_h = root_h.max(h);

        let strip = self.push(Node::leaf(root_w, 0, w, new_h));
        let new_root = self.push(Node {
            x: 0,
            y: 0,
            w: root_w + w,
            h: new_h,
            used: true,
            right: Some(strip),
            down: Some(self.root),
        });
        self.root = new_root;

        self.split(strip, w, h)
    }

    fn grow_down(&mut self, w: u32, h: u32) -> Placement {
        let (root_w, root_h) = (self.nodes[self.root].w, self.nodes[self.root].h);
        let new_w = root_w.max(w);

        let strip = self.push(Node::leaf(0, root_h, new_w, h));
        let new_root = self.push(Node {
            x: 0,
            y: 0,
            w: new_w,
            h: root_h + h,
            used: true,
            right: Some(self.root),
            down: Some(strip),
        });
        self.root = new_root;

        self.split(strip, w, h)
    }

    /// Grow the canvas to fit one more box, keeping it roughly square.
    fn grow(&mut self, w: u32, h: u32) -> Placement {
        let (root_w, root_h) = (self.nodes[self.root].w, self.nodes[self.root].h);
        let can_grow_down = w <= root_w;
        let can_grow_right = h <= root_h;

        // Prefer the direction that keeps the canvas square.
        let should_grow_right = can_grow_right && root_h >= root_w + w;
        let should_grow_down = can_grow_down && root_w >= root_h + h;

        if should_grow_right {
            self.grow_right(w, h)
        } else if should_grow_down {
            self.grow_down(w, h)
        } else if can_grow_right {
            self.grow_right(w, h)
        } else {
            // grow_down widens the canvas when w > root_w, so this arm is
            // total even for inputs that defeat the max-side sort order.
            self.grow_down(w, h)
        }
    }
}

impl PackStrategy for GrowingPacker {
    fn pack(&self, boxes: &[PackBox]) -> PackedLayout {
        if boxes.is_empty() {
            return PackedLayout::empty();
        }

        let mut order: Vec<usize> = (0..boxes.len()).collect();
        order.sort_by_key(|&i| std::cmp::Reverse(boxes[i].width.max(boxes[i].height)));

        let first = boxes[order[0]];
        let mut tree = Tree::new(first.width, first.height);
        let mut placements = vec![Placement { x: 0, y: 0 }; boxes.len()];

        for &i in &order {
            let PackBox { width, height } = boxes[i];
            placements[i] = match tree.find(tree.root, width, height) {
                Some(node) => tree.split(node, width, height),
                None => tree.grow(width, height),
            };
        }

        PackedLayout {
            width: tree.nodes[tree.root].w,
            height: tree.nodes[tree.root].h,
            placements,
        }
    }
}
