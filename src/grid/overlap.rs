// Overlap resolution for drag and resize.
//
// Given a candidate placement for the event under the pointer and the
// committed placements of its day-column siblings, return an adjusted
// placement that intersects none of them. Greedy nearest-gap resolution:
// the event snaps to whichever side of a blocking sibling is closer to
// where the user asked for it. Inputs are bounded pointer offsets, so
// there are no error states; the worst case is zero visible movement.

/// Vertical extent of one event in grid pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutBox {
    pub top: f32,
    pub height: f32,
}

impl LayoutBox {
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Half-open interval intersection on [top, bottom).
    pub fn intersects(&self, other: &LayoutBox) -> bool {
        self.top < other.bottom() && self.bottom() > other.top
    }
}

/// Resolve a move to a non-overlapping placement.
///
/// `requested_top` is the snapped position the pointer asked for;
/// `original` is the event's committed placement, used as the fallback when
/// no free gap can be settled on (zero visible movement).
pub fn resolve_move(
    original: LayoutBox,
    requested_top: f32,
    neighbors: &[LayoutBox],
    grid_height: f32,
) -> LayoutBox {
    let height = original.height;
    let max_top = (grid_height - height).max(0.0);
    let clamped = requested_top.clamp(0.0, max_top);

    let candidate = LayoutBox::new(clamped, height);
    if !neighbors.iter().any(|n| candidate.intersects(n)) {
        return candidate;
    }

    // Blocked: slide out of the collision both upward and downward, then
    // keep whichever free position ended up closer to the request.
    let above = push_until_free(clamped, height, neighbors, max_top, Direction::Up);
    let below = push_until_free(clamped, height, neighbors, max_top, Direction::Down);

    match (above, below) {
        (Some(a), Some(b)) => {
            if (a - requested_top).abs() <= (b - requested_top).abs() {
                LayoutBox::new(a, height)
            } else {
                LayoutBox::new(b, height)
            }
        }
        (Some(a), None) => LayoutBox::new(a, height),
        (None, Some(b)) => LayoutBox::new(b, height),
        // Grid packed solid in both directions: zero visible movement.
        (None, None) => original,
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Up,
    Down,
}

/// Slide a candidate top monotonically past blocking neighbors until the
/// interval is free, or report `None` when it runs off the grid.
fn push_until_free(
    start_top: f32,
    height: f32,
    neighbors: &[LayoutBox],
    max_top: f32,
    direction: Direction,
) -> Option<f32> {
    let mut top = start_top;

    // Strictly monotone movement, so one step per neighbor suffices.
    for _ in 0..=neighbors.len() {
        let candidate = LayoutBox::new(top, height);
        let blocking: Vec<&LayoutBox> =
            neighbors.iter().filter(|n| candidate.intersects(n)).collect();
        if blocking.is_empty() {
            return (0.0..=max_top).contains(&top).then_some(top);
        }

        top = match direction {
            Direction::Up => blocking
                .iter()
                .map(|n| n.top - height)
                .fold(f32::INFINITY, f32::min),
            Direction::Down => blocking
                .iter()
                .map(|n| n.bottom())
                .fold(f32::NEG_INFINITY, f32::max),
        };

        if top < 0.0 || top > max_top {
            return None;
        }
    }

    None
}

/// Clamp a top-handle resize. The bottom edge stays fixed; the top edge
/// stops at the bottom of any sibling it would cross and never closer than
/// `min_height` to the bottom.
pub fn resolve_resize_top(
    bottom: f32,
    requested_top: f32,
    min_height: f32,
    neighbors: &[LayoutBox],
) -> LayoutBox {
    let mut top = requested_top.max(0.0);

    for n in neighbors {
        // Siblings ending above our fixed bottom edge limit how far up
        // the handle may travel.
        if n.bottom() <= bottom && n.bottom() > top {
            top = n.bottom();
        }
    }

    let top = top.min(bottom - min_height);
    LayoutBox::new(top, bottom - top)
}

/// Clamp a bottom-handle resize, symmetric to [`resolve_resize_top`].
pub fn resolve_resize_bottom(
    top: f32,
    requested_bottom: f32,
    min_height: f32,
    neighbors: &[LayoutBox],
    grid_height: f32,
) -> LayoutBox {
    let mut bottom = requested_bottom.min(grid_height);

    for n in neighbors {
        if n.top >= top && n.top < bottom {
            bottom = n.top;
        }
    }

    let bottom = bottom.max(top + min_height);
    LayoutBox::new(top, bottom - top)
}
