//! Axis-aligned rectangle collision with gameplay-feel adjustments
//!
//! Two deliberate biases toward false negatives: the player's hitbox is
//! inset from its sprite box, and shallow overlaps with an obstacle's top
//! edge are forgiven so grazing a box while sailing over it never kills.

use glam::Vec2;

use crate::consts::*;

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    /// Standard AABB overlap test (touching edges do not overlap)
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.right()
            && self.right() > other.min.x
            && self.min.y < other.bottom()
            && self.bottom() > other.min.y
    }

    /// Shrink the rect by the given per-side insets, clamped so the result
    /// never inverts
    pub fn inset(&self, dx: f32, dy: f32) -> Rect {
        let dx = dx.min(self.size.x / 2.0);
        let dy = dy.min(self.size.y / 2.0);
        Rect {
            min: self.min + Vec2::new(dx, dy),
            size: self.size - Vec2::new(2.0 * dx, 2.0 * dy),
        }
    }
}

/// Whether a player-hitbox/obstacle overlap ends the run
///
/// The overlap is forgiven when the only contact is a sliver at the top of
/// the obstacle: `0 < hitbox_bottom - obstacle_top <= VERTICAL_GRACE`.
pub fn lethal_overlap(player_hitbox: &Rect, obstacle: &Rect) -> bool {
    if !player_hitbox.overlaps(obstacle) {
        return false;
    }
    let vertical_overlap = player_hitbox.bottom() - obstacle.min.y;
    !(vertical_overlap > 0.0 && vertical_overlap <= VERTICAL_GRACE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_overlap_basic() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&rect(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.overlaps(&rect(20.0, 0.0, 10.0, 10.0)));
        // Touching edges are not an overlap
        assert!(!a.overlaps(&rect(10.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_inset_never_inverts() {
        let a = rect(0.0, 0.0, 8.0, 8.0);
        let shrunk = a.inset(10.0, 10.0);
        assert!(shrunk.size.x >= 0.0);
        assert!(shrunk.size.y >= 0.0);
    }

    #[test]
    fn test_top_grace_forgives_shallow_overlap() {
        // Hitbox bottom dips exactly VERTICAL_GRACE into the obstacle top
        let obstacle = rect(100.0, 200.0, 40.0, 60.0);
        let hitbox = rect(110.0, 200.0 + VERTICAL_GRACE - 50.0, 20.0, 50.0);
        assert!((hitbox.bottom() - obstacle.min.y - VERTICAL_GRACE).abs() < 1e-5);
        assert!(hitbox.overlaps(&obstacle));
        assert!(!lethal_overlap(&hitbox, &obstacle));
    }

    #[test]
    fn test_grace_plus_one_is_lethal() {
        let obstacle = rect(100.0, 200.0, 40.0, 60.0);
        let hitbox = rect(110.0, 200.0 + VERTICAL_GRACE + 1.0 - 50.0, 20.0, 50.0);
        assert!(lethal_overlap(&hitbox, &obstacle));
    }

    #[test]
    fn test_side_hit_is_lethal() {
        // Player fully level with the obstacle, overlapping from the side
        let obstacle = rect(100.0, 200.0, 40.0, 60.0);
        let hitbox = rect(90.0, 210.0, 20.0, 40.0);
        assert!(lethal_overlap(&hitbox, &obstacle));
    }

    #[test]
    fn test_no_overlap_is_not_lethal() {
        let obstacle = rect(100.0, 200.0, 40.0, 60.0);
        let hitbox = rect(0.0, 0.0, 20.0, 20.0);
        assert!(!lethal_overlap(&hitbox, &obstacle));
    }
}
