//! Hit testing: which key is under a pixel.

use crate::geometry::PixelPoint;
use crate::layout::{KeyId, Layout};

/// Return the first key, in layout build order, whose rectangle contains
/// `point` (inclusive on every edge).
///
/// Keys never overlap, so order only matters on a shared edge: a point lying
/// exactly on the boundary of two keys resolves to the one built first
/// (left before right, upper row before lower row).
pub fn key_at(point: PixelPoint, layout: &Layout) -> Option<KeyId> {
    layout
        .keys()
        .iter()
        .find(|key| key.rect.contains(point))
        .map(|key| key.id)
}
