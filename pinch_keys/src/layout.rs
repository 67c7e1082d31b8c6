//! Keyboard layout engine.
//!
//! ```text
//!   row 0   Q W E R T Y U I O P [BACK ]
//!   row 1     A S D F G H J K L
//!   row 2       Z X C V B N M
//!   row 3           [    SPACE     ]
//! ```
//!
//! Every row is centred on an 11-slot grid and then shifted right by a fixed
//! stagger.  The whole block is anchored a fixed distance above the bottom of
//! the viewport.  [`build_layout`] is a pure function of the viewport size.

use std::fmt;

use crate::geometry::{PixelPoint, Rect, Viewport};
use crate::hit;

// ════════════════════════════════════════════════════════════════════════════
// Geometry constants
// ════════════════════════════════════════════════════════════════════════════

pub const KEY_W:   i32 = 70;
pub const KEY_H:   i32 = 70;
pub const SPACING: i32 = 15;
pub const BACK_W:  i32 = KEY_W * 2 + SPACING;
pub const SPACE_W: i32 = KEY_W * 6 + SPACING * 5;

/// Distance from the bottom of the viewport to the top of row 0.
pub const KEYBOARD_RISE: i32 = 360;

/// Number of standard key slots the centring is computed against.
const GRID_SLOTS: i32 = 11;

/// Per-row horizontal stagger, like a physical keyboard's indentation.
const ROW_OFFSETS: [i32; 4] = [0, KEY_W / 2, KEY_W, KEY_W * 2];

// ════════════════════════════════════════════════════════════════════════════
// KeyId
// ════════════════════════════════════════════════════════════════════════════

/// Identifier of a key on the virtual keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyId {
    /// A single-character key; commits its character.
    Letter(char),
    /// Delete the last committed character.
    Back,
    /// Commit a space.
    Space,
}

impl KeyId {
    /// Width of this key in pixels.
    pub fn width(&self) -> i32 {
        match self {
            KeyId::Letter(_) => KEY_W,
            KeyId::Back      => BACK_W,
            KeyId::Space     => SPACE_W,
        }
    }

    /// Text drawn on the key cap.
    pub fn caption(&self) -> String {
        match self {
            KeyId::Space => "SPACE BAR".to_string(),
            other        => other.to_string(),
        }
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyId::Letter(c) => write!(f, "{}", c),
            KeyId::Back      => f.write_str("BACK"),
            KeyId::Space     => f.write_str("SPACE"),
        }
    }
}

const fn k(c: char) -> KeyId { KeyId::Letter(c) }

/// The fixed logical arrangement, top row first.
pub const KEY_ROWS: [&[KeyId]; 4] = [
    &[k('Q'), k('W'), k('E'), k('R'), k('T'), k('Y'), k('U'), k('I'), k('O'), k('P'), KeyId::Back],
    &[k('A'), k('S'), k('D'), k('F'), k('G'), k('H'), k('J'), k('K'), k('L')],
    &[k('Z'), k('X'), k('C'), k('V'), k('B'), k('N'), k('M')],
    &[KeyId::Space],
];

// ════════════════════════════════════════════════════════════════════════════
// Key / Layout
// ════════════════════════════════════════════════════════════════════════════

/// One key with its bounding rectangle in viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Key {
    pub id:   KeyId,
    pub rect: Rect,
}

/// All keys for one viewport size, in build order (row by row, left to right).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    viewport: Viewport,
    keys:     Vec<Key>,
}

impl Layout {
    pub fn viewport(&self) -> Viewport { self.viewport }
    pub fn keys(&self) -> &[Key] { &self.keys }
    pub fn len(&self) -> usize { self.keys.len() }
    pub fn is_empty(&self) -> bool { self.keys.is_empty() }

    /// Look up a key's geometry by identifier.
    pub fn key(&self, id: KeyId) -> Option<&Key> {
        self.keys.iter().find(|k| k.id == id)
    }

    /// See [`hit::key_at`].
    pub fn key_at(&self, point: PixelPoint) -> Option<KeyId> {
        hit::key_at(point, self)
    }
}

/// Build the key geometry for a `width` × `height` viewport.
///
/// Never fails.  Viewports narrower than the keyboard (935 px) or shorter than
/// 360 px yield keys with negative or off-screen coordinates.
pub fn build_layout(width: u32, height: u32) -> Layout {
    let viewport = Viewport::new(width, height);
    let grid_w   = GRID_SLOTS * (KEY_W + SPACING);
    let origin_x = (viewport.width_px() - grid_w).div_euclid(2);
    let start_y  = viewport.height_px() - KEYBOARD_RISE;

    let mut keys = Vec::with_capacity(KEY_ROWS.iter().map(|r| r.len()).sum());
    for (row_idx, row) in KEY_ROWS.iter().enumerate() {
        let y = start_y + row_idx as i32 * (KEY_H + SPACING);
        let mut x = origin_x + ROW_OFFSETS[row_idx];

        for &id in row.iter() {
            let w = id.width();
            keys.push(Key { id, rect: Rect::new(x, y, w, KEY_H) });
            x += w + SPACING;
        }
    }

    Layout { viewport, keys }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn has_all_keys_once() {
        let layout = build_layout(1280, 720);
        assert_eq!(layout.len(), 11 + 9 + 7 + 1);
        let ids: HashSet<_> = layout.keys().iter().map(|k| k.id).collect();
        assert_eq!(ids.len(), layout.len());
    }

    #[test]
    fn q_key_position_at_720p() {
        let layout = build_layout(1280, 720);
        // (1280 - 935) / 2 = 172.5, floored
        assert_eq!(layout.key(KeyId::Letter('Q')).unwrap().rect, Rect::new(172, 360, 70, 70));
    }

    #[test]
    fn row_stagger() {
        let layout = build_layout(1280, 720);
        let a = layout.key(KeyId::Letter('A')).unwrap().rect;
        let z = layout.key(KeyId::Letter('Z')).unwrap().rect;
        let sp = layout.key(KeyId::Space).unwrap().rect;
        assert_eq!((a.x, a.y), (172 + 35, 445));
        assert_eq!((z.x, z.y), (172 + 70, 530));
        assert_eq!((sp.x, sp.y), (172 + 140, 615));
    }

    #[test]
    fn action_key_widths() {
        let layout = build_layout(1280, 720);
        assert_eq!(layout.key(KeyId::Back).unwrap().rect.width, 155);
        assert_eq!(layout.key(KeyId::Space).unwrap().rect.width, 495);
    }

    #[test]
    fn back_follows_p() {
        let layout = build_layout(1280, 720);
        let p = layout.key(KeyId::Letter('P')).unwrap().rect;
        let back = layout.key(KeyId::Back).unwrap().rect;
        assert_eq!(back.x, p.right() + SPACING);
    }

    #[test]
    fn tiny_viewport_goes_negative() {
        let layout = build_layout(100, 100);
        let q = layout.key(KeyId::Letter('Q')).unwrap().rect;
        // floor((100 - 935) / 2) = -418
        assert_eq!((q.x, q.y), (-418, -260));
    }

    #[test]
    fn same_size_same_layout() {
        assert_eq!(build_layout(1920, 1080), build_layout(1920, 1080));
        assert_ne!(build_layout(1920, 1080), build_layout(1280, 720));
    }

    #[test]
    fn captions() {
        assert_eq!(KeyId::Letter('Q').caption(), "Q");
        assert_eq!(KeyId::Back.caption(), "BACK");
        assert_eq!(KeyId::Space.caption(), "SPACE BAR");
        assert_eq!(KeyId::Space.to_string(), "SPACE");
    }
}
