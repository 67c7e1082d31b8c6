//! Scene rendering: camera feed, keyboard, typed text, SPACE flash and the
//! hand skeleton overlay.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HELLO WORLD|                          (text + cursor)   │
//! │  [SPACE]                               (flash, 300 ms)   │
//! │                                                          │
//! │        [Q][W][E][R][T][Y][U][I][O][P][ BACK ]            │
//! │           [A][S][D][F][G][H][J][K][L]                    │
//! │              [Z][X][C][V][B][N][M]                       │
//! │                    [      SPACE BAR      ]               │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering reads state and never writes it.

use std::time::Instant;

use pinch_keys::gesture::HAND_CONNECTIONS;
use pinch_keys::{to_pixel, HandObservation, KeyId, Layout, TextBuffer};

use crate::canvas::Canvas;
use crate::tracker::Frame;

// ════════════════════════════════════════════════════════════════════════════
// Palette and placement
// ════════════════════════════════════════════════════════════════════════════

pub const BG_COLOR:       u32 = 0xFF1A1A2E;
pub const KEY_FILL:       u32 = 0xFFFFFFFF;
pub const HOVER_FILL:     u32 = 0xFFFFFF00;
pub const PRESS_FILL:     u32 = 0xFF00FF00;
pub const OUTLINE_COLOR:  u32 = 0xFF000000;
pub const LABEL_COLOR:    u32 = 0xFF000000;
pub const TEXT_COLOR:     u32 = 0xFF0000FF;
pub const FLASH_COLOR:    u32 = 0xFF00FF00;
pub const BONE_COLOR:     u32 = 0xFFEEEEEE;
pub const JOINT_COLOR:    u32 = 0xFFFF3030;
pub const FINGERTIP_COLOR: u32 = 0xFFFF00FF;

// Positions are glyph top-left corners.  Each sits one glyph height above
// the baseline it replaces: labels at y+45, text at 120, flash at 170.
const OUTLINE_PX:  i32 = 2;
const LABEL_SCALE: i32 = 4;
const LABEL_INSET: (i32, i32) = (10, 25);
const TEXT_POS:    (i32, i32) = (50, 80);
const TEXT_SCALE:  i32 = 8;
const FLASH_POS:   (i32, i32) = (50, 150);
const FLASH_SCALE: i32 = 4;
const FLASH_LABEL: &str = "[SPACE]";

/// Everything a frame draws from.
pub struct Scene<'a> {
    pub frame:   &'a Frame,
    pub layout:  &'a Layout,
    pub hovered: Option<KeyId>,
    pub pressed: Option<KeyId>,
    pub text:    &'a TextBuffer,
    pub hands:   &'a [HandObservation],
    pub now:     Instant,
}

/// Fill colour for a key: press beats hover beats default.
pub fn key_fill(id: KeyId, hovered: Option<KeyId>, pressed: Option<KeyId>) -> u32 {
    if pressed == Some(id) {
        PRESS_FILL
    } else if hovered == Some(id) {
        HOVER_FILL
    } else {
        KEY_FILL
    }
}

/// Draw one complete frame.
pub fn render(canvas: &mut Canvas, scene: &Scene<'_>) {
    let frame = scene.frame;
    canvas.resize(frame.width as usize, frame.height as usize);

    let fed = frame.pixels.as_deref().is_some_and(|px| canvas.blit(px));
    if !fed {
        canvas.clear(BG_COLOR);
    }

    draw_keyboard(canvas, scene.layout, scene.hovered, scene.pressed);
    draw_hands(canvas, scene);

    canvas.draw_text(&scene.text.with_cursor(), TEXT_POS.0, TEXT_POS.1, TEXT_SCALE, TEXT_COLOR);
    if scene.text.space_flash_active(scene.now) {
        canvas.draw_text(FLASH_LABEL, FLASH_POS.0, FLASH_POS.1, FLASH_SCALE, FLASH_COLOR);
    }
}

fn draw_keyboard(canvas: &mut Canvas, layout: &Layout, hovered: Option<KeyId>, pressed: Option<KeyId>) {
    for key in layout.keys() {
        let r = key.rect;
        canvas.fill_rect(r.x, r.y, r.width, r.height, key_fill(key.id, hovered, pressed));
        canvas.stroke_rect(r.x, r.y, r.width, r.height, OUTLINE_PX, OUTLINE_COLOR);
        canvas.draw_text(&key.id.caption(), r.x + LABEL_INSET.0, r.y + LABEL_INSET.1, LABEL_SCALE, LABEL_COLOR);
    }
}

/// Skeleton overlay, drawn over the keyboard so the fingertip stays visible.
fn draw_hands(canvas: &mut Canvas, scene: &Scene<'_>) {
    let vp = scene.frame.viewport();
    for hand in scene.hands {
        let pts = hand.landmarks().map(|p| to_pixel(p, vp));
        for &(a, b) in HAND_CONNECTIONS.iter() {
            canvas.draw_line(pts[a].x, pts[a].y, pts[b].x, pts[b].y, BONE_COLOR);
        }
        for p in pts.iter() {
            canvas.fill_circle(p.x, p.y, 3, JOINT_COLOR);
        }
        let tip = to_pixel(hand.index_tip(), vp);
        canvas.fill_circle(tip.x, tip.y, 6, FINGERTIP_COLOR);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use pinch_keys::{build_layout, NormPoint};
    use rstest::rstest;
    use std::time::Duration;

    const Q: KeyId = KeyId::Letter('Q');
    const W: KeyId = KeyId::Letter('W');

    #[rstest]
    #[case(None,    None,    KEY_FILL)]
    #[case(Some(Q), None,    HOVER_FILL)]
    #[case(None,    Some(Q), PRESS_FILL)]
    #[case(Some(Q), Some(Q), PRESS_FILL)]
    #[case(Some(W), Some(W), KEY_FILL)]
    fn fill_precedence(#[case] hovered: Option<KeyId>, #[case] pressed: Option<KeyId>, #[case] expected: u32) {
        assert_eq!(key_fill(Q, hovered, pressed), expected);
    }

    fn draw(text: &TextBuffer, hovered: Option<KeyId>, pressed: Option<KeyId>, now: Instant) -> Canvas {
        let frame = Frame::blank(1280, 720);
        let layout = build_layout(1280, 720);
        let mut canvas = Canvas::new(1, 1);
        render(&mut canvas, &Scene { frame: &frame, layout: &layout, hovered, pressed, text, hands: &[], now });
        canvas
    }

    /// A pixel inside Q that no label or outline covers.
    const Q_BODY: (i32, i32) = (172 + 5, 360 + 5);

    #[test]
    fn keys_are_coloured_by_state() {
        let t = TextBuffer::new();
        let now = Instant::now();
        assert_eq!(draw(&t, None, None, now).pixel(Q_BODY.0, Q_BODY.1), Some(KEY_FILL));
        assert_eq!(draw(&t, Some(Q), None, now).pixel(Q_BODY.0, Q_BODY.1), Some(HOVER_FILL));
        assert_eq!(draw(&t, Some(Q), Some(Q), now).pixel(Q_BODY.0, Q_BODY.1), Some(PRESS_FILL));
        assert_eq!(draw(&t, None, None, now).pixel(172, 360), Some(OUTLINE_COLOR));
    }

    #[test]
    fn canvas_follows_frame_size() {
        let c = draw(&TextBuffer::new(), None, None, Instant::now());
        assert_eq!((c.width(), c.height()), (1280, 720));
        assert_eq!(c.pixel(5, 5), Some(BG_COLOR));
    }

    #[test]
    fn cursor_is_drawn_for_empty_buffer() {
        let c = draw(&TextBuffer::new(), None, None, Instant::now());
        // '|' centre column at scale 8: x = 58..66, y = 80..120
        assert_eq!(c.pixel(60, 100), Some(TEXT_COLOR));
    }

    #[test]
    fn space_flash_only_inside_window() {
        let t0 = Instant::now();
        let mut text = TextBuffer::new();
        text.commit(KeyId::Space, t0);
        // '[' top-left pixel at scale 4
        let probe = (FLASH_POS.0 + 1, FLASH_POS.1 + 1);
        let on  = draw(&text, None, None, t0 + Duration::from_millis(100));
        let off = draw(&text, None, None, t0 + Duration::from_millis(400));
        assert_eq!(on.pixel(probe.0, probe.1), Some(FLASH_COLOR));
        assert_eq!(off.pixel(probe.0, probe.1), Some(BG_COLOR));
    }

    #[test]
    fn camera_feed_is_background() {
        let frame = Frame { width: 4, height: 2, pixels: Some(vec![0xFF123456; 8]) };
        let layout = build_layout(4, 2);
        let text = TextBuffer::new();
        let mut canvas = Canvas::new(1, 1);
        render(&mut canvas, &Scene {
            frame: &frame, layout: &layout, hovered: None, pressed: None,
            text: &text, hands: &[], now: Instant::now(),
        });
        assert_eq!(canvas.pixel(3, 0), Some(0xFF123456));
    }

    #[test]
    fn fingertip_marker_drawn() {
        let frame = Frame::blank(1280, 720);
        let layout = build_layout(1280, 720);
        let text = TextBuffer::new();
        let hand = HandObservation::from_tips(NormPoint::new(0.5, 0.2), NormPoint::new(0.45, 0.25));
        let mut canvas = Canvas::new(1, 1);
        render(&mut canvas, &Scene {
            frame: &frame, layout: &layout, hovered: None, pressed: None,
            text: &text, hands: std::slice::from_ref(&hand), now: Instant::now(),
        });
        assert_eq!(canvas.pixel(640, 144), Some(FINGERTIP_COLOR));
    }
}
