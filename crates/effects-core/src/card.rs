//! Pointer geometry for card hover tilt and press ripples.

use crate::constants::{HOVER_LIFT_PX, HOVER_REST_ROTATE_X_DEG, HOVER_SCALE, TILT_DIVISOR};

/// Viewport-relative bounding rectangle, as reported by `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Lift, scale and rotation applied to a hovered card.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tilt {
    pub lift_px: f64,
    pub scale: f64,
    pub rotate_x_deg: f64,
    /// `None` for the resting hover pose, which only tips on X.
    pub rotate_y_deg: Option<f64>,
}

impl Tilt {
    /// Pose applied as soon as the pointer enters a card.
    pub fn resting() -> Self {
        Self {
            lift_px: HOVER_LIFT_PX,
            scale: HOVER_SCALE,
            rotate_x_deg: HOVER_REST_ROTATE_X_DEG,
            rotate_y_deg: None,
        }
    }

    /// Pose that follows the pointer: the card tips toward it, one degree per
    /// ten pixels of offset from the card's center.
    pub fn follow(rect: &Rect, client_x: f64, client_y: f64) -> Self {
        let x = client_x - rect.left;
        let y = client_y - rect.top;
        let cx = rect.width / 2.0;
        let cy = rect.height / 2.0;
        Self {
            lift_px: HOVER_LIFT_PX,
            scale: HOVER_SCALE,
            rotate_x_deg: (y - cy) / TILT_DIVISOR,
            rotate_y_deg: Some((cx - x) / TILT_DIVISOR),
        }
    }
}

/// Placement of a ripple inside the pressed card, in card-local pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleGeometry {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

impl RippleGeometry {
    /// Square ripple sized to the card's longer side, centred on the pointer.
    /// A missing or zero pointer coordinate falls back to the card's center on
    /// that axis (keyboard-triggered clicks report 0).
    pub fn at(rect: &Rect, pointer: Option<(f64, f64)>) -> Self {
        let size = rect.width.max(rect.height);
        let (cx, cy) = rect.center();
        let (px, py) = match pointer {
            Some((x, y)) => (
                if x != 0.0 { x } else { cx },
                if y != 0.0 { y } else { cy },
            ),
            None => (cx, cy),
        };
        Self {
            size,
            left: px - rect.left - size / 2.0,
            top: py - rect.top - size / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follow_is_flat_at_center() {
        let rect = Rect::new(100.0, 50.0, 200.0, 120.0);
        let t = Tilt::follow(&rect, 200.0, 110.0);
        assert_eq!(t.rotate_x_deg, 0.0);
        assert_eq!(t.rotate_y_deg, Some(0.0));
    }

    #[test]
    fn follow_tips_toward_pointer() {
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        // bottom-left corner
        let t = Tilt::follow(&rect, 0.0, 100.0);
        assert_eq!(t.rotate_x_deg, 5.0);
        assert_eq!(t.rotate_y_deg, Some(10.0));
        assert_eq!(t.lift_px, 10.0);
    }

    #[test]
    fn ripple_centres_on_pointer() {
        let rect = Rect::new(10.0, 20.0, 300.0, 100.0);
        let g = RippleGeometry::at(&rect, Some((60.0, 70.0)));
        assert_eq!(g.size, 300.0);
        assert_eq!(g.left, 60.0 - 10.0 - 150.0);
        assert_eq!(g.top, 70.0 - 20.0 - 150.0);
    }

    #[test]
    fn ripple_without_pointer_uses_center() {
        let rect = Rect::new(0.0, 0.0, 80.0, 120.0);
        let g = RippleGeometry::at(&rect, None);
        assert_eq!(g, RippleGeometry { size: 120.0, left: -20.0, top: 0.0 });
        assert_eq!(RippleGeometry::at(&rect, Some((0.0, 0.0))), g);
    }
}
