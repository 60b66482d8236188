// Inline CSS produced for effect nodes.
//
// Kept free of `web_sys` so host tests can include it directly.

use effects_core::{ElementKind, RippleGeometry, Tilt, VisualElement};

/// `style` attribute for a particle or heart node.
pub fn visual_css(element: &VisualElement) -> String {
    match (element.kind, element.font_rem) {
        (ElementKind::Heart, Some(font_rem)) => format!(
            "left: {:.2}px; font-size: {:.3}rem; animation-duration: {:.3}s;",
            element.x_px, font_rem, element.duration_sec
        ),
        _ => format!(
            "left: {:.2}px; animation-delay: {:.3}s; animation-duration: {:.3}s;",
            element.x_px, element.delay_sec, element.duration_sec
        ),
    }
}

pub fn ripple_css(g: &RippleGeometry) -> String {
    format!(
        "position: absolute; width: {size:.2}px; height: {size:.2}px; left: {:.2}px; top: {:.2}px; \
         background: radial-gradient(circle, rgba(255,255,255,0.6) 0%, transparent 70%); \
         border-radius: 50%; transform: scale(0); animation: ripple 0.6s ease-out; \
         pointer-events: none; z-index: 10;",
        g.left,
        g.top,
        size = g.size
    )
}

pub const RIPPLE_KEYFRAMES: &str = "@keyframes ripple { to { transform: scale(2); opacity: 0; } }";

pub fn tilt_transform(t: &Tilt) -> String {
    let mut s = format!(
        "translateY(-{}px) scale({}) rotateX({:.2}deg)",
        t.lift_px, t.scale, t.rotate_x_deg
    );
    if let Some(ry) = t.rotate_y_deg {
        s.push_str(&format!(" rotateY({:.2}deg)", ry));
    }
    s
}
