use crate::constants::*;
use rand::Rng;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Ambient,
    Heart,
}

impl ElementKind {
    pub const ALL: [ElementKind; 2] = [ElementKind::Ambient, ElementKind::Heart];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Ambient => "ambient",
            ElementKind::Heart => "heart",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of one spawned element, unique for the lifetime of a manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// One transient particle or heart, as sampled at spawn time.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualElement {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Horizontal position in CSS pixels, in `[0, viewport_width)`.
    pub x_px: f64,
    /// CSS `animation-delay`; always zero for hearts.
    pub delay_sec: f64,
    /// CSS `animation-duration`.
    pub duration_sec: f64,
    /// Font size for hearts; `None` for ambient particles.
    pub font_rem: Option<f64>,
    pub created_at_ms: f64,
    /// Time until removal, rounded to whole milliseconds.
    pub ttl_ms: u32,
}

impl VisualElement {
    /// Sample a fresh element of `kind` against the current viewport width.
    pub fn sample<R: Rng>(
        kind: ElementKind,
        id: ElementId,
        viewport_width: f64,
        created_at_ms: f64,
        rng: &mut R,
    ) -> Self {
        let x_px = if viewport_width > 0.0 {
            rng.gen_range(0.0..viewport_width)
        } else {
            0.0
        };
        let (delay_sec, duration_sec, font_rem) = match kind {
            ElementKind::Ambient => {
                let delay = rng.gen::<f64>() * AMBIENT_DELAY_MAX_SEC;
                let duration =
                    AMBIENT_DURATION_MIN_SEC + rng.gen::<f64>() * AMBIENT_DURATION_SPAN_SEC;
                (delay, duration, None)
            }
            ElementKind::Heart => {
                let size = HEART_SIZE_MIN + rng.gen::<f64>() * HEART_SIZE_SPAN;
                let duration = HEART_DURATION_MIN_SEC + rng.gen::<f64>() * HEART_DURATION_SPAN_SEC;
                (0.0, duration, Some(size * HEART_FONT_SCALE_REM))
            }
        };
        Self {
            id,
            kind,
            x_px,
            delay_sec,
            duration_sec,
            font_rem,
            created_at_ms,
            ttl_ms: lifetime_ms(delay_sec, duration_sec),
        }
    }

    pub fn expires_at_ms(&self) -> f64 {
        self.created_at_ms + self.ttl_ms as f64
    }
}

#[inline]
pub fn lifetime_ms(delay_sec: f64, duration_sec: f64) -> u32 {
    ((delay_sec + duration_sec) * 1000.0).round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn ambient_lifetime_covers_delay_and_duration() {
        let mut rng = StdRng::seed_from_u64(7);
        for i in 0..200 {
            let el =
                VisualElement::sample(ElementKind::Ambient, ElementId(i), 1280.0, 0.0, &mut rng);
            assert!(el.delay_sec >= 0.0 && el.delay_sec < AMBIENT_DELAY_MAX_SEC);
            assert!(el.duration_sec >= 6.0 && el.duration_sec <= 10.0);
            assert_eq!(el.ttl_ms, lifetime_ms(el.delay_sec, el.duration_sec));
            assert!(el.font_rem.is_none());
        }
    }

    #[test]
    fn hearts_have_no_delay_and_scaled_font() {
        let mut rng = StdRng::seed_from_u64(11);
        for i in 0..200 {
            let el = VisualElement::sample(ElementKind::Heart, ElementId(i), 800.0, 50.0, &mut rng);
            assert_eq!(el.delay_sec, 0.0);
            assert!(el.duration_sec >= 4.0 && el.duration_sec <= 6.0);
            let font = el.font_rem.unwrap();
            assert!(font >= 0.8 * 1.5 && font <= 1.6 * 1.5);
            assert!(el.ttl_ms >= 4000 && el.ttl_ms <= 6000);
            assert_eq!(el.expires_at_ms(), 50.0 + el.ttl_ms as f64);
        }
    }

    #[test]
    fn zero_width_viewport_pins_to_left_edge() {
        let mut rng = StdRng::seed_from_u64(3);
        let el = VisualElement::sample(ElementKind::Heart, ElementId(0), 0.0, 0.0, &mut rng);
        assert_eq!(el.x_px, 0.0);
    }

    #[test]
    fn lifetime_rounds_to_whole_millis() {
        assert_eq!(lifetime_ms(0.0, 4.0), 4000);
        assert_eq!(lifetime_ms(1.25, 6.0), 7250);
        assert_eq!(lifetime_ms(0.0004, 4.0), 4000);
        assert_eq!(lifetime_ms(0.0, 0.0), 0);
    }
}
