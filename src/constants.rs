/// Page vocabulary: element ids, classes and selectors the front-end binds to.
///
/// Container and section ids the manager looks up itself live in
/// `effects_core::constants`; these are the ones only the wiring needs.
pub const REVEAL_BUTTON_ID: &str = "surpriseBtn";
pub const RIPPLE_STYLE_ID: &str = "ripple-styles";

// Selectors
pub const CARD_SELECTOR: &str = ".card";
pub const MESSAGE_LINE_SELECTOR: &str = ".love-message p";
pub const ANIMATE_ON_VIEW_SELECTOR: &str = ".card, .magic-button";

// Classes
pub const PARTICLE_CLASS: &str = "particle";
pub const HEART_CLASS: &str = "heart";
pub const ANIMATE_IN_CLASS: &str = "animate-in";
pub const LEGACY_BROWSER_CLASS: &str = "legacy-browser";

// Visibility observer
pub const OBSERVER_THRESHOLD: f64 = 0.1;
pub const OBSERVER_ROOT_MARGIN: &str = "0px 0px -50px 0px";

// Window globals that must exist before the effects are mounted
pub const REQUIRED_GLOBALS: [&str; 2] = ["IntersectionObserver", "Promise"];

// Reveal control keys
pub const ACTIVATION_KEYS: [&str; 2] = ["Enter", " "];

#[inline]
pub fn is_activation_key(key: &str) -> bool {
    ACTIVATION_KEYS.contains(&key)
}
