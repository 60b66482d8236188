use crate::element::ElementKind;

/// The only failure the manager models: something it expected on the page is not there.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum EffectError {
    #[error("expected target not found: {what}")]
    MissingTarget { what: String },
    #[error("could not attach {kind} element to its container")]
    AttachFailed { kind: ElementKind },
}

impl EffectError {
    pub fn missing(what: impl Into<String>) -> Self {
        Self::MissingTarget { what: what.into() }
    }
}
