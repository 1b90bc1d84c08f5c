#[cfg(feature = "serde")]
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlainTextConfig {
    /// Append the error's source chain below the status line.
    pub trace: bool,
}

impl Default for PlainTextConfig {
    fn default() -> Self {
        Self { trace: true }
    }
}
