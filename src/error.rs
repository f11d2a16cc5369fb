//! Error types shared by grammar construction, color handling, and interpretation.

use thiserror::Error;

/// Root error type for every fallible operation in the crate.
#[derive(Error, Debug)]
pub enum LSystemError {
    /// A rule left-hand side was not exactly one character.
    #[error("rules map key `{0}` must have length 1")]
    RuleKeyLength(String),

    /// A name table key was not exactly one character.
    #[error("names map key `{0}` must have length 1")]
    NameKeyLength(String),

    /// A seed or rule character has no command registered in the name table.
    #[error("symbol `{0}` has no named command")]
    UnnamedSymbol(char),

    /// An RGB triple had a component outside `[0, 255]`.
    #[error("({r}, {g}, {b}) is not a valid RGB triple")]
    ColorOutOfRange { r: i64, g: i64, b: i64 },

    /// A gradient was built from an empty color list.
    #[error("gradient must have at least one color")]
    EmptyGradient,

    /// A hex color string could not be parsed.
    #[error("invalid hex color `{0}`: expected 6 hex digits")]
    InvalidHexColor(String),

    /// A restore command ran with nothing saved on the position stack.
    #[error("position stack underflow: restore at command {index} has no matching store")]
    StackUnderflow { index: usize },

    /// Invalid configuration value.
    #[error("config error: {0}")]
    Config(String),

    /// A scene description could not be parsed.
    #[error("scene parse error: {0}")]
    Scene(#[from] serde_json::Error),

    /// Writing the rendered image failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type LSystemResult<T> = Result<T, LSystemError>;
