use thiserror::Error;

/// Rejected widget content.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WidgetError {
    #[error("a dropdown needs at least one level")]
    EmptyLevels,
    #[error("dropdown level {level} does not exist")]
    LevelOutOfRange { level: usize },
    #[error("placeholder {placeholder:?} of level {level} is also a real option")]
    PlaceholderIsOption { level: usize, placeholder: String },
    #[error("invalid slider range: min {min} is greater than max {max}")]
    InvalidRange { min: f64, max: f64 },
    #[error("slider {0} is not a finite number")]
    NonFiniteValue(&'static str),
    #[error("slider precision of {0} digits is not supported")]
    TooManyDigits(u32),
}
