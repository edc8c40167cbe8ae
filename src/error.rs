use std::fmt;

use thiserror::Error;

pub type GraphResult<T> = Result<T, GraphError>;

/// Axis of a scale, used to report degenerate domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleAxis {
    Time,
    Value,
}

impl fmt::Display for ScaleAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Time => f.write_str("time"),
            Self::Value => f.write_str("value"),
        }
    }
}

/// Dataset element kind, used to report malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Point,
    Annotation,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point => f.write_str("point"),
            Self::Annotation => f.write_str("annotation"),
        }
    }
}

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("data not found for \"{name}\"")]
    DatasetNotFound { name: String },

    #[error("degenerate {axis} scale: domain has zero width")]
    DegenerateScale { axis: ScaleAxis },

    #[error("malformed {kind} #{index} in dataset \"{dataset}\": {reason}")]
    MalformedPoint {
        dataset: String,
        kind: ElementKind,
        index: usize,
        reason: String,
    },

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
