use crate::error::Error;
use std::{cmp::Ordering, fmt};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Good,
    Warning,
    Danger,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discretize `value` against two ascending thresholds. A value equal to a
/// threshold falls into the worse band.
pub fn classify(value: f32, low: f32, high: f32) -> Status {
    if value < low {
        Status::Good
    } else if value < high {
        Status::Warning
    } else {
        Status::Danger
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Thresholds {
    pub low: f32,
    pub high: f32,
}

impl Thresholds {
    pub fn new(metric: &'static str, low: f32, high: f32) -> Result<Self, Error> {
        match low.partial_cmp(&high) {
            Some(Ordering::Less) | Some(Ordering::Equal) => Ok(Self { low, high }),
            _ => Err(Error::InvalidThresholds { metric, low, high }),
        }
    }

    pub fn classify(self, value: f32) -> Status {
        classify(value, self.low, self.high)
    }
}
