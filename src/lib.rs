//! Ergonomic load estimation from body pose landmarks.
//!
//! A frame of 33 normalized landmarks is reduced to a trunk tilt and a knee
//! angle, which are mapped to a banded load score and good/warning/danger
//! status labels. Evaluation is a pure function of one frame.

pub mod error;
pub mod evaluate;
pub mod frames;
pub mod gauge;
pub mod geometry;
pub mod load;
pub mod point;
pub mod pose;
pub mod stats;
pub mod status;

pub use error::Error;
pub use evaluate::{evaluate, Config, Evaluation, Evaluator, KneeSide};
pub use pose::{Landmark, LandmarkKind, NUM_LANDMARKS};
pub use status::Status;
