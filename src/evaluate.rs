use crate::{
    error::Error,
    geometry, load,
    pose::{Landmark, LandmarkKind, Landmarks},
    status::{Status, Thresholds},
};
use std::{convert::TryFrom, str::FromStr};

const DEFAULT_TRUNK_LOW: &str = "20";
const DEFAULT_TRUNK_HIGH: &str = "40";
const DEFAULT_LOAD_LOW: &str = "30";
const DEFAULT_LOAD_HIGH: &str = "60";
const DEFAULT_KNEE_SIDE: &str = "left";

const TRUNK_THRESHOLDS: Thresholds = Thresholds {
    low: 20.0,
    high: 40.0,
};
const LOAD_THRESHOLDS: Thresholds = Thresholds {
    low: 30.0,
    high: 60.0,
};

const LEFT_LEG: [LandmarkKind; 3] = [
    LandmarkKind::LeftHip,
    LandmarkKind::LeftKnee,
    LandmarkKind::LeftAnkle,
];
const RIGHT_LEG: [LandmarkKind; 3] = [
    LandmarkKind::RightHip,
    LandmarkKind::RightKnee,
    LandmarkKind::RightAnkle,
];

/// Which leg the knee angle is measured on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KneeSide {
    Left,
    Right,
    /// The leg whose least visible joint is more visible than the other leg's. Ties go left.
    MostVisible,
}

impl KneeSide {
    pub const VARIANTS: [&'static str; 3] = ["left", "right", "most-visible"];

    fn leg(self, landmarks: Landmarks<'_>) -> Result<[LandmarkKind; 3], Error> {
        Ok(match self {
            Self::Left => LEFT_LEG,
            Self::Right => RIGHT_LEG,
            Self::MostVisible => {
                if min_visibility(landmarks, RIGHT_LEG)? > min_visibility(landmarks, LEFT_LEG)? {
                    RIGHT_LEG
                } else {
                    LEFT_LEG
                }
            }
        })
    }
}

impl FromStr for KneeSide {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "most-visible" => Ok(Self::MostVisible),
            other => Err(Error::ParseKneeSide(other.to_owned())),
        }
    }
}

impl Default for KneeSide {
    fn default() -> Self {
        Self::Left
    }
}

fn min_visibility(landmarks: Landmarks<'_>, leg: [LandmarkKind; 3]) -> Result<f32, Error> {
    leg.iter()
        .try_fold(f32::INFINITY, |min, &kind| -> Result<f32, Error> {
            Ok(min.min(landmarks.get(kind)?.visibility))
        })
}

#[derive(Debug, Clone, Copy, PartialEq, structopt::StructOpt)]
pub struct Config {
    /// Trunk angle in degrees at which the trunk status becomes "warning".
    #[structopt(long, default_value = DEFAULT_TRUNK_LOW)]
    pub trunk_low: f32,
    /// Trunk angle in degrees at which the trunk status becomes "danger".
    #[structopt(long, default_value = DEFAULT_TRUNK_HIGH)]
    pub trunk_high: f32,
    /// Load score at which the load status becomes "warning".
    #[structopt(long, default_value = DEFAULT_LOAD_LOW)]
    pub load_low: f32,
    /// Load score at which the load status becomes "danger".
    #[structopt(long, default_value = DEFAULT_LOAD_HIGH)]
    pub load_high: f32,
    /// Leg used to measure the knee angle.
    #[structopt(long, default_value = DEFAULT_KNEE_SIDE, possible_values = &KneeSide::VARIANTS)]
    pub knee_side: KneeSide,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trunk_low: TRUNK_THRESHOLDS.low,
            trunk_high: TRUNK_THRESHOLDS.high,
            load_low: LOAD_THRESHOLDS.low,
            load_high: LOAD_THRESHOLDS.high,
            knee_side: KneeSide::default(),
        }
    }
}

/// Metrics for a single frame.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub trunk_angle: f32,
    pub knee_angle: f32,
    pub load_score: f32,
    /// `100 - load_score`, rounded. Higher is better.
    pub posture_score: f32,
    pub trunk_status: Status,
    pub load_status: Status,
}

/// Turns a landmark set into an [`Evaluation`]. Holds configuration only, no
/// per-frame state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluator {
    trunk: Thresholds,
    load: Thresholds,
    knee_side: KneeSide,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self {
            trunk: TRUNK_THRESHOLDS,
            load: LOAD_THRESHOLDS,
            knee_side: KneeSide::default(),
        }
    }
}

impl Evaluator {
    pub fn new(config: Config) -> Result<Self, Error> {
        Ok(Self {
            trunk: Thresholds::new("trunk", config.trunk_low, config.trunk_high)?,
            load: Thresholds::new("load", config.load_low, config.load_high)?,
            knee_side: config.knee_side,
        })
    }

    /// Evaluate one frame. Fails with [`Error::InsufficientLandmarks`] when the
    /// set is too short, in which case the frame should be skipped.
    pub fn evaluate(&self, landmarks: &[Landmark]) -> Result<Evaluation, Error> {
        let landmarks = Landmarks::try_from(landmarks)?;

        let shoulder_mid = landmarks
            .point(LandmarkKind::LeftShoulder)?
            .midpoint(landmarks.point(LandmarkKind::RightShoulder)?);
        let hip_mid = landmarks
            .point(LandmarkKind::LeftHip)?
            .midpoint(landmarks.point(LandmarkKind::RightHip)?);
        let trunk_angle = geometry::trunk_tilt(shoulder_mid, hip_mid);

        let [hip, knee, ankle] = self.knee_side.leg(landmarks)?;
        let knee_angle = geometry::joint_angle(
            landmarks.point(hip)?,
            landmarks.point(knee)?,
            landmarks.point(ankle)?,
        );

        let load_score = load::estimate(trunk_angle, knee_angle);

        Ok(Evaluation {
            trunk_angle,
            knee_angle,
            load_score,
            posture_score: (load::MAX_LOAD - load_score).round(),
            trunk_status: self.trunk.classify(trunk_angle),
            load_status: self.load.classify(load_score),
        })
    }
}

/// Evaluate a frame with the default thresholds and the left knee.
pub fn evaluate(landmarks: &[Landmark]) -> Result<Evaluation, Error> {
    Evaluator::default().evaluate(landmarks)
}
