use crate::{error::Error, point::Point};
use num_traits::ToPrimitive;
use std::convert::TryFrom;

/// The 33-point BlazePose landmark topology, in provider order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, num_derive::FromPrimitive, num_derive::ToPrimitive)]
pub enum LandmarkKind {
    Nose,
    LeftEyeInner,
    LeftEye,
    LeftEyeOuter,
    RightEyeInner,
    RightEye,
    RightEyeOuter,
    LeftEar,
    RightEar,
    MouthLeft,
    MouthRight,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftPinky,
    RightPinky,
    LeftIndex,
    RightIndex,
    LeftThumb,
    RightThumb,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftHeel,
    RightHeel,
    LeftFootIndex,
    RightFootIndex,
}

impl LandmarkKind {
    pub fn idx(self) -> Result<usize, Error> {
        self.to_usize().ok_or(Error::LandmarkVariantToUSize(self))
    }
}

pub const NUM_LANDMARKS: usize = LandmarkKind::RightFootIndex as usize + 1;

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Landmark {
    pub point: Point,
    /// Relative depth, when the provider reports one. Unused by the 2D metrics.
    pub z: Option<f32>,
    /// Confidence in `[0, 1]` that the point is actually visible.
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, visibility: f32) -> Result<Self, Error> {
        Ok(Self {
            point: Point::new(x, y)?,
            z: None,
            visibility,
        })
    }
}

/// A landmark slice known to hold at least [`NUM_LANDMARKS`] entries, so that
/// every [`LandmarkKind`] lookup is in bounds.
#[derive(Debug, Copy, Clone)]
pub struct Landmarks<'a> {
    landmarks: &'a [Landmark],
}

impl<'a> TryFrom<&'a [Landmark]> for Landmarks<'a> {
    type Error = Error;

    fn try_from(landmarks: &'a [Landmark]) -> Result<Self, Self::Error> {
        if landmarks.len() < NUM_LANDMARKS {
            return Err(Error::InsufficientLandmarks {
                expected: NUM_LANDMARKS,
                got: landmarks.len(),
            });
        }
        Ok(Self { landmarks })
    }
}

impl<'a> Landmarks<'a> {
    pub fn get(self, kind: LandmarkKind) -> Result<&'a Landmark, Error> {
        let index = kind.idx()?;
        self.landmarks.get(index).ok_or(Error::InsufficientLandmarks {
            expected: NUM_LANDMARKS,
            got: self.landmarks.len(),
        })
    }

    pub fn point(self, kind: LandmarkKind) -> Result<Point, Error> {
        Ok(self.get(kind)?.point)
    }
}
