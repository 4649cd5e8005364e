use crate::point::Point;

/// Unsigned interior angle at `b`, in degrees, between the rays `b -> a` and `b -> c`.
///
/// The result is always in `[0, 180]` and does not depend on the order of `a` and `c`.
pub fn joint_angle(a: Point, b: Point, c: Point) -> f32 {
    let ba = a - b;
    let bc = c - b;
    let radians = bc.y().atan2(bc.x()) - ba.y().atan2(ba.x());
    let angle = radians.to_degrees().abs();
    if angle > 180.0 {
        360.0 - angle
    } else {
        angle
    }
}

/// Tilt of the shoulder -> hip segment away from vertical, in degrees.
///
/// Leaning left and right give the same magnitude; 0 means the shoulders sit
/// directly above the hips.
pub fn trunk_tilt(shoulder_mid: Point, hip_mid: Point) -> f32 {
    let delta = hip_mid - shoulder_mid;
    // x and y are swapped so that 0 is the vertical axis
    delta.x().atan2(delta.y()).to_degrees().abs()
}
