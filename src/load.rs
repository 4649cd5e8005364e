//! Staged ergonomic load scoring.
//!
//! Scores follow coarse risk-table bands rather than a continuous model: the
//! trunk angle selects one of four base loads and a bent knee subtracts a flat
//! discount.

pub const MIN_LOAD: f32 = 0.0;
pub const MAX_LOAD: f32 = 100.0;

/// `(upper bound exclusive, base load)` for the trunk angle in degrees.
const TRUNK_BANDS: [(f32, f32); 3] = [(15.0, 0.0), (30.0, 30.0), (45.0, 60.0)];
const TRUNK_SEVERE_LOAD: f32 = 100.0;

/// `(upper bound exclusive, correction)` for the knee angle in degrees.
const KNEE_BANDS: [(f32, f32); 2] = [(120.0, -20.0), (150.0, -10.0)];
const KNEE_STRAIGHT_CORRECTION: f32 = 0.0;

fn trunk_base(trunk_angle: f32) -> f32 {
    TRUNK_BANDS
        .iter()
        .find(|&&(bound, _)| trunk_angle < bound)
        .map_or(TRUNK_SEVERE_LOAD, |&(_, load)| load)
}

fn knee_correction(knee_angle: f32) -> f32 {
    KNEE_BANDS
        .iter()
        .find(|&&(bound, _)| knee_angle < bound)
        .map_or(KNEE_STRAIGHT_CORRECTION, |&(_, correction)| correction)
}

/// Map a trunk angle and a knee angle (both in degrees) to a load score in `[0, 100]`.
pub fn estimate(trunk_angle: f32, knee_angle: f32) -> f32 {
    (trunk_base(trunk_angle) + knee_correction(knee_angle)).clamp(MIN_LOAD, MAX_LOAD)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod estimate_tests {
        use super::estimate;

        #[test]
        fn trunk_band_boundaries() {
            assert_eq!(estimate(14.9, 200.0), 0.0);
            assert_eq!(estimate(15.0, 200.0), 30.0);
            assert_eq!(estimate(29.9, 200.0), 30.0);
            assert_eq!(estimate(30.0, 200.0), 60.0);
            assert_eq!(estimate(44.9, 160.0), 60.0);
            assert_eq!(estimate(45.0, 160.0), 100.0);
        }

        #[test]
        fn knee_discount() {
            assert_eq!(estimate(45.0, 100.0), 80.0);
            assert_eq!(estimate(45.0, 120.0), 90.0);
            assert_eq!(estimate(45.0, 149.9), 90.0);
            assert_eq!(estimate(45.0, 150.0), 100.0);
        }

        #[test]
        fn clamped_at_zero() {
            assert_eq!(estimate(0.0, 90.0), 0.0);
            assert_eq!(estimate(-10.0, 10.0), 0.0);
        }

        #[test]
        fn bounded_for_extreme_inputs() {
            for &trunk in &[f32::MIN, -1e6, 0.0, 1e6, f32::MAX, f32::INFINITY] {
                for &knee in &[f32::NEG_INFINITY, -1e6, 0.0, 1e6, f32::MAX] {
                    let load = estimate(trunk, knee);
                    assert!((0.0..=100.0).contains(&load), "{}", load);
                }
            }
        }

        #[test]
        fn non_decreasing_in_trunk_angle() {
            for &knee in &[90.0, 130.0, 175.0] {
                let mut previous = estimate(0.0, knee);
                for step in 1..=1800 {
                    let load = estimate(step as f32 * 0.1, knee);
                    assert!(load >= previous, "{} < {} at step {}", load, previous, step);
                    previous = load;
                }
            }
        }
    }
}
