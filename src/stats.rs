use crate::{error::Error, evaluate::Evaluation, status::Status};
use num_traits::cast::ToPrimitive;
use std::time::Duration;

/// Running totals for one session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tally {
    evaluated: usize,
    skipped: usize,
    malformed: usize,
    load_status: [usize; 3],
    posture_total: f64,
    elapsed: Duration,
}

impl Tally {
    pub fn record(&mut self, evaluation: &Evaluation, elapsed: Duration) {
        self.evaluated += 1;
        self.load_status[evaluation.load_status as usize] += 1;
        self.posture_total += f64::from(evaluation.posture_score);
        self.elapsed += elapsed;
    }

    /// A frame with too few landmarks.
    pub fn skip(&mut self) {
        self.skipped += 1;
    }

    /// A frame that could not be parsed.
    pub fn malformed(&mut self) {
        self.malformed += 1;
    }

    pub fn evaluated(&self) -> usize {
        self.evaluated
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn malformed_frames(&self) -> usize {
        self.malformed
    }

    pub fn frames(&self) -> usize {
        self.evaluated + self.skipped + self.malformed
    }

    /// Number of evaluated frames whose load fell into `status`.
    pub fn count(&self, status: Status) -> usize {
        self.load_status[status as usize]
    }

    pub fn mean_posture_score(&self) -> Result<Option<f64>, Error> {
        if self.evaluated == 0 {
            return Ok(None);
        }
        let evaluated = self.evaluated.to_f64().ok_or(Error::ConvertToF64)?;
        Ok(Some(self.posture_total / evaluated))
    }

    pub fn fps_text(&self) -> Result<String, Error> {
        let evaluated = self.evaluated.to_f64().ok_or(Error::ConvertToF64)?;
        let secs = self.elapsed.as_secs_f64();
        let fps = if secs > 0.0 { evaluated / secs } else { 0.0 };
        Ok(format!("FPS => eval: {:.1}", fps))
    }

    pub fn summary(&self) -> Result<String, Error> {
        let mean = match self.mean_posture_score()? {
            Some(mean) => format!("{:.1}", mean),
            None => "-".to_owned(),
        };
        Ok(format!(
            "{} frames: {} evaluated, {} skipped, {} malformed; mean posture {}; load {}/{}/{} good/warning/danger",
            self.frames(),
            self.evaluated,
            self.skipped,
            self.malformed,
            mean,
            self.count(Status::Good),
            self.count(Status::Warning),
            self.count(Status::Danger),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::{
        evaluate,
        tests::{stooped, upright},
    };
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn empty_session() {
        let tally = Tally::default();
        assert_eq!(tally.frames(), 0);
        assert_eq!(tally.mean_posture_score().unwrap(), None);
        assert_eq!(tally.fps_text().unwrap(), "FPS => eval: 0.0");
    }

    #[test]
    fn counts_and_mean() {
        let mut tally = Tally::default();
        tally.record(&evaluate(&upright()).unwrap(), Duration::from_millis(10));
        tally.record(&evaluate(&stooped()).unwrap(), Duration::from_millis(10));
        tally.skip();
        tally.malformed();

        assert_eq!(tally.frames(), 4);
        assert_eq!(tally.evaluated(), 2);
        assert_eq!(tally.skipped(), 1);
        assert_eq!(tally.malformed_frames(), 1);
        assert_eq!(tally.count(Status::Good), 1);
        assert_eq!(tally.count(Status::Warning), 0);
        assert_eq!(tally.count(Status::Danger), 1);
        assert_approx_eq!(tally.mean_posture_score().unwrap().unwrap(), 60.0);
        assert_eq!(tally.fps_text().unwrap(), "FPS => eval: 100.0");
    }

    #[test]
    fn summary_line() {
        let mut tally = Tally::default();
        tally.record(&evaluate(&upright()).unwrap(), Duration::from_millis(1));
        tally.skip();
        assert_eq!(
            tally.summary().unwrap(),
            "2 frames: 1 evaluated, 1 skipped, 0 malformed; mean posture 100.0; load 1/0/0 good/warning/danger"
        );
    }
}
