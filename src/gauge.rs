use crate::{error::Error, evaluate::Evaluation, load};
use indicatif::{ProgressBar, ProgressStyle};
use num_traits::cast::ToPrimitive;
use std::io::Write;

pub const IDLE_MESSAGE: &str = "waiting for landmarks...";

/// Consumer of per-frame evaluations.
pub trait Presenter {
    /// Show the metrics of a freshly evaluated frame.
    fn show(&mut self, evaluation: &Evaluation) -> Result<(), Error>;

    /// A frame was skipped. The previous display stays as it is.
    fn skip(&mut self) {}

    /// The session is over.
    fn finish(&mut self, _summary: &str) -> Result<(), Error> {
        Ok(())
    }
}

/// One-line human readable rendering of an evaluation.
pub fn describe(evaluation: &Evaluation) -> String {
    format!(
        "trunk {:5.1}° [{}]  knee {:5.1}°  posture {:3.0}  load {:3.0} [{}]",
        evaluation.trunk_angle,
        evaluation.trunk_status,
        evaluation.knee_angle,
        evaluation.posture_score,
        evaluation.load_score,
        evaluation.load_status,
    )
}

/// Bar fill for a load score, as a whole percentage.
fn fill(load_score: f32) -> u64 {
    load_score
        .clamp(load::MIN_LOAD, load::MAX_LOAD)
        .round()
        .to_u64()
        .unwrap_or(0)
}

/// Terminal gauge: the bar is filled proportionally to the load score and the
/// message carries the angles, posture score and status labels.
pub struct Gauge {
    bar: ProgressBar,
    last: Option<Evaluation>,
}

impl Gauge {
    pub fn new() -> Result<Self, Error> {
        Self::with_bar(ProgressBar::new(fill(load::MAX_LOAD)))
    }

    /// A gauge that draws nowhere.
    pub fn hidden() -> Result<Self, Error> {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(bar: ProgressBar) -> Result<Self, Error> {
        bar.set_length(fill(load::MAX_LOAD));
        let bar = bar.with_style(
            ProgressStyle::default_bar()
                .template("{prefix:.bold.dim} [{bar:40.cyan/blue}] {wide_msg}")
                .map_err(Error::GaugeTemplate)?
                .progress_chars("#>-"),
        );
        bar.set_prefix("load");
        bar.set_message(IDLE_MESSAGE);
        Ok(Self { bar, last: None })
    }

    /// The evaluation currently on display, if any.
    pub fn last(&self) -> Option<&Evaluation> {
        self.last.as_ref()
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// The text currently shown next to the bar.
    pub fn message(&self) -> String {
        self.bar.message()
    }
}

impl Presenter for Gauge {
    fn show(&mut self, evaluation: &Evaluation) -> Result<(), Error> {
        self.bar.set_position(fill(evaluation.load_score));
        self.bar.set_message(describe(evaluation));
        self.last = Some(*evaluation);
        Ok(())
    }

    fn finish(&mut self, summary: &str) -> Result<(), Error> {
        self.bar.finish_with_message(summary.to_owned());
        Ok(())
    }
}

/// Writes one JSON object per evaluated frame.
pub struct JsonLines<W> {
    writer: W,
}

impl<W> JsonLines<W>
where
    W: Write,
{
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> Presenter for JsonLines<W>
where
    W: Write,
{
    fn show(&mut self, evaluation: &Evaluation) -> Result<(), Error> {
        serde_json::to_writer(&mut self.writer, evaluation).map_err(Error::SerializeEvaluation)?;
        self.writer
            .write_all(b"\n")
            .and_then(|()| self.writer.flush())
            .map_err(Error::WriteEvaluation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::{
        evaluate,
        tests::{stooped, upright},
    };

    #[test]
    fn gauge_starts_idle() {
        let gauge = Gauge::hidden().unwrap();
        assert!(gauge.last().is_none());
        assert_eq!(gauge.position(), 0);
        assert_eq!(gauge.message(), IDLE_MESSAGE);
    }

    #[test]
    fn gauge_stays_idle_until_first_evaluation() {
        let mut gauge = Gauge::hidden().unwrap();
        gauge.skip();
        assert_eq!(gauge.message(), IDLE_MESSAGE);

        let evaluation = evaluate(&upright()).unwrap();
        gauge.show(&evaluation).unwrap();
        assert_eq!(gauge.message(), describe(&evaluation));
    }

    #[test]
    fn gauge_fills_with_load() {
        let mut gauge = Gauge::hidden().unwrap();
        let evaluation = evaluate(&stooped()).unwrap();
        gauge.show(&evaluation).unwrap();
        assert_eq!(gauge.position(), 80);
        assert_eq!(gauge.last(), Some(&evaluation));
    }

    #[test]
    fn gauge_keeps_state_on_skip() {
        let mut gauge = Gauge::hidden().unwrap();
        let evaluation = evaluate(&stooped()).unwrap();
        gauge.show(&evaluation).unwrap();
        gauge.skip();
        assert_eq!(gauge.position(), 80);
        assert_eq!(gauge.last(), Some(&evaluation));
        assert_eq!(gauge.message(), describe(&evaluation));
    }

    #[test]
    fn fill_is_clamped() {
        assert_eq!(fill(-5.0), 0);
        assert_eq!(fill(42.4), 42);
        assert_eq!(fill(250.0), 100);
        assert_eq!(fill(f32::NAN), 0);
    }

    #[test]
    fn describe_contains_labels() {
        let text = describe(&evaluate(&stooped()).unwrap());
        assert!(text.contains("[danger]"), "{}", text);
        assert!(text.contains("posture  20"), "{}", text);
    }

    #[test]
    fn json_lines() {
        let mut json = JsonLines::new(Vec::new());
        json.show(&evaluate(&upright()).unwrap()).unwrap();
        json.skip();
        json.show(&evaluate(&stooped()).unwrap()).unwrap();
        let output = String::from_utf8(json.into_inner()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["postureScore"], 100.0);
        assert_eq!(first["trunkStatus"], "good");
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["loadScore"], 80.0);
        assert_eq!(second["loadStatus"], "danger");
    }

    /// Accepts every byte but cannot be flushed, like a closed pipe.
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn json_lines_write_failure() {
        let mut json = JsonLines::new(ClosedPipe);
        let err = json.show(&evaluate(&upright()).unwrap()).unwrap_err();
        match err {
            Error::WriteEvaluation(source) => {
                assert_eq!(source.kind(), std::io::ErrorKind::BrokenPipe)
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
