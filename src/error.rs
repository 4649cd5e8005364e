use crate::pose;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("expected at least {expected} landmarks, got {got}")]
    InsufficientLandmarks { expected: usize, got: usize },

    #[error("failed to construct NotNan from f32: {1}")]
    ConstructNotNan(#[source] ordered_float::FloatIsNan, f32),

    #[error("failed to convert landmark variant to usize: {0:?}")]
    LandmarkVariantToUSize(pose::LandmarkKind),

    #[error("failed to parse landmark frame {frame}")]
    ParseFrame {
        #[source]
        source: serde_json::Error,
        frame: usize,
    },

    #[error("landmark frame {frame} is not valid UTF-8")]
    DecodeFrame {
        #[source]
        source: std::io::Error,
        frame: usize,
    },

    #[error("failed to read landmark frame {frame}")]
    ReadFrame {
        #[source]
        source: std::io::Error,
        frame: usize,
    },

    #[error("failed to open input: {1:?}")]
    OpenInput(#[source] std::io::Error, std::path::PathBuf),

    #[error("invalid knee side {0:?}: expected one of left, right, most-visible")]
    ParseKneeSide(String),

    #[error("invalid {metric} thresholds: low {low} is greater than high {high}")]
    InvalidThresholds {
        metric: &'static str,
        low: f32,
        high: f32,
    },

    #[error("failed to convert value to f64")]
    ConvertToF64,

    #[error("failed to serialize evaluation")]
    SerializeEvaluation(#[source] serde_json::Error),

    #[error("failed to write evaluation")]
    WriteEvaluation(#[source] std::io::Error),

    #[error("invalid gauge template")]
    GaugeTemplate(#[source] indicatif::style::TemplateError),
}
