use anyhow::{Context, Result};
use posture_load::{
    error::Error,
    evaluate::{Config, Evaluator},
    frames,
    gauge::{Gauge, JsonLines, Presenter},
    stats::Tally,
};
use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{channel, RecvTimeoutError},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};
use structopt::StructOpt;
use tracing::{debug, info, trace, warn};
use tracing_subscriber::layer::SubscriberExt;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(structopt::StructOpt)]
struct Opt {
    /// JSON-lines file of landmark frames. Reads standard input when absent or "-".
    input: Option<PathBuf>,

    #[structopt(flatten)]
    config: Config,

    /// Write one JSON evaluation per frame to stdout instead of drawing a gauge.
    #[structopt(short, long)]
    json: bool,

    #[structopt(short, long, default_value = "info", env = "RUST_LOG")]
    log_level: tracing_subscriber::filter::EnvFilter,
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    tracing::subscriber::set_global_default(
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .with(opt.log_level),
    )?;

    let evaluator = Evaluator::new(opt.config).context("invalid evaluation thresholds")?;
    let frames = frames::open(opt.input.as_ref()).context("failed opening landmark frames")?;

    let running = Arc::new(AtomicBool::new(true));
    let running_ctrl_c = running.clone();

    ctrlc::set_handler(move || {
        running_ctrl_c.store(false, Ordering::SeqCst);
    })
    .context("failed setting Ctrl-C handler")?;

    let mut presenter: Box<dyn Presenter> = if opt.json {
        Box::new(JsonLines::new(std::io::stdout()))
    } else {
        Box::new(Gauge::new().context("failed building load gauge")?)
    };

    let (frames_tx, frames_rx) = channel();
    let running_read = running.clone();

    // detached: a read blocked on stdin must not hold up shutdown
    thread::spawn(move || {
        for frame in frames {
            let fatal = matches!(frame, Err(Error::ReadFrame { .. }));
            if !running_read.load(Ordering::SeqCst) || frames_tx.send(frame).is_err() || fatal {
                break;
            }
        }
    });

    let mut tally = Tally::default();

    while running.load(Ordering::SeqCst) {
        let frame = match frames_rx.recv_timeout(POLL_INTERVAL) {
            Ok(frame) => frame,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        let landmarks = match frame {
            Ok(landmarks) => landmarks,
            Err(e @ Error::ReadFrame { .. }) => {
                return Err(e).context("failed reading landmark frames");
            }
            Err(e) => {
                warn!(message = "skipping malformed frame", error = %e);
                tally.malformed();
                presenter.skip();
                continue;
            }
        };

        let start = Instant::now();
        match evaluator.evaluate(&landmarks) {
            Ok(evaluation) => {
                tally.record(&evaluation, start.elapsed());
                trace!(?evaluation);
                presenter
                    .show(&evaluation)
                    .context("failed presenting evaluation")?;
            }
            Err(Error::InsufficientLandmarks { expected, got }) => {
                debug!(message = "skipping frame", expected, got);
                tally.skip();
                presenter.skip();
            }
            Err(e) => return Err(e).context("failed evaluating frame"),
        }
    }

    let summary = tally.summary()?;
    presenter
        .finish(&summary)
        .context("failed finishing presentation")?;
    info!(message = "session finished", %summary, fps = %tally.fps_text()?);

    Ok(())
}
