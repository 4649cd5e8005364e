//! Landmark frames in JSON-lines form, one frame per line.
//!
//! Each line is an array of `{"x", "y", "z"?, "visibility"?}` objects in the
//! provider's landmark order. Blank lines, `null` and `[]` are frames without
//! landmarks.

use crate::{error::Error, pose::Landmark, point::Point};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

const STDIN_PATH: &str = "-";

fn default_visibility() -> f32 {
    1.0
}

#[derive(Debug, serde::Deserialize)]
struct RawLandmark {
    x: f32,
    y: f32,
    #[serde(default)]
    z: Option<f32>,
    #[serde(default = "default_visibility")]
    visibility: f32,
}

impl RawLandmark {
    fn into_landmark(self) -> Result<Landmark, Error> {
        Ok(Landmark {
            point: Point::new(self.x, self.y)?,
            z: self.z,
            visibility: self.visibility,
        })
    }
}

/// Parse a single line into a landmark set.
pub fn parse_frame(line: &str, frame: usize) -> Result<Vec<Landmark>, Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str::<Option<Vec<RawLandmark>>>(line)
        .map_err(|source| Error::ParseFrame { source, frame })?
        .unwrap_or_default()
        .into_iter()
        .map(RawLandmark::into_landmark)
        .collect()
}

/// Iterator over the frames of a reader. Frame numbers start at 0.
pub struct Frames<R> {
    reader: R,
    line: String,
    frame: usize,
}

impl<R> Frames<R>
where
    R: BufRead,
{
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            frame: 0,
        }
    }
}

impl<R> Iterator for Frames<R>
where
    R: BufRead,
{
    type Item = Result<Vec<Landmark>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.line.clear();
        let frame = self.frame;
        match self.reader.read_line(&mut self.line) {
            Ok(0) => None,
            Ok(_) => {
                self.frame += 1;
                Some(parse_frame(&self.line, frame))
            }
            // the offending line has been consumed, the next read starts after it
            Err(source) if source.kind() == io::ErrorKind::InvalidData => {
                self.frame += 1;
                Some(Err(Error::DecodeFrame { source, frame }))
            }
            Err(source) => Some(Err(Error::ReadFrame { source, frame })),
        }
    }
}

pub type BoxedFrames = Frames<Box<dyn BufRead + Send>>;

/// Open `path` for reading frames. `None` or `-` reads standard input.
pub fn open<P>(path: Option<P>) -> Result<BoxedFrames, Error>
where
    P: AsRef<Path>,
{
    let reader: Box<dyn BufRead + Send> = match path {
        Some(path) if path.as_ref() != Path::new(STDIN_PATH) => {
            let path = path.as_ref();
            let file =
                File::open(path).map_err(|e| Error::OpenInput(e, path.to_path_buf()))?;
            Box::new(BufReader::new(file))
        }
        _ => Box::new(BufReader::new(io::stdin())),
    };
    Ok(Frames::new(reader))
}
