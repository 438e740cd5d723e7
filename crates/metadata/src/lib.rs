use std::path::Path;

use lofty::config::ParseOptions;
use lofty::error::LoftyError;
use lofty::prelude::AudioFile;
use lofty::probe::Probe;

#[derive(Debug)]
pub enum MetadataError {
    Io(std::io::Error),
    Lofty(LoftyError),
}

impl std::fmt::Display for MetadataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetadataError::Io(err) => write!(f, "io error: {}", err),
            MetadataError::Lofty(err) => write!(f, "parse error: {}", err),
        }
    }
}

impl std::error::Error for MetadataError {}

impl From<std::io::Error> for MetadataError {
    fn from(err: std::io::Error) -> Self {
        MetadataError::Io(err)
    }
}

impl From<LoftyError> for MetadataError {
    fn from(err: LoftyError) -> Self {
        MetadataError::Lofty(err)
    }
}

/// Playback duration of an audio file in seconds.
///
/// The format is sniffed from the file contents, so a misnamed file still
/// parses. Embedded pictures are never decoded. A zero duration is reported
/// as `None`.
pub fn read_duration(path: &Path) -> Result<Option<f64>, MetadataError> {
    let options = ParseOptions::new().read_cover_art(false);
    let tagged_file = Probe::open(path)?
        .options(options)
        .guess_file_type()?
        .read()?;

    let duration = tagged_file.properties().duration();
    if duration.is_zero() {
        return Ok(None);
    }
    Ok(Some(duration.as_secs_f64()))
}
