//! Streaming bounding-box extraction over one GeoJSONL source.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::output::FeatureCollectionWriter;
use super::progress::{Progress, DEFAULT_REPORT_EVERY, FOUND_MESSAGE};
use super::source::Source;
use crate::error::{ExtractError, Result};
use crate::logger::Logger;
use crate::models::BoundingBox;
use crate::scan::{ScanProfile, Scanner};

const WRITE_BUFFER_SIZE: usize = 256 * 1024;

/// Tunables of an extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Lines between two progress notifications.
    pub report_every: u64,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            report_every: DEFAULT_REPORT_EVERY,
        }
    }
}

/// Outcome of one [`Extractor::extract`] call.
#[derive(Debug, Clone)]
pub struct ExtractSummary {
    /// Lines read from the source
    pub lines: u64,
    /// Features written to the output
    pub matched: u64,
    pub started: DateTime<Utc>,
    pub finished: DateTime<Utc>,
}

impl ExtractSummary {
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished - self.started
    }
}

/// Reads a GeoJSONL source line by line and writes the features inside
/// a bounding box as one GeoJSON FeatureCollection.
///
/// The extractor owns the source handle. Every call to
/// [`extract`](Self::extract) leaves the read cursor at the start of the
/// file, so the same instance can run again with another box.
pub struct Extractor<L: Logger> {
    source: Source,
    scanner: Scanner,
    options: ExtractOptions,
    logger: L,
}

impl<L: Logger> Extractor<L> {
    /// Open `source` for extraction. Fails if it is missing or unreadable.
    pub fn new(source: impl AsRef<Path>, logger: L) -> Result<Self> {
        let source = Source::open(source)?;
        Ok(Self {
            source,
            scanner: Scanner::default(),
            options: ExtractOptions::default(),
            logger,
        })
    }

    pub fn with_profile(mut self, profile: ScanProfile) -> Self {
        self.scanner = Scanner::new(profile);
        self
    }

    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Write every feature of the source with a point inside `bbox` to
    /// `output`, which is created or truncated.
    pub fn extract(
        &mut self,
        bbox: BoundingBox,
        output: impl AsRef<Path>,
    ) -> Result<ExtractSummary> {
        let output = output.as_ref();
        let file = self.create_output(output)?;
        let started = Utc::now();

        info!(
            "Extracting {} -> {} within {}",
            self.source.path().display(),
            output.display(),
            bbox
        );

        let mut writer =
            FeatureCollectionWriter::new(BufWriter::with_capacity(WRITE_BUFFER_SIZE, file))?;
        let mut progress = Progress::new(self.options.report_every);
        let total = self.source.len();
        let mut lines = self.source.lines()?;
        let mut line = Vec::new();

        while lines.next_line(&mut line)? {
            if progress.lines() == 0 && !self.scanner.profile().preamble_matches(&line) {
                warn!(
                    "First line does not have the expected preamble length ({} bytes); \
                     features may silently fail to match",
                    self.scanner.profile().coordinate_offset
                );
            }

            let report_due = progress.tick();

            if self.scanner.contains(&line, bbox) {
                writer.write_feature(&line)?;
                self.logger.log(FOUND_MESSAGE);
            }

            if report_due {
                self.logger.log(&progress.message(lines.position(), total));
            }
        }
        drop(lines);

        let matched = writer.written();
        writer.finish()?;
        self.source.rewind()?;

        let summary = ExtractSummary {
            lines: progress.lines(),
            matched,
            started,
            finished: Utc::now(),
        };
        debug!("Extraction finished: {:?}", summary);
        Ok(summary)
    }

    fn create_output(&self, output: &Path) -> Result<File> {
        let unwritable = |source| ExtractError::DestinationUnwritable {
            path: output.to_path_buf(),
            source,
        };

        if output.exists() && is_same_file(output, self.source.path()) {
            return Err(unwritable(io::Error::new(
                io::ErrorKind::InvalidInput,
                "output would overwrite the input file",
            )));
        }

        File::create(output).map_err(unwritable)
    }
}

/// Device and inode match, so hard links and symlinks to the input count.
#[cfg(unix)]
fn is_same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (std::fs::metadata(a), std::fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

/// Canonical paths match. Hard links to the input are not detected here.
#[cfg(not(unix))]
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
