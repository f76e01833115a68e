//! GeoJSONL source file: sequential line reads, byte position for
//! progress, and rewind between runs.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use tracing::debug;

use crate::error::{ExtractError, Result};

const READ_BUFFER_SIZE: usize = 256 * 1024;

/// How the source bytes are stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
}

impl Compression {
    /// Pick by file extension: `.gz` is gzip, anything else plain text.
    pub fn from_path(path: &Path) -> Self {
        if path.extension().map_or(false, |e| e == "gz") {
            Compression::Gzip
        } else {
            Compression::None
        }
    }
}

/// An opened GeoJSONL file, exclusively owned by one extractor.
#[derive(Debug)]
pub struct Source {
    path: PathBuf,
    file: File,
    len: u64,
    compression: Compression,
}

impl Source {
    /// Open `path` for sequential reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ExtractError::SourceNotFound(path.to_path_buf()));
        }

        let unreadable = |source| ExtractError::SourceUnreadable {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(unreadable)?;
        let len = file.metadata().map_err(unreadable)?.len();
        let compression = Compression::from_path(path);

        debug!(
            "Opened {} ({} bytes, {:?})",
            path.display(),
            len,
            compression
        );

        Ok(Self {
            path: path.to_path_buf(),
            file,
            len,
            compression,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the file on disk (compressed size for gzip sources).
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Start reading lines from the beginning of the file.
    pub fn lines(&mut self) -> io::Result<Lines<'_>> {
        self.file.rewind()?;
        let counted = Counted {
            inner: &mut self.file,
            count: 0,
        };
        Ok(match self.compression {
            Compression::None => Lines::Plain(BufReader::with_capacity(READ_BUFFER_SIZE, counted)),
            Compression::Gzip => Lines::Gzip(BufReader::with_capacity(
                READ_BUFFER_SIZE,
                MultiGzDecoder::new(counted),
            )),
        })
    }

    /// Put the read cursor back to the start of the file.
    pub fn rewind(&mut self) -> io::Result<()> {
        self.file.rewind()
    }
}

/// Line reader over a [`Source`].
pub enum Lines<'a> {
    Plain(BufReader<Counted<&'a mut File>>),
    Gzip(BufReader<MultiGzDecoder<Counted<&'a mut File>>>),
}

impl<'a> Lines<'a> {
    /// Read the next line into `buf` (cleared first), without its line
    /// terminator. Returns false at end of stream.
    pub fn next_line(&mut self, buf: &mut Vec<u8>) -> io::Result<bool> {
        buf.clear();
        let read = match self {
            Lines::Plain(reader) => reader.read_until(b'\n', buf)?,
            Lines::Gzip(reader) => reader.read_until(b'\n', buf)?,
        };
        if read == 0 {
            return Ok(false);
        }

        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        Ok(true)
    }

    /// Bytes of the underlying file consumed so far.
    ///
    /// Exact for plain sources. For gzip sources this counts compressed
    /// bytes pulled into the decoder, which runs slightly ahead of the
    /// lines handed out.
    pub fn position(&self) -> u64 {
        match self {
            Lines::Plain(reader) => reader.get_ref().count - reader.buffer().len() as u64,
            Lines::Gzip(reader) => reader.get_ref().get_ref().count,
        }
    }
}

/// Reader adapter counting the bytes read through it.
pub struct Counted<R> {
    inner: R,
    count: u64,
}

impl<R: Read> Read for Counted<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count += n as u64;
        Ok(n)
    }
}
