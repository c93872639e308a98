//! Raw little-endian PCM to any writer.

use super::*;
use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::Path;

/// Writes interleaved 16-bit little-endian samples with no header, e.g. for
/// piping into `aplay -f S16_LE` or `ffplay -f s16le`.
pub struct RawSink<W: Write> {
    writer: W,
    format: StreamFormat,
    scratch: Vec<u8>,
}

impl<W: Write> RawSink<W> {
    pub fn new(writer: W, format: StreamFormat) -> Self {
        Self {
            writer,
            scratch: Vec::with_capacity(format.buffer_bytes()),
            format,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl RawSink<BufWriter<File>> {
    /// Creates (or truncates) the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file could not be created.
    pub fn create<P: AsRef<Path>>(
        path: P,
        format: StreamFormat,
    ) -> Result<Self, SinkError> {
        Ok(Self::new(BufWriter::new(File::create(path)?), format))
    }
}

impl RawSink<Stdout> {
    pub fn stdout(format: StreamFormat) -> Self {
        Self::new(io::stdout(), format)
    }
}

impl<W: Write> AudioSink for RawSink<W> {
    fn format(&self) -> &StreamFormat {
        &self.format
    }

    fn write(&mut self, buffer: &AudioBuffer) -> Result<(), SinkError> {
        self.scratch.clear();
        buffer.write_le_bytes(&mut self.scratch);

        self.writer.write_all(&self.scratch)?;

        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}
