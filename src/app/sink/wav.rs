//! 16-bit PCM WAV files.

use super::*;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Renders the stream into a WAV file. The header is finalised by
/// [`finish()`](AudioSink::finish), or when the sink is dropped.
pub struct WavSink {
    writer: Option<WavWriter<BufWriter<File>>>,
    format: StreamFormat,
}

impl WavSink {
    /// # Errors
    ///
    /// Returns an error if the file could not be created, or if the format
    /// has more channels than WAV allows.
    pub fn create<P: AsRef<Path>>(
        path: P,
        format: StreamFormat,
    ) -> Result<Self, SinkError> {
        let channels = u16::try_from(format.channels).map_err(|_| {
            SinkError::Unsupported(format!(
                "{} channels in a WAV file",
                format.channels
            ))
        })?;

        let spec = WavSpec {
            channels,
            sample_rate: format.sample_rate,
            bits_per_sample: format.bits_per_sample(),
            sample_format: SampleFormat::Int,
        };

        Ok(Self { writer: Some(WavWriter::create(path, spec)?), format })
    }
}

impl AudioSink for WavSink {
    fn format(&self) -> &StreamFormat {
        &self.format
    }

    fn write(&mut self, buffer: &AudioBuffer) -> Result<(), SinkError> {
        let writer = self.writer.as_mut().ok_or(SinkError::Closed)?;

        for &s in buffer.samples() {
            writer.write_sample(s)?;
        }

        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        match self.writer.take() {
            Some(writer) => Ok(writer.finalize()?),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_a_readable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        let format = StreamFormat { sample_rate: 8000, channels: 2, frames_per_buffer: 3 };

        let mut sink = WavSink::create(&path, format).unwrap();
        let mut buffer = AudioBuffer::new(&format);
        buffer.samples_mut().copy_from_slice(&[1, 1, 2, 2, -3, -3]);

        sink.write(&buffer).unwrap();
        sink.write(&buffer).unwrap();
        sink.finish().unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().channels, 2);
        assert_eq!(reader.spec().sample_rate, 8000);
        assert_eq!(reader.spec().bits_per_sample, 16);

        let samples: Vec<i16> =
            reader.samples::<i16>().map(Result::unwrap).collect();
        assert_eq!(samples, [1, 1, 2, 2, -3, -3, 1, 1, 2, 2, -3, -3]);
    }

    #[test]
    fn closed_after_finish() {
        let dir = tempfile::tempdir().unwrap();
        let format = StreamFormat { sample_rate: 8000, channels: 1, frames_per_buffer: 3 };

        let mut sink = WavSink::create(dir.path().join("a.wav"), format).unwrap();
        sink.finish().unwrap();

        assert!(matches!(
            sink.write(&AudioBuffer::new(&format)),
            Err(SinkError::Closed)
        ));
    }
}
