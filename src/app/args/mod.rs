//! Command-line arguments.

use crate::app::audio::StreamFormat;
use crate::app::params::{Param, ParamStore};
use crate::error::AppError;
use crate::prelude::*;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "murmur", version)]
#[command(about = "Streams endless brown noise with live parameter control")]
pub struct Arguments {
    /// Filter smoothing coefficient in (0, 1]; lower is darker
    #[arg(long, short)]
    pub alpha: Option<f64>,

    /// Frequency of an injected sine tone in Hz; 0 disables it
    #[arg(long, short)]
    pub pitch: Option<f64>,

    /// Linear output gain
    #[arg(long, short = 'g')]
    pub volume: Option<f64>,

    /// JSON file with initial parameters; flags above override it
    #[arg(long)]
    pub preset: Option<PathBuf>,

    /// Fixed noise seed for a reproducible stream
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of buffers cycled through the pipeline
    #[arg(long, default_value_t = POOL_SIZE)]
    pub pool_size: usize,

    /// Length of one buffer in milliseconds
    #[arg(long, default_value_t = BUFFER_DURATION_MS)]
    pub buffer_ms: u64,

    #[arg(long, default_value_t = SAMPLE_RATE)]
    pub sample_rate: u32,

    #[arg(long, default_value_t = NUM_CHANNELS)]
    pub channels: usize,

    /// Write to a file instead of the audio device: `.wav` for WAV, `-` for
    /// raw PCM on stdout, anything else for a raw PCM file
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Stop after this many seconds of audio
    #[arg(long, short)]
    pub duration: Option<f64>,

    /// UDP port for OSC control
    #[arg(long, default_value_t = DEFAULT_OSC_PORT)]
    pub osc_port: u16,

    /// Disable OSC control
    #[arg(long)]
    pub no_osc: bool,

    /// Don't read commands from stdin
    #[arg(long)]
    pub no_console: bool,

    /// More logging; repeat for trace output
    #[arg(long, short, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Where the stream goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Output {
    Device,
    Wav(PathBuf),
    Raw(PathBuf),
    Stdout,
}

impl Arguments {
    /// The default `env_logger` filter, used unless `RUST_LOG` is set.
    pub const fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    pub fn output(&self) -> Output {
        let Some(path) = &self.output else {
            return Output::Device;
        };

        if path.as_os_str() == "-" {
            return Output::Stdout;
        }

        let is_wav = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"));

        if is_wav {
            Output::Wav(path.clone())
        }
        else {
            Output::Raw(path.clone())
        }
    }

    /// # Errors
    ///
    /// Returns an error if any dimension is zero or the buffer is shorter
    /// than one frame.
    pub fn stream_format(&self) -> Result<StreamFormat, AppError> {
        Ok(StreamFormat::new(
            self.sample_rate,
            self.channels,
            Duration::from_millis(self.buffer_ms),
        )?)
    }

    /// The number of buffers covering `--duration`, if given.
    ///
    /// # Errors
    ///
    /// Returns an error if the duration is negative or not finite.
    pub fn max_buffers(
        &self,
        format: &StreamFormat,
    ) -> Result<Option<u64>, AppError> {
        let Some(secs) = self.duration else {
            return Ok(None);
        };

        let duration = Duration::try_from_secs_f64(secs).map_err(|_| {
            AppError::Arguments(format!("invalid duration {secs}"))
        })?;

        Ok(Some(format.buffers_for(duration)))
    }

    /// Applies the parameter flags to `store`.
    ///
    /// # Errors
    ///
    /// Returns the first flag whose value is out of range.
    pub fn apply_overrides(&self, store: &ParamStore) -> Result<(), AppError> {
        let overrides = [
            (Param::Alpha, self.alpha),
            (Param::Pitch, self.pitch),
            (Param::Volume, self.volume),
        ];

        for (param, value) in overrides {
            if let Some(value) = value {
                store.set(param, value)?;
            }
        }

        Ok(())
    }
}
