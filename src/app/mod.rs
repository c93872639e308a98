//! The streaming pipeline, its sinks and its control surfaces.

use crate::prelude::*;
use log::{debug, info};
use std::sync::Arc;

pub mod args;
pub mod audio;
pub mod console;
pub mod osc;
pub mod params;
pub mod sink;

pub use args::{Arguments, Output};
pub use audio::{Engine, EngineConfig, StopHandle};
pub use params::*;

use crate::error::AppError;
use sink::{AudioSink, DeviceSink, RawSink, WavSink};

/// Runs the streamer until it is stopped, reaches `--duration`, or fails.
///
/// # Errors
///
/// Returns an error for invalid arguments or presets, if a control surface
/// cannot be started, or if the stream fails.
pub fn run(args: &Arguments) -> Result<(), AppError> {
    let params = Arc::new(ParamStore::new());

    if let Some(path) = &args.preset {
        Preset::from_file(path)?.apply_to(&params);
    }
    args.apply_overrides(&params)?;

    let format = args.stream_format()?;
    let config = EngineConfig {
        format,
        pool_size: args.pool_size,
        seed: args.seed,
        max_buffers: args.max_buffers(&format)?,
    };

    info!("parameters: {}", Preset::from_store(&params).to_json());
    debug!("{config:?}");

    let engine = Engine::new(config, Arc::clone(&params))?;

    let _osc = if args.no_osc {
        None
    }
    else {
        Some(osc::OscControl::start(args.osc_port, Arc::clone(&params))?)
    };

    if !args.no_console {
        console::spawn(Arc::clone(&params), engine.stop_handle())?;
    }

    let _status = audio::StatusReporter::start(engine.stats(), STATUS_REPORT_RATE);

    let sink: Box<dyn AudioSink> = match args.output() {
        Output::Device => Box::new(DeviceSink::open(format, engine.stats())?),
        Output::Wav(path) => {
            info!("writing WAV to {}", path.display());
            Box::new(WavSink::create(path, format)?)
        }
        Output::Raw(path) => {
            info!("writing raw PCM to {}", path.display());
            Box::new(RawSink::create(path, format)?)
        }
        Output::Stdout => Box::new(RawSink::stdout(format)),
    };

    engine.run(sink)?;

    Ok(())
}
