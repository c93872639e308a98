//! Parameter control over OSC.
//!
//! Listens for `/alpha`, `/pitch` and `/volume` (optionally under the
//! `/murmur` prefix), each carrying a single numeric argument.

use crate::app::params::{Param, ParamStore};
use crate::error::{AppError, ParamError};
use crate::prelude::*;
use log::{debug, info, warn};
use nannou_osc as osc;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// Receives OSC messages on a background thread and applies them to a
/// [`ParamStore`]. Stops when dropped.
pub struct OscControl {
    port: u16,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl OscControl {
    /// Binds `port` on all interfaces and starts listening.
    ///
    /// # Errors
    ///
    /// Returns an error if the port could not be bound.
    pub fn start(port: u16, params: ParamStoreRef) -> Result<Self, AppError> {
        let receiver =
            osc::receiver(port).map_err(|source| AppError::Osc { port, source })?;

        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let handle = std::thread::Builder::new()
            .name(String::from("murmur-osc"))
            .spawn(move || {
                while flag.lr() {
                    if !poll(&receiver, &params) {
                        std::thread::sleep(Duration::from_millis(
                            OSC_POLL_INTERVAL_MS,
                        ));
                    }
                }
            })
            .map_err(|source| AppError::Osc { port, source })?;

        info!("listening for OSC on port {port}");

        Ok(Self { port, running, handle: Some(handle) })
    }

    pub const fn port(&self) -> u16 {
        self.port
    }

    pub fn stop(&mut self) {
        self.running.sr(false);

        if let Some(handle) = self.handle.take() {
            _ = handle.join();
            debug!("OSC control stopped");
        }
    }
}

impl Drop for OscControl {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Applies every waiting packet. Returns `false` if nothing was waiting.
fn poll(receiver: &osc::Receiver, params: &ParamStore) -> bool {
    let mut received = false;

    while let Ok(Some((packet, from))) = receiver.try_recv() {
        received = true;

        for msg in packet.into_msgs() {
            match handle_message(params, &msg) {
                Ok(param) => {
                    info!("{param} set over OSC from {from}, now: {}", params.snapshot());
                }
                Err(e) => warn!("ignoring OSC message {}: {e}", msg.addr),
            }
        }
    }

    received
}

/// Applies one message to `params`.
///
/// # Errors
///
/// Returns an error, changing nothing, if the address names no parameter or
/// the argument is missing, not numeric, or out of range.
pub fn handle_message(
    params: &ParamStore,
    msg: &osc::Message,
) -> Result<Param, ParamError> {
    let param: Param = param_name(&msg.addr).parse()?;

    let value = msg.args.first().and_then(arg_value).ok_or_else(|| {
        ParamError::Malformed { param, raw: format!("{:?}", msg.args) }
    })?;

    params.set(param, value)?;

    Ok(param)
}

/// Strips the leading slash and the optional prefix from an address.
fn param_name(addr: &str) -> &str {
    let addr = addr
        .strip_prefix(OSC_ADDRESS_PREFIX)
        .filter(|rest| rest.starts_with('/'))
        .unwrap_or(addr);

    addr.trim_start_matches('/')
}

fn arg_value(arg: &osc::Type) -> Option<f64> {
    match arg {
        osc::Type::Float(x) => Some(f64::from(*x)),
        osc::Type::Double(x) => Some(*x),
        osc::Type::Int(x) => Some(f64::from(*x)),
        osc::Type::Long(x) => Some(*x as f64),
        osc::Type::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
