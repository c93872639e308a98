//! Project-wide exports for easy access.

use crate::app::params::ParamStore;
use std::sync::Arc;

pub use crate::settings::*;
pub use crate::util::*;
pub use atomic_float::AtomicF64;
pub use crossbeam_channel::{
    bounded as bounded_channel, Receiver as CCReceiver, Sender as CCSender,
};
pub use std::f64::consts::TAU;

pub type ParamStoreRef = Arc<ParamStore>;
