//! The shared parameter store.
//!
//! Every field is an independent atomic, so control surfaces may write at any
//! time while the generator reads a snapshot once per buffer. No consistency
//! across fields is promised: a snapshot may pair an old alpha with a new
//! pitch.

mod preset;
mod types;

pub use preset::Preset;
pub use types::Param;

use crate::dsp::SynthParams;
use crate::error::ParamError;
use crate::prelude::*;
use log::{info, warn};

#[derive(Debug)]
pub struct ParamStore {
    alpha: AtomicF64,
    pitch_hz: AtomicF64,
    volume: AtomicF64,
}

impl ParamStore {
    /// A store holding the default parameters.
    pub fn new() -> Self {
        Self {
            alpha: AtomicF64::new(DEFAULT_ALPHA),
            pitch_hz: AtomicF64::new(DEFAULT_PITCH_HZ),
            volume: AtomicF64::new(DEFAULT_VOLUME),
        }
    }

    /// A store holding `params`.
    ///
    /// # Errors
    ///
    /// Returns the first field of `params` that fails validation.
    pub fn with_params(params: SynthParams) -> Result<Self, ParamError> {
        let store = Self::new();
        store.set(Param::Alpha, params.alpha)?;
        store.set(Param::Pitch, params.pitch_hz)?;
        store.set(Param::Volume, params.volume)?;

        Ok(store)
    }

    pub fn alpha(&self) -> f64 {
        self.alpha.lr()
    }

    pub fn pitch_hz(&self) -> f64 {
        self.pitch_hz.lr()
    }

    pub fn volume(&self) -> f64 {
        self.volume.lr()
    }

    /// Reads a single parameter.
    pub fn get(&self, param: Param) -> f64 {
        self.field(param).lr()
    }

    /// Reads every parameter once. The fields are read independently.
    pub fn snapshot(&self) -> SynthParams {
        SynthParams {
            alpha: self.alpha(),
            pitch_hz: self.pitch_hz(),
            volume: self.volume(),
        }
    }

    /// Sets the filter's smoothing coefficient.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the value unchanged, unless `alpha` is in
    /// `(0, 1]`.
    pub fn set_alpha(&self, alpha: f64) -> Result<(), ParamError> {
        self.set(Param::Alpha, alpha)
    }

    /// Sets the frequency of the injected tone; `0.0` disables it.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the value unchanged, if `pitch_hz` is
    /// negative or not finite.
    pub fn set_pitch(&self, pitch_hz: f64) -> Result<(), ParamError> {
        self.set(Param::Pitch, pitch_hz)
    }

    /// Sets the output gain.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the value unchanged, if `volume` is negative
    /// or not finite.
    pub fn set_volume(&self, volume: f64) -> Result<(), ParamError> {
        self.set(Param::Volume, volume)
    }

    /// Validates and stores `value`.
    ///
    /// # Errors
    ///
    /// See [`Param::validate()`].
    pub fn set(&self, param: Param, value: f64) -> Result<(), ParamError> {
        let value = param.validate(value)?;
        self.field(param).sr(value);

        Ok(())
    }

    /// Parses and stores a named value, e.g. `("alpha", "0.02")`.
    ///
    /// # Errors
    ///
    /// Returns an error, changing nothing, if the name is unknown or the value
    /// is malformed or out of range.
    pub fn set_from_str(&self, name: &str, raw: &str) -> Result<Param, ParamError> {
        let param: Param = name.parse()?;
        let value = raw.trim().parse::<f64>().map_err(|_| {
            ParamError::Malformed { param, raw: raw.trim().to_string() }
        })?;

        self.set(param, value)?;

        Ok(param)
    }

    /// Applies form-encoded pairs such as `alpha=0.02&pitch=110`.
    ///
    /// Pairs with empty values are skipped; invalid pairs are logged and
    /// ignored. Returns the parameters that were updated.
    pub fn apply_form(&self, form: &str) -> Vec<Param> {
        let mut updated = Vec::new();

        for pair in form.split('&').map(str::trim).filter(|p| !p.is_empty()) {
            let Some((name, raw)) = pair.split_once('=') else {
                warn!("ignoring \"{pair}\": expected name=value");
                continue;
            };

            if raw.trim().is_empty() {
                continue;
            }

            match self.set_from_str(name, raw) {
                Ok(param) => {
                    info!("{param} set to {}", self.get(param));
                    updated.push(param);
                }
                Err(e) => warn!("ignoring \"{pair}\": {e}"),
            }
        }

        updated
    }

    fn field(&self, param: Param) -> &AtomicF64 {
        match param {
            Param::Alpha => &self.alpha,
            Param::Pitch => &self.pitch_hz,
            Param::Volume => &self.volume,
        }
    }
}

impl Default for ParamStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn starts_with_defaults() {
        let store = ParamStore::new();
        assert_eq!(store.snapshot(), SynthParams::default());
        assert_eq!(store.alpha(), 0.01);
        assert_eq!(store.pitch_hz(), 0.0);
        assert_eq!(store.volume(), 1.0);
    }

    #[test]
    fn rejects_out_of_range_alpha() {
        let store = ParamStore::new();

        for bad in [0.0, -0.5, 1.0001, 5.0, f64::NAN, f64::INFINITY] {
            assert!(store.set_alpha(bad).is_err(), "accepted {bad}");
            assert_eq!(store.alpha(), DEFAULT_ALPHA);
        }

        store.set_alpha(1.0).unwrap();
        assert_eq!(store.alpha(), 1.0);
    }

    #[test]
    fn rejects_negative_pitch_and_volume() {
        let store = ParamStore::new();

        assert!(store.set_pitch(-1.0).is_err());
        assert!(store.set_volume(-0.1).is_err());
        assert!(store.set_volume(f64::NEG_INFINITY).is_err());
        assert_eq!(store.snapshot(), SynthParams::default());

        store.set_pitch(0.0).unwrap();
        store.set_volume(0.0).unwrap();
        assert_eq!(store.volume(), 0.0);
    }

    #[test]
    fn parses_named_values() {
        let store = ParamStore::new();

        assert_eq!(store.set_from_str("Pitch", " 110.5 "), Ok(Param::Pitch));
        assert_eq!(store.pitch_hz(), 110.5);

        assert_eq!(
            store.set_from_str("alpha", "abc"),
            Err(ParamError::Malformed {
                param: Param::Alpha,
                raw: "abc".to_string()
            })
        );
        assert!(matches!(
            store.set_from_str("cutoff", "1"),
            Err(ParamError::Unknown(_))
        ));
        assert_eq!(store.alpha(), DEFAULT_ALPHA);
    }

    #[test]
    fn form_skips_invalid_fields() {
        let store = ParamStore::new();

        let updated =
            store.apply_form("alpha=0.05&pitch=&volume=loud&bogus&pitch=-3");

        assert_eq!(updated, vec![Param::Alpha]);
        assert_eq!(store.alpha(), 0.05);
        assert_eq!(store.pitch_hz(), DEFAULT_PITCH_HZ);
        assert_eq!(store.volume(), DEFAULT_VOLUME);
    }

    #[test]
    fn with_params_validates() {
        let ok = SynthParams { alpha: 0.2, pitch_hz: 50.0, volume: 0.5 };
        assert_eq!(ParamStore::with_params(ok).unwrap().snapshot(), ok);

        let bad = SynthParams { alpha: 2.0, ..ok };
        assert!(ParamStore::with_params(bad).is_err());
    }

    #[test]
    fn concurrent_writers_only_store_valid_values() {
        let store = Arc::new(ParamStore::new());

        let writers: Vec<_> = (0..4)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for n in 0..1000 {
                        let v = f64::from(i * 1000 + n);
                        _ = store.set_alpha(v / 4000.0);
                        _ = store.set_alpha(-v);
                        _ = store.set_volume(v / 100.0);
                    }
                })
            })
            .collect();

        for _ in 0..1000 {
            let snapshot = store.snapshot();
            assert!(snapshot.alpha > 0.0 && snapshot.alpha <= 1.0);
            assert!(snapshot.volume >= 0.0);
        }

        for w in writers {
            w.join().unwrap();
        }
    }
}
