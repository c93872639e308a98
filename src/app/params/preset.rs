//! JSON parameter presets.

use super::{Param, ParamStore};
use crate::error::AppError;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A set of optional parameter values, e.g.
///
/// ```json
/// { "alpha": 0.02, "pitch": 110.0 }
/// ```
///
/// Missing fields leave the store untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Preset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl Preset {
    /// Reads a preset from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid preset.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path).map_err(|source| {
            AppError::PresetIo { path: path.to_path_buf(), source }
        })?;

        serde_json::from_str(&json).map_err(|source| AppError::PresetJson {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Captures the current values of `store`.
    pub fn from_store(store: &ParamStore) -> Self {
        Self {
            alpha: Some(store.alpha()),
            pitch: Some(store.pitch_hz()),
            volume: Some(store.volume()),
        }
    }

    fn values(&self) -> [(Param, Option<f64>); 3] {
        [
            (Param::Alpha, self.alpha),
            (Param::Pitch, self.pitch),
            (Param::Volume, self.volume),
        ]
    }

    /// Writes every present field into `store`. Invalid fields are logged and
    /// skipped. Returns the number of fields applied.
    pub fn apply_to(&self, store: &ParamStore) -> usize {
        let mut applied = 0;

        for (param, value) in self.values() {
            let Some(value) = value else { continue };

            match store.set(param, value) {
                Ok(()) => {
                    info!("preset: {param} = {value}");
                    applied += 1;
                }
                Err(e) => warn!("preset: ignoring {param}: {e}"),
            }
        }

        applied
    }

    /// The preset as a compact JSON object.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::*;
    use std::io::Write;

    #[test]
    fn applies_present_fields_only() {
        let preset: Preset = serde_json::from_str(r#"{ "pitch": 55.0 }"#).unwrap();
        let store = ParamStore::new();

        assert_eq!(preset.apply_to(&store), 1);
        assert_eq!(store.pitch_hz(), 55.0);
        assert_eq!(store.alpha(), DEFAULT_ALPHA);
    }

    #[test]
    fn skips_invalid_fields() {
        let preset = Preset { alpha: Some(3.0), pitch: None, volume: Some(0.25) };
        let store = ParamStore::new();

        assert_eq!(preset.apply_to(&store), 1);
        assert_eq!(store.alpha(), DEFAULT_ALPHA);
        assert_eq!(store.volume(), 0.25);
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(serde_json::from_str::<Preset>(r#"{ "cutoff": 1.0 }"#).is_err());
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "alpha": 0.02, "volume": 0.5 }}"#).unwrap();

        let preset = Preset::from_file(file.path()).unwrap();
        assert_eq!(
            preset,
            Preset { alpha: Some(0.02), pitch: None, volume: Some(0.5) }
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = Preset::from_file(Path::new("/nonexistent/murmur.json"));
        assert!(matches!(err, Err(AppError::PresetIo { .. })));
    }

    #[test]
    fn round_trips_the_store() {
        let store = ParamStore::new();
        store.set_pitch(110.0).unwrap();

        let json = Preset::from_store(&store).to_json();
        let restored: Preset = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.pitch, Some(110.0));
        assert_eq!(restored.alpha, Some(DEFAULT_ALPHA));
    }
}
