use std::error::Error;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::synth::SynthParams;

/// Flat settings snapshot matching the on-disk JSON layout. Loading (or
/// reloading) always produces a new snapshot; an existing one is never
/// mutated, so running sessions keep the parameters they started with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(flatten)]
    pub synth: SynthParams,
    /// Name of the chord database under `chord_databases/`.
    pub chord_database_name: String,
    /// Width of the randomly sampled answer grid.
    pub random_w: usize,
    /// Height of the randomly sampled answer grid.
    pub random_h: usize,
    /// Draw a fresh base pitch per question instead of using `pitch`.
    pub random_pitch: bool,
    /// Fixed base pitch in Hz when `random_pitch` is off.
    pub pitch: f64,
    /// Lower bound of the random base pitch range in Hz.
    pub min_pitch: f64,
    /// Upper bound of the random base pitch range in Hz.
    pub max_pitch: f64,
}

impl Settings {
    /// Parses a settings snapshot from JSON text. Missing keys fall back to
    /// the compiled defaults; the synth section is validated before use.
    pub fn parse(text: &str) -> Result<Self, Box<dyn Error>> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.synth.validate()?;
        if settings.random_w == 0 || settings.random_h == 0 {
            return Err("answer grid dimensions must be positive".into());
        }
        if !(settings.min_pitch > 0.0) || settings.max_pitch < settings.min_pitch {
            return Err(format!(
                "pitch range [{}, {}] is not usable",
                settings.min_pitch, settings.max_pitch
            )
            .into());
        }
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|err| format!("cannot read {}: {}", path.display(), err))?;
        Self::parse(&text)
    }

    /// Tries the user settings file first, then the defaults file, then the
    /// compiled defaults. Logs which source actually got used.
    pub fn load_with_fallback(user_path: impl AsRef<Path>, default_path: impl AsRef<Path>) -> Self {
        match Self::load(user_path.as_ref()) {
            Ok(settings) => return settings,
            Err(err) => eprintln!(
                "No usable settings at {}: {}",
                user_path.as_ref().display(),
                err
            ),
        }
        match Self::load(default_path.as_ref()) {
            Ok(settings) => settings,
            Err(err) => {
                eprintln!(
                    "No usable settings at {}: {}",
                    default_path.as_ref().display(),
                    err
                );
                println!("Using built-in default settings");
                Settings::default()
            }
        }
    }

    /// Writes the snapshot back to disk as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn Error>> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), text)
            .map_err(|err| format!("cannot write {}: {}", path.as_ref().display(), err))?;
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            synth: SynthParams::default(),
            chord_database_name: "default".to_string(),
            random_w: 3,
            random_h: 3,
            random_pitch: true,
            pitch: 220.0,
            min_pitch: 130.0,
            max_pitch: 440.0,
        }
    }
}
