use std::error::Error;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// One chord database entry: display names plus the ratio expressions of
/// its notes, lowest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChordDef {
    /// Full name, e.g. "Major triad".
    pub name: String,
    /// Short name used in preset grid files.
    pub short: String,
    /// Label shown on answer buttons.
    pub repr: String,
    /// Ratio expressions relative to the base pitch.
    pub ratios: Vec<String>,
}

/// Parses a chord database: a JSON array of chord entries.
pub fn parse_database(text: &str) -> Result<Vec<ChordDef>, Box<dyn Error>> {
    let chords: Vec<ChordDef> = serde_json::from_str(text)?;
    if chords.is_empty() {
        return Err("chord database is empty".into());
    }
    Ok(chords)
}

/// Loads a `chord_databases/<name>.json` style file.
pub fn load_database(path: impl AsRef<Path>) -> Result<Vec<ChordDef>, Box<dyn Error>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|err| format!("cannot read {}: {}", path.display(), err))?;
    parse_database(&text)
}

/// Interval size of a ratio multiplier in cents (1200 per octave).
pub fn cents(ratio_value: f64) -> f64 {
    1200.0 * ratio_value.log2()
}

/// Parses a preset grid: one row per line, chord short names separated by
/// `;`. Returns rows of indices into `chords`; an unknown short name is an
/// error naming the offending entry.
pub fn parse_preset(
    text: &str,
    chords: &[ChordDef],
    source: &str,
) -> Result<Vec<Vec<usize>>, Box<dyn Error>> {
    let mut grid = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut row = Vec::new();
        for short in line.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            let index = chords
                .iter()
                .position(|c| c.short == short)
                .ok_or_else(|| format!("unknown chord '{}' in {}", short, source))?;
            row.push(index);
        }
        if !row.is_empty() {
            grid.push(row);
        }
    }
    if grid.is_empty() {
        return Err(format!("preset {} has no chords", source).into());
    }
    Ok(grid)
}

/// Loads a preset grid file from `chord_presets/`.
pub fn load_preset(
    path: impl AsRef<Path>,
    chords: &[ChordDef],
) -> Result<Vec<Vec<usize>>, Box<dyn Error>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|err| format!("cannot read {}: {}", path.display(), err))?;
    parse_preset(&text, chords, &path.display().to_string())
}
