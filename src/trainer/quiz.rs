use rand::seq::IndexedRandom;
use rand::Rng;

use super::database::{cents, ChordDef};
use super::settings::Settings;
use crate::synth::{ratio, ChordRequest};

/// The chord currently playing: its database index and the base pitch it
/// was rendered at. Replay reuses both.
#[derive(Debug, Clone, Copy)]
pub struct CurrentChord {
    pub index: usize,
    pub base_frequency: f64,
}

/// Quiz state: the answer grid of candidate chords and the one currently
/// playing.
pub struct Quiz {
    chords: Vec<ChordDef>,
    grid: Vec<Vec<usize>>,
    flat: Vec<usize>,
    current: Option<CurrentChord>,
    settings: Settings,
}

impl Quiz {
    /// Builds a quiz over a randomly sampled answer grid of
    /// `random_w` x `random_h` chords.
    pub fn new<R: Rng + ?Sized>(chords: Vec<ChordDef>, settings: Settings, rng: &mut R) -> Self {
        let grid = random_grid(chords.len(), settings.random_w, settings.random_h, rng);
        Self::with_grid(chords, grid, settings)
    }

    /// Builds a quiz over an explicit grid, e.g. one loaded from a preset
    /// file.
    pub fn with_grid(chords: Vec<ChordDef>, grid: Vec<Vec<usize>>, settings: Settings) -> Self {
        let flat = grid.iter().flatten().copied().collect();
        Self {
            chords,
            grid,
            flat,
            current: None,
            settings,
        }
    }

    pub fn grid(&self) -> &[Vec<usize>] {
        &self.grid
    }

    pub fn chord(&self, index: usize) -> &ChordDef {
        &self.chords[index]
    }

    pub fn current(&self) -> Option<&CurrentChord> {
        self.current.as_ref()
    }

    /// Picks the next chord from the grid plus the base pitch to play it
    /// at: uniform in [min_pitch, max_pitch] when `random_pitch` is set,
    /// the fixed `pitch` otherwise.
    pub fn next_chord<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &CurrentChord {
        let index = *self
            .flat
            .choose(rng)
            .expect("answer grid is never empty");
        let base_frequency = if self.settings.random_pitch {
            rng.random_range(self.settings.min_pitch..=self.settings.max_pitch)
        } else {
            self.settings.pitch
        };
        self.current = Some(CurrentChord {
            index,
            base_frequency,
        });
        self.current.as_ref().unwrap()
    }

    /// The request to hand to the playback layer for the current chord.
    /// Replay gets the same ratios and the same base pitch.
    pub fn request(&self) -> Option<ChordRequest> {
        self.current.as_ref().map(|current| {
            ChordRequest::new(
                current.base_frequency,
                self.chords[current.index].ratios.clone(),
            )
        })
    }

    /// Whether `guess` names the chord that played. None before the first
    /// question.
    pub fn check(&self, guess: usize) -> Option<bool> {
        self.current.as_ref().map(|current| current.index == guess)
    }

    /// Multi-line description of a grid entry: names, intervals in cents,
    /// raw ratios.
    pub fn describe(&self, index: usize) -> String {
        let chord = &self.chords[index];
        let intervals: Vec<String> = chord
            .ratios
            .iter()
            .map(|expression| match ratio::eval_ratio(expression) {
                Ok(value) => format!("{:.2}", cents(value)),
                Err(_) => "?".to_string(),
            })
            .collect();
        format!(
            "{}\n{}\ncents: {}\n{}",
            chord.name,
            chord.repr,
            intervals.join(", "),
            chord.ratios.join(", ")
        )
    }
}

/// Samples `w * h` distinct chord indices into rows of `w`. A database
/// smaller than the grid yields a smaller grid rather than repeats.
fn random_grid<R: Rng + ?Sized>(
    chord_count: usize,
    w: usize,
    h: usize,
    rng: &mut R,
) -> Vec<Vec<usize>> {
    let amount = (w * h).min(chord_count);
    let indices: Vec<usize> = rand::seq::index::sample(rng, chord_count, amount).into_vec();

    indices.chunks(w.max(1)).map(|row| row.to_vec()).collect()
}
