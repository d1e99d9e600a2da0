use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::audio::{AudioBackend, CpalBackend};
use crate::synth::{ChordRequest, PartialBank, Renderer, SynthError, SynthParams};

/// Extra wall-clock time past `duration` before the stream closes, so the
/// tail of the last block is not cut off.
const STOP_MARGIN_MS: u64 = 100;

/// One playback trigger: an independent thread owning its own partial bank,
/// render state and output stream handle. Sessions never coordinate with
/// each other; rapid triggers overlap audibly and the audio subsystem mixes
/// them. There is deliberately no way to stop a session early; it runs for
/// its configured duration and then releases everything it owns.
pub struct PlaybackSession {
    handle: JoinHandle<()>,
}

impl PlaybackSession {
    /// Spawns the session thread for an already-built bank.
    pub fn spawn(bank: PartialBank, params: &SynthParams) -> Self {
        println!(
            "Starting playback: {} partials, {:.2}s",
            bank.len(),
            params.duration
        );
        let params = params.clone();
        let handle = thread::spawn(move || {
            let renderer = Renderer::new(bank, params.sample_rate);
            let mut backend = CpalBackend::new(renderer, &params);

            if let Err(err) = backend.start() {
                // Fatal for this session only; concurrent sessions keep playing.
                eprintln!("Playback session failed to start: {}", err);
                return;
            }

            thread::sleep(Duration::from_millis(
                (params.duration * 1000.0) as u64 + STOP_MARGIN_MS,
            ));
            backend.stop();
        });
        Self { handle }
    }

    /// Blocks until the session has closed its stream and released its state.
    pub fn join(self) {
        if self.handle.join().is_err() {
            eprintln!("Playback session thread panicked");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Builds the partial bank for `request` and starts an independent playback
/// session for it. Construction errors surface here, before any thread or
/// stream exists; once the session runs, errors are logged but never
/// returned. Dropping the returned handle detaches the session; it still
/// plays to completion.
pub fn play(request: &ChordRequest, params: &SynthParams) -> Result<PlaybackSession, SynthError> {
    let bank = PartialBank::build(request, params)?;
    Ok(PlaybackSession::spawn(bank, params))
}
