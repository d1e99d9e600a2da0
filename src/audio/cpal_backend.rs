use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, Stream};

use crate::audio::AudioBackend;
use crate::synth::{Renderer, SynthParams};

/// Owns the cpal output stream of one playback session. The stream callback
/// owns the session's renderer outright; nothing here is shared with other
/// sessions, and overlapping streams are mixed by the audio subsystem.
pub struct CpalBackend {
    stream: Option<Stream>,
    renderer: Option<Renderer>,
    sample_rate: u32,
    block_size: u32,
}

impl CpalBackend {
    pub fn new(renderer: Renderer, params: &SynthParams) -> Self {
        Self {
            stream: None,
            renderer: Some(renderer),
            sample_rate: params.sample_rate,
            block_size: params.block_size,
        }
    }

    fn build_stream(&mut self) -> Result<Stream, Box<dyn std::error::Error>> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or("no output device available")?;

        let supported_config = device.default_output_config()?;
        if supported_config.sample_format() != SampleFormat::F32 {
            return Err("unsupported sample format".into());
        }

        let mut stream_config: cpal::StreamConfig = supported_config.into();
        stream_config.sample_rate = cpal::SampleRate(self.sample_rate);
        stream_config.buffer_size = cpal::BufferSize::Fixed(self.block_size);

        let channels = stream_config.channels as usize;
        let mut renderer = self.renderer.take().ok_or("backend already started")?;
        let mut mono: Vec<f32> = Vec::new();

        let stream = device.build_output_stream(
            &stream_config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let frames = data.len() / channels;
                mono.resize(frames, 0.0);
                renderer.render_block(&mut mono);

                // Mono signal fanned out to every channel the device opened.
                for (frame, sample) in data.chunks_mut(channels).zip(mono.iter()) {
                    for out in frame.iter_mut() {
                        *out = *sample;
                    }
                }
            },
            // Underruns land here. They are audible but not fatal: log and
            // keep rendering.
            |err| eprintln!("Stream error: {}", err),
            None,
        )?;

        Ok(stream)
    }
}

impl AudioBackend for CpalBackend {
    fn start(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let stream = self.build_stream()?;
        stream.play()?;
        self.stream = Some(stream);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(stream) = self.stream.take() {
            if let Err(err) = stream.pause() {
                eprintln!("Failed to pause stream: {}", err);
            }
        }
    }
}
