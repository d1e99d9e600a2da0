mod cpal_backend;
mod session;

pub use self::cpal_backend::CpalBackend;
pub use self::session::{play, PlaybackSession};

/// An output backend drives one renderer against a device stream.
pub trait AudioBackend {
    /// Opens the stream and begins pulling blocks from the renderer.
    fn start(&mut self) -> Result<(), Box<dyn std::error::Error>>;
    /// Closes the stream and releases the device handle.
    fn stop(&mut self);
}
