pub mod envelope;
pub mod error;
pub mod inharmonicity;
pub mod params;
pub mod partials;
pub mod ratio;
pub mod renderer;

pub use self::error::SynthError;
pub use self::inharmonicity::InharmonicityModel;
pub use self::params::SynthParams;
pub use self::partials::{ChordRequest, Partial, PartialBank, TARGET_PEAK};
pub use self::renderer::Renderer;
