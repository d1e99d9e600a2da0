pub mod database;
pub mod quiz;
pub mod settings;

pub use self::database::{load_database, load_preset, ChordDef};
pub use self::quiz::Quiz;
pub use self::settings::Settings;
