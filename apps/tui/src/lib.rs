// Export our modules for use in the binary and tests
pub mod api;
pub mod config;
pub mod effects;
pub mod logging;

pub use api::{HttpBackend, UniversityBackend};
pub use effects::{MapEffects, ViewEvent};
