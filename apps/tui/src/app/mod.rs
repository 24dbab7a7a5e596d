// App module for uni_map
// Holds the map state, screen layout and input handling

pub mod input;
pub mod layout;
pub mod state;

pub use input::{handle_key, handle_mouse};
pub use state::App;
