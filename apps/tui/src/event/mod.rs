// Event module for uni_map
// Runs the interactive loop and the headless summary

mod loop_handler;

pub use loop_handler::{run, run_headless};
