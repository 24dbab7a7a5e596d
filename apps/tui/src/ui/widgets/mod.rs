pub mod badge;
pub mod help;
pub mod panel;
