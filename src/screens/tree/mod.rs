// Re-export the screen state and its row/dialog types
pub use types::*;

mod actions;
mod input;
mod navigation;
mod render;
pub mod types;
