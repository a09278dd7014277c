pub mod button;

pub use button::{Button, ButtonAction};
