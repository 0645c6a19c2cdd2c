mod buttons;
mod movement;

pub use buttons::{Button, ButtonState, BUTTON_COUNT};
pub use movement::{integrate, MoveParams};
