pub mod aim;
pub mod queue;

pub use aim::{AimGesture, AimPreview};
pub use queue::{custom, InputEvent, InputQueue};
