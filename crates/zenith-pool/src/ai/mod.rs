pub mod shot;

pub use shot::{difficulty_label, Shot, ShotSelector};
