pub mod tilt;
pub mod title;
