pub mod application;
pub mod style;
pub mod timer;
pub mod types;
