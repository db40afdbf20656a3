pub mod controller;
pub mod random;
pub mod scheduler;
pub mod state;
