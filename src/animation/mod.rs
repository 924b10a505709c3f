pub mod channel;
pub mod controller;
pub mod ease;
pub mod keyframes;
