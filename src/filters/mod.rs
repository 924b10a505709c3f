pub mod filter;
pub mod palette;
pub mod params;
pub mod program;
pub mod wave;
