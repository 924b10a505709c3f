pub mod chain;
pub mod description;
