pub mod hooks;
pub mod integration;
pub mod spriteset;
