pub mod catalog;
pub mod config;
pub mod focus;
pub mod platform;
