//! Core mapview library (segments, padding, grid layout, rendering, config).

pub mod config;
pub mod generate;
pub mod grid;
pub mod mirror;
pub mod pad;
pub mod render;
pub mod segment;
