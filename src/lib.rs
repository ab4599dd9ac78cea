//! Real-time plot of four animated periodic signals with live controls.

pub mod config;
pub mod grid;
pub mod plot;
pub mod render;
pub mod state;
pub mod ui;
pub mod waveform;
