use std::ops::RangeInclusive;

use clap::Parser;
use tracing::Level;

pub const DEFAULT_FREQUENCY: f64 = 5.0;
pub const DEFAULT_AMPLITUDE: f64 = 5.0;
pub const DEFAULT_SPEED: f64 = 0.5;
pub const DEFAULT_POINTS: usize = 10_000;

// Ranges exposed by the control panel.
pub const AMPLITUDE_RANGE: RangeInclusive<f64> = 0.0..=10.0;
pub const FREQUENCY_RANGE: RangeInclusive<f64> = 1.0..=100.0;
pub const OFFSET_RANGE: RangeInclusive<f64> = -100.0..=100.0;
pub const SPEED_RANGE: RangeInclusive<f64> = -2.0..=2.0;
pub const POINTS_RANGE: RangeInclusive<usize> = 128..=200_000;

/// Startup values, and what the reset buttons restore.
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    pub frequency: f64,
    pub amplitude: f64,
    pub speed: f64,
    pub points: usize,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            frequency: DEFAULT_FREQUENCY,
            amplitude: DEFAULT_AMPLITUDE,
            speed: DEFAULT_SPEED,
            points: DEFAULT_POINTS,
        }
    }
}

impl Defaults {
    /// Pulls every value into the range its control allows.
    pub fn clamped(self) -> Self {
        Self {
            frequency: clamp_to(self.frequency, &FREQUENCY_RANGE),
            amplitude: clamp_to(self.amplitude, &AMPLITUDE_RANGE),
            speed: clamp_to(self.speed, &SPEED_RANGE),
            points: self.points.clamp(*POINTS_RANGE.start(), *POINTS_RANGE.end()),
        }
    }
}

fn clamp_to(value: f64, range: &RangeInclusive<f64>) -> f64 {
    value.clamp(*range.start(), *range.end())
}

/// Command line options.
#[derive(Debug, Parser)]
#[command(name = "wave_visualizer", about = "Animated sine/square/triangle/sawtooth plot")]
pub struct Cli {
    /// Default frequency for every waveform (Hz)
    #[arg(long, default_value_t = DEFAULT_FREQUENCY)]
    pub frequency: f64,

    /// Default amplitude for every waveform
    #[arg(long, default_value_t = DEFAULT_AMPLITUDE)]
    pub amplitude: f64,

    /// Default phase speed for every waveform (cycles per second)
    #[arg(long, default_value_t = DEFAULT_SPEED, allow_negative_numbers = true)]
    pub speed: f64,

    /// Default number of sample points
    #[arg(long, default_value_t = DEFAULT_POINTS)]
    pub points: usize,

    /// Maximum log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = Level::INFO)]
    pub log_level: Level,
}

impl Cli {
    pub fn defaults(&self) -> Defaults {
        Defaults {
            frequency: self.frequency,
            amplitude: self.amplitude,
            speed: self.speed,
            points: self.points,
        }
        .clamped()
    }
}
