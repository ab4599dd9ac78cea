use std::f64::consts::PI;

use egui::Color32;

use crate::config::Defaults;

/// Value the square wave takes where `sin` crosses zero.
pub const SQUARE_SIGN_OF_ZERO: f64 = 0.0;

/// Zero-crossing tolerance for the square wave, per radian of argument.
///
/// `sin(k * PI)` is never exactly zero in floating point, and the rounding
/// error grows with the argument as phase accumulates, so `|sin(x)|` below
/// `SQUARE_ZERO_EPSILON * max(1, |x|)` counts as a crossing.
pub const SQUARE_ZERO_EPSILON: f64 = 1e-12;

/// The four periodic signals the visualizer draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaveKind {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

impl WaveKind {
    pub const ALL: [WaveKind; 4] = [
        WaveKind::Sine,
        WaveKind::Square,
        WaveKind::Triangle,
        WaveKind::Sawtooth,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WaveKind::Sine => "Sine",
            WaveKind::Square => "Square",
            WaveKind::Triangle => "Triangle",
            WaveKind::Sawtooth => "Sawtooth",
        }
    }

    /// Position of this kind in [`WaveKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            WaveKind::Sine => 0,
            WaveKind::Square => 1,
            WaveKind::Triangle => 2,
            WaveKind::Sawtooth => 3,
        }
    }

    /// Vertical offset the line is drawn at by default, so the four
    /// traces stack instead of overlapping.
    pub fn base_offset(self) -> f64 {
        match self {
            WaveKind::Sine => 0.0,
            WaveKind::Square => 20.0,
            WaveKind::Triangle => 40.0,
            WaveKind::Sawtooth => 60.0,
        }
    }

    pub fn color(self) -> Color32 {
        match self {
            WaveKind::Sine => Color32::BLUE,
            WaveKind::Square => Color32::RED,
            WaveKind::Triangle => Color32::GREEN,
            WaveKind::Sawtooth => Color32::from_rgb(255, 165, 0),
        }
    }

    /// Closed-form value at time `t` for frequency `f` and amplitude `a`.
    pub fn sample(self, t: f64, f: f64, a: f64) -> f64 {
        let ft = f * t;
        match self {
            WaveKind::Sine => a * (2.0 * PI * ft).sin(),
            WaveKind::Square => a * square_sign(2.0 * PI * ft),
            WaveKind::Triangle => a * (2.0 / PI) * (2.0 * PI * ft).sin().asin(),
            WaveKind::Sawtooth => a * 2.0 * (ft - (0.5 + ft).floor()),
        }
    }
}

fn square_sign(x: f64) -> f64 {
    let s = x.sin();
    if s.abs() < SQUARE_ZERO_EPSILON * x.abs().max(1.0) {
        SQUARE_SIGN_OF_ZERO
    } else {
        s.signum()
    }
}

/// Tunable parameters and static metadata for one waveform.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformSpec {
    pub kind: WaveKind,
    pub enabled: bool,
    pub frequency: f64,
    pub amplitude: f64,
    pub offset: f64,
    /// Phase speed in cycles per second; negative runs the trace backwards.
    pub speed: f64,
}

impl WaveformSpec {
    pub fn new(kind: WaveKind, defaults: &Defaults) -> Self {
        Self {
            kind,
            enabled: true,
            frequency: defaults.frequency,
            amplitude: defaults.amplitude,
            offset: kind.base_offset(),
            speed: defaults.speed,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn color(&self) -> Color32 {
        self.kind.color()
    }
}

/// Evaluates `spec` over `grid` shifted by `phase`.
pub fn evaluate(spec: &WaveformSpec, grid: &[f64], phase: f64) -> Vec<f64> {
    let mut out = vec![0.0; grid.len()];
    evaluate_into(spec, grid, phase, &mut out);
    out
}

/// Same as [`evaluate`] but writes into `out`, which must be as long as `grid`.
pub fn evaluate_into(spec: &WaveformSpec, grid: &[f64], phase: f64, out: &mut [f64]) {
    debug_assert_eq!(grid.len(), out.len());
    for (y, &t) in out.iter_mut().zip(grid) {
        *y = spec.kind.sample(t + phase, spec.frequency, spec.amplitude) + spec.offset;
    }
}
