use tracing::{debug, info, warn};

use crate::config::Defaults;
use crate::grid::{GridManager, RebuildFlag, SampleGrid};
use crate::render::{LineHandle, RenderBinding};
use crate::waveform::{evaluate_into, WaveKind, WaveformSpec};

/// Which branch a call to [`AnimationState::tick`] took.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// A rebuild was in progress; the frame was dropped.
    Skipped,
    /// No previous timestamp; only the clock was recorded.
    Resync,
    /// Phases advanced by `dt` seconds.
    Advanced { dt: f64 },
}

/// Everything the animation needs between frames: the waveform
/// parameters, one phase accumulator per waveform, the frame clock and
/// the sample grid with the lines drawn over it.
///
/// Passed explicitly to the per-frame tick and to the control panel.
#[derive(Debug)]
pub struct AnimationState {
    waves: [WaveformSpec; 4],
    phases: [f64; 4],
    last_timestamp: Option<f64>,
    grid: GridManager,
    lines: [Option<LineHandle>; 4],
    defaults: Defaults,
    scratch: Vec<f64>,
}

impl AnimationState {
    pub fn new(defaults: Defaults) -> Self {
        Self {
            waves: WaveKind::ALL.map(|kind| WaveformSpec::new(kind, &defaults)),
            phases: [0.0; 4],
            last_timestamp: None,
            grid: GridManager::new(defaults.points),
            lines: [None; 4],
            defaults,
            scratch: Vec::new(),
        }
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    pub fn wave(&self, kind: WaveKind) -> &WaveformSpec {
        &self.waves[kind.index()]
    }

    /// Mutable access for the control panel. Use [`Self::set_enabled`] to
    /// toggle visibility so the line follows.
    pub fn wave_mut(&mut self, kind: WaveKind) -> &mut WaveformSpec {
        &mut self.waves[kind.index()]
    }

    pub fn waves(&self) -> &[WaveformSpec] {
        &self.waves
    }

    pub fn phase(&self, kind: WaveKind) -> f64 {
        self.phases[kind.index()]
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }

    pub fn grid(&self) -> &SampleGrid {
        self.grid.grid()
    }

    pub fn points(&self) -> usize {
        self.grid.points()
    }

    pub fn is_rebuilding(&self) -> bool {
        self.grid.is_rebuilding()
    }

    pub fn rebuild_flag(&self) -> RebuildFlag {
        self.grid.rebuild_flag()
    }

    pub fn line(&self, kind: WaveKind) -> Option<LineHandle> {
        self.lines[kind.index()]
    }

    /// Creates the lines for the current grid, replacing any that exist.
    pub fn create_lines<B: RenderBinding>(&mut self, binding: &mut B) {
        recreate_lines(binding, &mut self.lines, &self.waves, &self.phases, self.grid.grid());
    }

    /// Advances every enabled waveform by the time elapsed since the last
    /// tick and pushes the new Y values to its line.
    pub fn tick<B: RenderBinding>(&mut self, now: f64, binding: &mut B) -> TickOutcome {
        if self.grid.is_rebuilding() {
            return TickOutcome::Skipped;
        }
        let Some(last) = self.last_timestamp.replace(now) else {
            return TickOutcome::Resync;
        };
        let dt = (now - last).max(0.0);

        for wave in self.waves.iter().filter(|wave| wave.enabled) {
            let index = wave.kind.index();
            self.phases[index] += dt * wave.speed;
        }
        self.refresh(binding);
        TickOutcome::Advanced { dt }
    }

    /// Rewrites the Y buffer of every enabled waveform at its current phase.
    pub fn refresh<B: RenderBinding>(&mut self, binding: &mut B) {
        let grid = self.grid.grid().as_slice();
        self.scratch.resize(grid.len(), 0.0);
        for wave in self.waves.iter().filter(|wave| wave.enabled) {
            let index = wave.kind.index();
            let Some(handle) = self.lines[index] else {
                continue;
            };
            evaluate_into(wave, grid, self.phases[index], &mut self.scratch);
            if let Err(e) = binding.write_y(handle, &self.scratch) {
                warn!("Line update failed ({}): {}", wave.name(), e);
            }
        }
    }

    /// Switches to a grid of `points` samples (at least 2), recreating
    /// every line. Returns `false` if the count was already `points`.
    pub fn rebuild<B: RenderBinding>(&mut self, points: usize, binding: &mut B) -> bool {
        let lines = &mut self.lines;
        let waves = &self.waves;
        let phases = &self.phases;
        let rebuilt = self
            .grid
            .rebuild(points, |grid| recreate_lines(binding, lines, waves, phases, grid));
        if rebuilt {
            self.last_timestamp = None;
        }
        rebuilt
    }

    pub fn set_enabled<B: RenderBinding>(&mut self, kind: WaveKind, enabled: bool, binding: &mut B) {
        let index = kind.index();
        if self.waves[index].enabled == enabled {
            return;
        }
        self.waves[index].enabled = enabled;
        debug!("{} {}", kind.name(), if enabled { "enabled" } else { "disabled" });
        if let Some(handle) = self.lines[index] {
            if let Err(e) = binding.set_visible(handle, enabled) {
                warn!("Failed to set visibility of {}: {}", kind.name(), e);
            }
        }
    }

    /// Restores one waveform to its defaults and zeroes its phase. The
    /// frame clock is cleared too, so the next tick resynchronises.
    pub fn reset_waveform<B: RenderBinding>(&mut self, kind: WaveKind, binding: &mut B) {
        self.restore_wave(kind, binding);
        self.last_timestamp = None;
        info!("Reset {}", kind.name());
        self.refresh(binding);
    }

    /// Resets every waveform and returns to the default point count.
    pub fn reset_all<B: RenderBinding>(&mut self, binding: &mut B) {
        for kind in WaveKind::ALL {
            self.restore_wave(kind, binding);
        }
        self.rebuild(self.defaults.points, binding);
        self.last_timestamp = None;
        info!("Reset all waveforms");
        self.refresh(binding);
    }

    fn restore_wave<B: RenderBinding>(&mut self, kind: WaveKind, binding: &mut B) {
        let index = kind.index();
        let enabled = self.waves[index].enabled;
        self.waves[index] = WaveformSpec::new(kind, &self.defaults);
        // Keep the old flag so set_enabled sees the change and shows the line.
        self.waves[index].enabled = enabled;
        self.set_enabled(kind, true, binding);
        self.phases[index] = 0.0;
    }
}

fn recreate_lines<B: RenderBinding>(
    binding: &mut B,
    lines: &mut [Option<LineHandle>; 4],
    waves: &[WaveformSpec; 4],
    phases: &[f64; 4],
    grid: &SampleGrid,
) {
    for (slot, wave) in lines.iter_mut().zip(waves) {
        if let Some(handle) = slot.take() {
            if let Err(e) = binding.delete_line(handle) {
                warn!("Failed to delete line {}: {}", wave.name(), e);
            }
        }
    }

    let xs = grid.as_slice();
    let mut ys = vec![0.0; xs.len()];
    for (slot, wave) in lines.iter_mut().zip(waves) {
        evaluate_into(wave, xs, phases[wave.kind.index()], &mut ys);
        let xy: Vec<[f64; 2]> = xs.iter().zip(&ys).map(|(&x, &y)| [x, y]).collect();
        match binding.create_line(wave.name(), &xy, wave.color()) {
            Ok(handle) => {
                if !wave.enabled {
                    if let Err(e) = binding.set_visible(handle, false) {
                        warn!("Failed to hide line {}: {}", wave.name(), e);
                    }
                }
                *slot = Some(handle);
            }
            Err(e) => warn!("Failed to create line {}: {}", wave.name(), e),
        }
    }
}
