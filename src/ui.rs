use eframe::{App, CreationContext};
use egui::{CentralPanel, CollapsingHeader, Context, RichText, SidePanel, Slider, Ui};
use egui_plot::{Legend, Plot};
use tracing::{debug, info};

use crate::config::{
    Defaults, AMPLITUDE_RANGE, FREQUENCY_RANGE, OFFSET_RANGE, POINTS_RANGE, SPEED_RANGE,
};
use crate::plot::PlotBinding;
use crate::state::AnimationState;
use crate::waveform::WaveKind;

const WINDOW_TITLE: &str = "Waveform Visualiser";
const CONTROLS_WIDTH: f32 = 300.0;

/// A struct representing the application UI.
pub struct WaveformApp {
    state: AnimationState,
    binding: PlotBinding,
    /// Point count chosen in the panel, applied once it differs from the grid.
    pending_points: usize,
    points_dragging: bool,
}

impl WaveformApp {
    /// Creates the animation state and its plot lines.
    pub fn new(defaults: Defaults) -> Self {
        let mut state = AnimationState::new(defaults);
        let mut binding = PlotBinding::new();
        state.create_lines(&mut binding);
        let pending_points = state.points();
        Self {
            state,
            binding,
            pending_points,
            points_dragging: false,
        }
    }

    fn controls(&mut self, ui: &mut Ui) {
        ui.heading("Waveform Controls");
        ui.separator();

        for kind in WaveKind::ALL {
            CollapsingHeader::new(RichText::new(kind.name()).color(kind.color()))
                .default_open(kind == WaveKind::Sine)
                .show(ui, |ui| self.wave_controls(ui, kind));
        }

        ui.separator();
        let response = ui.add(
            Slider::new(&mut self.pending_points, POINTS_RANGE)
                .logarithmic(true)
                .text("Points"),
        );
        self.points_dragging = response.dragged();

        if ui.button("Reset all").clicked() {
            self.state.reset_all(&mut self.binding);
            self.pending_points = self.state.points();
        }
    }

    fn wave_controls(&mut self, ui: &mut Ui, kind: WaveKind) {
        let mut enabled = self.state.wave(kind).enabled;
        if ui.checkbox(&mut enabled, "Enabled").changed() {
            self.state.set_enabled(kind, enabled, &mut self.binding);
        }

        let wave = self.state.wave_mut(kind);
        let mut changed = false;
        changed |= ui
            .add(Slider::new(&mut wave.amplitude, AMPLITUDE_RANGE).text("Amplitude"))
            .changed();
        changed |= ui
            .add(Slider::new(&mut wave.frequency, FREQUENCY_RANGE).text("Frequency"))
            .changed();
        changed |= ui
            .add(Slider::new(&mut wave.offset, OFFSET_RANGE).text("Offset"))
            .changed();
        changed |= ui
            .add(Slider::new(&mut wave.speed, SPEED_RANGE).text("Speed"))
            .changed();
        if changed {
            debug!(
                "{}: amplitude={:.2} frequency={:.2} offset={:.2} speed={:.2}",
                kind.name(),
                wave.amplitude,
                wave.frequency,
                wave.offset,
                wave.speed
            );
        }

        ui.label(format!("Phase: {:.3}", self.state.phase(kind)));
        if ui.button("Reset").clicked() {
            self.state.reset_waveform(kind, &mut self.binding);
        }
    }

    /// Rebuilds the grid once the point slider has settled on a new count.
    fn apply_pending_points(&mut self) {
        if self.points_dragging || self.pending_points == self.state.points() {
            return;
        }
        self.state.rebuild(self.pending_points, &mut self.binding);
        self.pending_points = self.state.points();
    }
}

impl App for WaveformApp {
    /// Runs one frame: control panel edits, then any rebuild, then the
    /// animation tick, then the plot.
    fn update(&mut self, ctx: &Context, _: &mut eframe::Frame) {
        ctx.request_repaint();

        SidePanel::right("controls")
            .exact_width(CONTROLS_WIDTH)
            .show(ctx, |ui| self.controls(ui));

        self.apply_pending_points();

        let now = ctx.input(|i| i.time);
        self.state.tick(now, &mut self.binding);

        CentralPanel::default().show(ctx, |ui| {
            ui.heading("Waveform Animation");
            Plot::new("waveforms")
                .show_axes(false)
                .legend(Legend::default())
                .show(ui, |plot_ui| self.binding.show(plot_ui));
        });
    }
}

/// Initializes and runs the eframe application.
pub fn run_ui(defaults: Defaults) -> Result<(), eframe::Error> {
    info!("Starting with {:?}", defaults);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_title(WINDOW_TITLE),
        ..Default::default()
    };
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc: &CreationContext| Ok(Box::new(WaveformApp::new(defaults)))),
    )
}
