use egui::Color32;
use egui_plot::{Line, PlotPoints, PlotUi};

use crate::render::{LineHandle, RenderBinding, RenderError};

struct PlotLine {
    handle: LineHandle,
    name: String,
    color: Color32,
    points: Vec<[f64; 2]>,
    visible: bool,
}

/// [`RenderBinding`] backed by `egui_plot` lines, redrawn every frame.
#[derive(Default)]
pub struct PlotBinding {
    lines: Vec<PlotLine>,
    next_id: u64,
}

impl PlotBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, handle: LineHandle) -> Result<&mut PlotLine, RenderError> {
        self.lines
            .iter_mut()
            .find(|line| line.handle == handle)
            .ok_or(RenderError::UnknownLine(handle))
    }

    /// Draws every visible line into the plot.
    pub fn show(&self, plot_ui: &mut PlotUi) {
        for line in self.lines.iter().filter(|line| line.visible) {
            let points: PlotPoints = line.points.iter().copied().collect();
            plot_ui.line(Line::new(points).color(line.color).name(&line.name));
        }
    }
}

impl RenderBinding for PlotBinding {
    fn create_line(
        &mut self,
        name: &str,
        xy: &[[f64; 2]],
        color: Color32,
    ) -> Result<LineHandle, RenderError> {
        let handle = LineHandle(self.next_id);
        self.next_id += 1;
        self.lines.push(PlotLine {
            handle,
            name: name.to_owned(),
            color,
            points: xy.to_vec(),
            visible: true,
        });
        Ok(handle)
    }

    fn delete_line(&mut self, handle: LineHandle) -> Result<(), RenderError> {
        let index = self
            .lines
            .iter()
            .position(|line| line.handle == handle)
            .ok_or(RenderError::UnknownLine(handle))?;
        self.lines.remove(index);
        Ok(())
    }

    fn set_visible(&mut self, handle: LineHandle, visible: bool) -> Result<(), RenderError> {
        self.line_mut(handle)?.visible = visible;
        Ok(())
    }

    fn write_y(&mut self, handle: LineHandle, values: &[f64]) -> Result<(), RenderError> {
        let line = self.line_mut(handle)?;
        if line.points.len() != values.len() {
            return Err(RenderError::LengthMismatch {
                expected: line.points.len(),
                actual: values.len(),
            });
        }
        for (point, &y) in line.points.iter_mut().zip(values) {
            point[1] = y;
        }
        Ok(())
    }
}
