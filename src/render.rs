//! Seam between the animation core and whatever draws the lines.

use egui::Color32;

/// Opaque id of a line owned by a [`RenderBinding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineHandle(pub u64);

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("unknown line {0:?}")]
    UnknownLine(LineHandle),
    #[error("buffer length mismatch: line has {expected} points, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Owns renderable line objects. The core only ever talks to lines
/// through these calls; Y values are written in place at fixed length.
pub trait RenderBinding {
    fn create_line(
        &mut self,
        name: &str,
        xy: &[[f64; 2]],
        color: Color32,
    ) -> Result<LineHandle, RenderError>;

    fn delete_line(&mut self, handle: LineHandle) -> Result<(), RenderError>;

    fn set_visible(&mut self, handle: LineHandle, visible: bool) -> Result<(), RenderError>;

    fn write_y(&mut self, handle: LineHandle, values: &[f64]) -> Result<(), RenderError>;
}
