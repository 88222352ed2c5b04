//! Trajectory playback for an external renderer
//!
//! The core hands over a finished [`TrajectoryRecorder`]; [`play`] walks it
//! every `points_inter` steps and emits one line segment per body per
//! sample. Position to pixel scaling belongs to the renderer.

use tracing::debug;

use crate::simulation::integrator::RunStatus;
use crate::simulation::trajectory::TrajectoryRecorder;
use crate::simulation::vector::Vec2;
use crate::error::TrajectoryError;

/// Pixels per simulation length unit used by [`TracingRenderer::default`]
pub const SCALE: f64 = 100.0;

/// Drawing surface fed by [`play`]
pub trait Renderer {
    /// Draw a line for `body` from `from` to `from + displacement`
    fn draw_segment(&mut self, body: usize, from: Vec2, displacement: Vec2);

    /// Called once after the last segment
    fn finish(&mut self, _status: &RunStatus) {}
}

/// Replay `recorder` into `renderer`; returns the number of segments drawn
pub fn play<R: Renderer + ?Sized>(
    recorder: &TrajectoryRecorder,
    points_inter: usize,
    status: &RunStatus,
    renderer: &mut R,
) -> Result<usize, TrajectoryError> {
    let steps = recorder.sample_steps(points_inter);
    let mut drawn = 0;
    for pair in steps.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        for body in 0..recorder.num_bodies() {
            let from = recorder.position(body, a)?;
            let displacement = recorder.displacement_between(body, a, b)?;
            renderer.draw_segment(body, from, displacement);
            drawn += 1;
        }
    }
    renderer.finish(status);
    Ok(drawn)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub body: usize,
    pub from: Vec2,
    pub to: Vec2,
}

/// Renderer that keeps every segment in memory
#[derive(Debug, Default)]
pub struct SegmentLog {
    pub segments: Vec<Segment>,
    pub status: Option<RunStatus>,
}

impl SegmentLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Segments drawn for one body, in order
    pub fn for_body(&self, body: usize) -> impl Iterator<Item = &Segment> + '_ {
        self.segments.iter().filter(move |s| s.body == body)
    }
}

impl Renderer for SegmentLog {
    fn draw_segment(&mut self, body: usize, from: Vec2, displacement: Vec2) {
        self.segments.push(Segment {
            body,
            from,
            to: from.add(&displacement),
        });
    }

    fn finish(&mut self, status: &RunStatus) {
        self.status = Some(*status);
    }
}

/// Renderer that logs scaled segments through `tracing`
#[derive(Debug)]
pub struct TracingRenderer {
    pub scale: f64,
    pub segments: usize,
}

impl TracingRenderer {
    pub fn new(scale: f64) -> Self {
        Self { scale, segments: 0 }
    }
}

impl Default for TracingRenderer {
    fn default() -> Self {
        Self::new(SCALE)
    }
}

impl Renderer for TracingRenderer {
    fn draw_segment(&mut self, body: usize, from: Vec2, displacement: Vec2) {
        let start = from.scale(self.scale);
        let end = from.add(&displacement).scale(self.scale);
        debug!(body, from = %start, to = %end, "segment");
        self.segments += 1;
    }

    fn finish(&mut self, status: &RunStatus) {
        debug!(segments = self.segments, %status, "playback finished");
    }
}
