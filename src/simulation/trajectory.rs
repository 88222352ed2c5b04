//! Per-body position history
//!
//! [`TrajectoryRecorder`] is append-only while the integrator runs and is
//! handed read-only to playback afterwards. Nothing is ever dropped, so the
//! path can be redrawn at any sampling interval.

use super::states::System;
use super::vector::Vec2;
use crate::error::TrajectoryError;

/// Ordered positions of one body, index = step
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trajectory {
    positions: Vec<Vec2>,
}

impl Trajectory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
        }
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position(&self, step: usize) -> Option<Vec2> {
        self.positions.get(step).copied()
    }

    pub fn initial(&self) -> Option<Vec2> {
        self.positions.first().copied()
    }

    pub fn last(&self) -> Option<Vec2> {
        self.positions.last().copied()
    }

    /// Step-to-step deltas: `position[i + 1] - position[i]`
    pub fn displacements(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.positions.windows(2).map(|w| w[1].sub(&w[0]))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrajectoryRecorder {
    trajectories: Vec<Trajectory>,
}

impl TrajectoryRecorder {
    /// One empty trajectory per body, each sized for `num_points` steps
    /// plus the initial position
    pub fn new(num_bodies: usize, num_points: usize) -> Self {
        Self {
            trajectories: (0..num_bodies)
                .map(|_| Trajectory::with_capacity(num_points + 1))
                .collect(),
        }
    }

    pub fn num_bodies(&self) -> usize {
        self.trajectories.len()
    }

    /// Number of steps recorded for every body (the shortest trajectory)
    pub fn recorded_steps(&self) -> usize {
        self.trajectories.iter().map(Trajectory::len).min().unwrap_or(0)
    }

    pub fn trajectory(&self, body: usize) -> Option<&Trajectory> {
        self.trajectories.get(body)
    }

    pub fn trajectories(&self) -> &[Trajectory] {
        &self.trajectories
    }

    /// Append `position` as step `step_index` of `body`
    pub fn record(&mut self, body: usize, step_index: usize, position: Vec2) -> Result<(), TrajectoryError> {
        let trajectory = self
            .trajectories
            .get_mut(body)
            .ok_or(TrajectoryError::UnknownBody(body))?;
        if step_index != trajectory.len() {
            return Err(TrajectoryError::OutOfOrder {
                body,
                expected: trajectory.len(),
                found: step_index,
            });
        }
        trajectory.positions.push(position);
        Ok(())
    }

    /// Record every body's current position as step `step_index`
    pub fn record_system(&mut self, step_index: usize, system: &System) -> Result<(), TrajectoryError> {
        for (i, b) in system.bodies.iter().enumerate() {
            self.record(i, step_index, b.position)?;
        }
        Ok(())
    }

    pub fn position(&self, body: usize, step: usize) -> Result<Vec2, TrajectoryError> {
        let trajectory = self.trajectory(body).ok_or(TrajectoryError::UnknownBody(body))?;
        trajectory.position(step).ok_or(TrajectoryError::StepOutOfRange {
            body,
            step,
            len: trajectory.len(),
        })
    }

    /// `position[step_b] - position[step_a]` for `body`
    pub fn displacement_between(&self, body: usize, step_a: usize, step_b: usize) -> Result<Vec2, TrajectoryError> {
        let from = self.position(body, step_a)?;
        let to = self.position(body, step_b)?;
        Ok(to.sub(&from))
    }

    /// Sampled step indices `0, k, 2k, ...`, always ending on the last
    /// recorded step
    pub fn sample_steps(&self, points_inter: usize) -> Vec<usize> {
        let len = self.recorded_steps();
        if len == 0 {
            return Vec::new();
        }
        let last = len - 1;
        let mut steps: Vec<usize> = (0..=last).step_by(points_inter.max(1)).collect();
        if steps.last() != Some(&last) {
            steps.push(last);
        }
        steps
    }
}
