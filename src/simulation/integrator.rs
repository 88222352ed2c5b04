//! Fixed-step time integrator for the N-body system
//!
//! [`Integrator`] owns the system and walks it through three phases:
//! `Initializing` (evaluate the starting accelerations), `Stepping`, and
//! `Terminated` once `num_points` steps are done or two bodies touch.
//!
//! Every step has a read phase and a write phase. Candidate positions for
//! all bodies are written into a snapshot buffer, accelerations for all
//! bodies are evaluated from that buffer, and only then are positions and
//! velocities committed. No body ever sees another body's new position
//! within the same step.

use std::fmt;

use tracing::{debug, info, warn};

use super::engine::Scheme;
use super::forces::{AccelSet, BodyRef, Contact};
use super::params::Parameters;
use super::states::System;
use super::trajectory::TrajectoryRecorder;
use super::vector::Vec2;
use crate::error::{ConfigError, TrajectoryError};

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed {
        steps_run: usize,
    },
    Collided {
        body_a: BodyRef,
        body_b: BodyRef,
        step_index: usize,
    },
}

impl RunStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunStatus::Completed { .. })
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Completed { steps_run } => write!(f, "completed {steps_run} steps"),
            RunStatus::Collided { body_a, body_b, step_index } => {
                write!(f, "{body_a} collided with {body_b} at step {step_index}")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initializing,
    Stepping,
    Terminated(RunStatus),
}

/// Result of a single call to [`Integrator::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The system now holds the state at this step index
    Advanced(usize),
    Terminated(RunStatus),
}

pub struct Integrator {
    system: System,
    forces: AccelSet,
    params: Parameters,
    scheme: Scheme,
    phase: Phase,
    step_index: usize,
    snapshot: Vec<Vec2>, // positions the forces are evaluated at
    accelerations: Vec<Vec2>, // accelerations evaluated from `snapshot`
    corrected: Vec<Vec2>, // heun only: corrected positions awaiting commit
    velocities: Vec<Vec2>, // heun only: corrected velocities awaiting commit
    displacements: Vec<Vec2>, // second-order only: per-step position delta
}

impl Integrator {
    /// Validate the inputs and prepare an integrator in the `Initializing` phase
    pub fn new(system: System, forces: AccelSet, params: Parameters, scheme: Scheme) -> Result<Self, ConfigError> {
        system.validate()?;
        params.validate()?;

        let n = system.len();
        Ok(Self {
            system,
            forces,
            params,
            scheme,
            phase: Phase::Initializing,
            step_index: 0,
            snapshot: vec![Vec2::zeros(); n],
            accelerations: vec![Vec2::zeros(); n],
            corrected: vec![Vec2::zeros(); n],
            velocities: vec![Vec2::zeros(); n],
            displacements: Vec::new(),
        })
    }

    pub fn system(&self) -> &System {
        &self.system
    }

    pub fn into_system(self) -> System {
        self.system
    }

    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the state the system currently holds
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    /// Kinetic plus potential energy of the committed state
    pub fn total_energy(&self) -> f64 {
        let positions = self.system.positions();
        self.system.kinetic_energy() + self.forces.potential_energy(&self.system.bodies, &positions)
    }

    /// Evaluate the starting accelerations and seed the scheme
    ///
    /// Does nothing once stepping has begun; returns the terminal status if
    /// the run already ended or the bodies touch at step 0.
    pub fn initialize(&mut self) -> Result<(), RunStatus> {
        match self.phase {
            Phase::Initializing => {}
            Phase::Stepping => return Ok(()),
            Phase::Terminated(status) => return Err(status),
        }

        for (x, b) in self.snapshot.iter_mut().zip(&self.system.bodies) {
            *x = b.position;
        }
        if let Err(contact) = self.forces.accumulate_accels(&self.system.bodies, &self.snapshot, &mut self.accelerations) {
            return Err(self.collide(contact, 0));
        }
        for (b, a) in self.system.bodies.iter_mut().zip(&self.accelerations) {
            b.acceleration = *a;
        }

        if self.scheme == Scheme::SecondOrder {
            // there is no previous step to difference against, so the first
            // displacement comes from the initial velocity
            let dt = self.params.dt;
            self.displacements = self.system.bodies.iter().map(|b| b.velocity.scale(dt)).collect();
        }

        debug!(
            scheme = %self.scheme,
            bodies = self.system.len(),
            dt = self.params.dt,
            num_points = self.params.num_points,
            "integrator initialized"
        );
        self.phase = Phase::Stepping;
        Ok(())
    }

    /// Advance by one step, initializing first if needed
    pub fn step(&mut self) -> StepOutcome {
        if self.phase == Phase::Initializing {
            if let Err(status) = self.initialize() {
                return StepOutcome::Terminated(status);
            }
        }
        if let Phase::Terminated(status) = self.phase {
            return StepOutcome::Terminated(status);
        }
        let next = self.step_index + 1;
        let evaluated = match self.scheme {
            Scheme::SecondOrder => self.step_second_order(),
            Scheme::Heun => self.step_heun(),
        };
        match evaluated {
            Ok(()) => {
                self.step_index = next;
                self.system.t += self.params.dt;
                if next >= self.params.num_points {
                    info!(steps = next, t = self.system.t, "run completed");
                    self.phase = Phase::Terminated(RunStatus::Completed { steps_run: next });
                }
                StepOutcome::Advanced(next)
            }
            Err(contact) => StepOutcome::Terminated(self.collide(contact, next)),
        }
    }

    /// Step until termination, recording every committed state
    ///
    /// The current state is recorded first if `recorder` does not hold it yet.
    pub fn run(&mut self, recorder: &mut TrajectoryRecorder) -> Result<RunStatus, TrajectoryError> {
        if recorder.recorded_steps() == self.step_index {
            recorder.record_system(self.step_index, &self.system)?;
        }
        loop {
            match self.step() {
                StepOutcome::Advanced(k) => recorder.record_system(k, &self.system)?,
                StepOutcome::Terminated(status) => return Ok(status),
            }
        }
    }

    // x' = x + d, a' = f(x'), d += (a' + a) dt^2 / 2
    fn step_second_order(&mut self) -> Result<(), Contact> {
        let dt = self.params.dt;
        let half_dt2 = 0.5 * dt * dt;
        let bodies = &mut self.system.bodies;

        for ((x, b), d) in self.snapshot.iter_mut().zip(bodies.iter()).zip(&self.displacements) {
            *x = b.position.add(d);
        }

        self.forces.accumulate_accels(bodies.as_slice(), &self.snapshot, &mut self.accelerations)?;

        let rows = bodies.iter_mut().zip(&self.snapshot).zip(&self.accelerations).zip(self.displacements.iter_mut());
        for (((b, x), a), d) in rows {
            let previous = *d;
            *d = d.add(&a.add(&b.acceleration).scale(half_dt2));
            b.position = *x;
            b.acceleration = *a;
            // centred estimate: mean of the displacements either side of x'
            b.velocity = previous.add(d).scale(0.5 / dt);
        }
        Ok(())
    }

    fn step_heun(&mut self) -> Result<(), Contact> {
        let dt = self.params.dt;
        let half_dt = 0.5 * dt;
        let bodies = &mut self.system.bodies;

        // predict: x + v dt + a_prev dt^2 / 2
        for (x, b) in self.snapshot.iter_mut().zip(bodies.iter()) {
            *x = b.position.add(&b.velocity.scale(dt)).add(&b.acceleration.scale(half_dt * dt));
        }

        self.forces.accumulate_accels(bodies.as_slice(), &self.snapshot, &mut self.accelerations)?;

        // correct; the predicted position itself is discarded
        let rows = bodies.iter().zip(&self.accelerations).zip(self.corrected.iter_mut()).zip(self.velocities.iter_mut());
        for (((b, a_pred), x_new), v_new) in rows {
            *v_new = b.velocity.add(&b.acceleration.add(a_pred).scale(half_dt));
            *x_new = b.position.add(&v_new.add(&b.velocity).scale(half_dt));
        }

        // the corrected state can land inside a radius the prediction missed
        if let Some(contact) = self.forces.first_contact(bodies.as_slice(), &self.corrected) {
            return Err(contact);
        }

        let rows = bodies.iter_mut().zip(&self.accelerations).zip(&self.corrected).zip(&self.velocities);
        for (((b, a_pred), x_new), v_new) in rows {
            b.position = *x_new;
            b.velocity = *v_new;
            b.acceleration = *a_pred;
        }
        Ok(())
    }

    fn collide(&mut self, contact: Contact, step_index: usize) -> RunStatus {
        let status = RunStatus::Collided {
            body_a: contact.first,
            body_b: contact.second,
            step_index,
        };
        warn!(
            first = %self.describe(contact.first),
            second = %self.describe(contact.second),
            step = step_index,
            "collision"
        );
        self.phase = Phase::Terminated(status);
        status
    }

    fn describe(&self, body: BodyRef) -> String {
        match body {
            BodyRef::Body(i) => self.system.label(i),
            BodyRef::Central => body.to_string(),
        }
    }
}
