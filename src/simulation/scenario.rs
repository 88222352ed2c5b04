//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies at t = 0)
//! - active force set (`AccelSet`)
//!
//! Every check on the configuration happens here, before any stepping.

use tracing::{info, warn};

use crate::configuration::config::{BodyConfig, CentralConfig, ScenarioConfig};
use crate::error::{ConfigError, Result};
use crate::simulation::engine::Engine;
use crate::simulation::forces::{AccelSet, CentralMass, PairwiseGravity};
use crate::simulation::integrator::{Integrator, RunStatus};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, System};
use crate::simulation::trajectory::TrajectoryRecorder;
use crate::simulation::vector::Vec2;

pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub central: Option<CentralMass>,
    pub system: System,
    pub forces: AccelSet,
}

/// Everything a finished run hands to the caller
#[derive(Debug)]
pub struct SimulationRun {
    pub status: RunStatus,
    pub recorder: TrajectoryRecorder,
    pub system: System, // final state
    pub initial_energy: f64,
    pub final_energy: f64,
    pub initial_momentum: Vec2,
    pub final_momentum: Vec2,
}

fn vec2(what: impl Into<String>, coords: &[f64]) -> std::result::Result<Vec2, ConfigError> {
    Vec2::from_slice(coords).map_err(|source| ConfigError::Dimension {
        what: what.into(),
        source,
    })
}

fn build_body(i: usize, bc: &BodyConfig) -> std::result::Result<Body, ConfigError> {
    let body = Body::new(
        bc.m,
        vec2(format!("position of body {i}"), &bc.x)?,
        vec2(format!("velocity of body {i}"), &bc.v)?,
    )
    .with_radius(bc.radius);
    Ok(match &bc.name {
        Some(name) => body.with_name(name.as_str()),
        None => body,
    })
}

fn build_central(g: f64, cc: &CentralConfig) -> std::result::Result<CentralMass, ConfigError> {
    if !cc.m.is_finite() || !cc.radius.is_finite() {
        return Err(ConfigError::NonFinite { what: "central body".into() });
    }
    if cc.m <= 0.0 {
        return Err(ConfigError::NonPositiveCentralMass(cc.m));
    }
    if cc.radius < 0.0 {
        return Err(ConfigError::NegativeCentralRadius(cc.radius));
    }
    let position = vec2("position of central body", &cc.x)?;
    if !position.is_finite() {
        return Err(ConfigError::NonFinite { what: "position of central body".into() });
    }
    Ok(CentralMass {
        g,
        mass: cc.m,
        position,
        radius: cc.radius,
    })
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> std::result::Result<Self, ConfigError> {
        // Bodies: map `BodyConfig` -> runtime `Body`
        let bodies = cfg
            .bodies
            .iter()
            .enumerate()
            .map(|(i, bc)| build_body(i, bc))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        // Initial system state: bodies at t = 0
        let system = System::new(bodies);
        system.validate()?;

        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters::new(p_cfg.g, p_cfg.dt, p_cfg.num_points).with_points_inter(p_cfg.points_inter);
        parameters.validate()?;

        // Engine (runtime) from EngineConfig
        let engine = Engine {
            scheme: cfg.engine.scheme.into(),
            pairwise: cfg.engine.pairwise,
        };

        let central = cfg
            .central
            .as_ref()
            .map(|cc| build_central(parameters.g, cc))
            .transpose()?;

        // Forces: the fixed central mass first, then mutual attraction
        let mut forces = AccelSet::new();
        if let Some(c) = &central {
            forces = forces.with(c.clone());
        }
        if engine.pairwise {
            forces = forces.with(PairwiseGravity { g: parameters.g });
        }
        if forces.is_empty() {
            warn!("no force terms configured; bodies will move in straight lines");
        }

        Ok(Self {
            engine,
            parameters,
            central,
            system,
            forces,
        })
    }

    pub fn into_integrator(self) -> std::result::Result<Integrator, ConfigError> {
        Integrator::new(self.system, self.forces, self.parameters, self.engine.scheme)
    }

    /// Run the whole scenario, recording every step
    pub fn run(self) -> Result<SimulationRun> {
        let mut integrator = self.into_integrator()?;
        let params = integrator.parameters();
        let mut recorder = TrajectoryRecorder::new(integrator.system().len(), params.num_points);

        info!(
            scheme = %integrator.scheme(),
            bodies = integrator.system().len(),
            num_points = params.num_points,
            "starting run"
        );

        let initial_energy = integrator.total_energy();
        let initial_momentum = integrator.system().total_momentum();
        let status = integrator.run(&mut recorder)?;
        let final_energy = integrator.total_energy();
        let final_momentum = integrator.system().total_momentum();

        Ok(SimulationRun {
            status,
            recorder,
            system: integrator.into_system(),
            initial_energy,
            final_energy,
            initial_momentum,
            final_momentum,
        })
    }
}
