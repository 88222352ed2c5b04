pub mod error;
pub mod simulation;
pub mod configuration;
pub mod visualization;

pub use error::{ConfigError, Error, TrajectoryError, VectorError};

pub use simulation::vector::{Vector, Vec2};
pub use simulation::states::{Body, System};
pub use simulation::params::Parameters;
pub use simulation::engine::{Engine, Scheme};
pub use simulation::forces::{AccelSet, Acceleration, BodyRef, CentralMass, Contact, PairwiseGravity};
pub use simulation::integrator::{Integrator, Phase, RunStatus, StepOutcome};
pub use simulation::trajectory::{Trajectory, TrajectoryRecorder};
pub use simulation::scenario::{Scenario, SimulationRun};

pub use configuration::config::{BodyConfig, CentralConfig, EngineConfig, ParametersConfig, ScenarioConfig, SchemeConfig};

pub use visualization::playback::{play, Renderer, Segment, SegmentLog, TracingRenderer};
