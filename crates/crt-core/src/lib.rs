pub mod clock;
pub mod config;
pub mod deflection;
pub mod error;
pub mod parameter;
pub mod position;
pub mod shape;

pub use clock::{ManualWallClock, SimulationClock, SystemWallClock, WallClock};
pub use config::ScopeConfig;
pub use deflection::{DeflectionModel, DriveSignal};
pub use error::{SimError, SimResult};
pub use parameter::{DeflectionMode, SimulationParameters};
pub use position::BeamPosition;
pub use shape::{CubicBezierCurve, Line, QuadraticBezierCurve, Shape};
