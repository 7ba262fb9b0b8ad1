pub mod handoff;
pub mod simulator;
pub mod views;

pub use handoff::{ParameterHandle, ParameterInbox};
pub use simulator::{FrameOutput, Simulator};
pub use views::{BeamPath, FrontView, LateralView, PlateAxis, ProjectedBeam, Rect, Viewpoints};
