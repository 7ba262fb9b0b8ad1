pub mod trace;

pub use trace::{TraceBuffer, TracePoint, VisibleTracePoint};
