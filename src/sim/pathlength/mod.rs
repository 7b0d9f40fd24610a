//! Path lengths of light through the rhabdoms of a reflecting superposition eye.
//!
//! For every combination of tapetal pigment, shielding pigment and facet, a
//! single ray is followed from the cornea into the rhabdom layer. The resulting
//! path lengths are written as one row per pigment pair.

pub mod cases;
pub mod config;
pub mod cornea;
pub mod geometry;
pub mod result;
pub mod ressens;
pub mod simulation;
pub mod sink;

pub use cases::{Evaluation, PathCase, PathlengthCaseEngine, Pigments, RayState};
pub use config::{RowStatePolicy, SweepConfig};
pub use cornea::AngleCorrectionModel;
pub use geometry::DerivedGeometry;
pub use result::{FACET_END, OutputRow, ROW_END, SweepSummary, Token};
pub use ressens::{ResolutionSensitivity, ResolutionSensitivityEngine};
pub use simulation::{PathlengthSweep, SweepState};
pub use sink::{MemorySink, RowSink};
