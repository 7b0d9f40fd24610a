//! Light path lengths through the rhabdom layer of reflecting superposition
//! compound eyes, swept over tapetal and shielding pigment levels.

pub mod error;
pub mod eye;
pub mod io;
pub mod sim;

pub use error::{ConfigError, DomainAnomaly};
pub use eye::EyeParameters;
pub use sim::pathlength::{
    OutputRow, PathlengthSweep, Pigments, RowSink, RowStatePolicy, SweepConfig, SweepSummary,
    Token,
};
