//! Simulation modules.

pub mod pathlength;
