//! Gammabench - approximate-adder error characterization and CORDIC-style
//! error propagation
//!
//! This library characterizes the error distribution of an approximate
//! hardware adder by exhaustive enumeration of its input domain, then
//! propagates that distribution through a K-stage weighted accumulation with
//! a Monte-Carlo simulation, predicting the accuracy impact of the adder
//! inside an iterative (CORDIC-like) algorithm without simulating the full
//! hardware.

pub mod adder;
pub mod characterize;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod json_output;
pub mod simulate;
pub mod stats;
