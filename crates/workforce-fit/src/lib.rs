//! Workforce fit prediction: scores how well a worker suits a job role and serves ranked
//! recommendations over HTTP.

pub mod config;
pub mod error;
pub mod fit;
pub mod telemetry;
pub mod workforce;
