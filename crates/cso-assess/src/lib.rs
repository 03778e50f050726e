//! Scoring and rule-based suggestion engine for CSO accountability
//! self-assessments, plus the service and HTTP plumbing around it.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
