//! Result aggregation and decision policy
//!
//! - Result types and the JSON report shape
//! - Synchronization decision policy

pub mod policy;
pub mod result;
