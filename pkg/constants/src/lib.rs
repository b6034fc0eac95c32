//! Centralized constants for the wikigen project.
//!
//! All project-wide constant values live here.
//! Change a value in one place and it applies everywhere.

pub mod api;
pub mod labels;
pub mod network;
pub mod paths;
pub mod rbac;
pub mod workload;
