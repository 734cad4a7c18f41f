//! Uni Bridge Exchange: role-based career matching for students, teachers,
//! university administrators, and partner companies.

pub mod config;
pub mod domain;
pub mod error;
pub mod insights;
pub mod seed;
pub mod session;
pub mod telemetry;
pub mod workflows;
