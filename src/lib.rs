//! Payroll engine for hourly shift work
//!
//! This crate resolves the hourly wage in force on a date, computes the pay
//! for a single shift with a 25% night differential between 22:00 and 05:00,
//! and maps calendar dates to payroll periods that close on a configurable
//! day of the month. An HTTP API in [`api`] exposes the calculations.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
