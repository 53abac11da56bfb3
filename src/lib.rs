//! Payroll Derivation Engine
//!
//! This crate derives monthly payroll for hourly employees from attendance,
//! overtime and cash advance records: working days in a period, hours lost to
//! absences, base pay, stored overtime pay, advance deductions and net pay,
//! with an audit trace for every figure.
//!
//! All calculations are pure functions over an explicit [`config::Settings`]
//! value and an injected as-of date. Advance balances produced by amortization
//! are returned to the caller, never written by the engine.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
