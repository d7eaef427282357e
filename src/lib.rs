//! Salary structure engine.
//!
//! This crate resolves a basic salary and a selection of salary components
//! (flat amounts or percentages of basic, gross or another component) into
//! gross, net and cost-to-company figures. It also derives leave balances and
//! earned wage access limits, and serves all of it over an axum HTTP API.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
