//! Attendance Engine
//!
//! This crate turns streams of clock in / clock out events into work shifts,
//! sums worked hours per employee and per ISO week, values them with each
//! employee's hourly wage and exports the raw events as CSV. It also ships
//! the store abstraction, the service layer and the HTTP API built on top.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod service;
pub mod store;
