//! Intake backend for a clinic website: consultation requests, patient
//! feedback and appointment bookings over a small JSON API, persisted to
//! MySQL through a shared connection pool.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod server;
pub mod services;
pub mod utils;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
