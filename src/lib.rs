//! Cooler Engine library crate.
//!
//! This crate exposes the vending cooler profit estimator and the API
//! components as reusable modules.  External applications may depend
//! on the `cooler_engine` crate and call into `engine::compute`
//! directly or embed the API via `api::build_router`.

pub mod models;
pub mod error;
pub mod params;
pub mod engine;
pub mod report;
pub mod config;
pub mod api;
