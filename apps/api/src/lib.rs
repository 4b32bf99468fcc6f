//! CareerLens — career recommendation and skill-gap engine.
//!
//! Pipeline: `profile` → `scoring` (+ `catalog`) → `ranking` → `gap` → `upskill`,
//! orchestrated by `engine` and exposed over HTTP by `routes`.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod errors;
pub mod gap;
pub mod models;
pub mod profile;
pub mod ranking;
pub mod routes;
pub mod scoring;
pub mod state;
pub mod upskill;
