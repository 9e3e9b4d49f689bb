//! Tech Pulse storefront library.
//!
//! Hosts everything around the pure engines in `techpulse-core`: client
//! storage and sessions, the generative-model pipelines, the catalog store
//! and the JSON HTTP surface. The binary in `main.rs` and the CLI crate are
//! thin shells over this library.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod ai;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod notify;
pub mod routes;
pub mod session;
pub mod state;
pub mod storage;
