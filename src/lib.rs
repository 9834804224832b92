//! Freight desk service
//!
//! This crate verifies motor carriers against the FMCSA registry and
//! answers load searches over an in-memory dataset, behind a small
//! API-key-guarded HTTP interface.

#![warn(missing_docs)]

pub mod api;
pub mod carrier;
pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
