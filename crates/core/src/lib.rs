//! Core types shared across the embedly crates.
//!
//! This crate provides:
//! - Configuration structures with layered loading

pub mod config;

pub use config::{ApiConfig, ConfigError, FREE_HOST, PRO_HOST};
