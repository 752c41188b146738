//! Configuration types for the crowdfunding client.
//!
//! This crate provides:
//! - Network types and their default chain ids
//! - Contract addresses of a Crowdfund deployment
//! - Configuration loading and validation

pub mod network;

pub use network::{ConfigError, Deployment, DeploymentBuilder, NetworkType};
