//! Contract bindings for the crowdfunding system.
//!
//! This crate consolidates the Solidity interfaces the client talks to:
//! - Crowdfund (campaign launch, pledges, claims and refunds)
//! - IERC20 (the pledged token, transfer functions only)
//!
//! All bindings are generated using alloy's `sol!` macro.

pub mod crowdfund;
pub mod token;
