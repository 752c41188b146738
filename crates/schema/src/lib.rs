//! Interface descriptors for the crowdfunding contracts.
//!
//! This crate provides:
//! - A descriptor data model (functions, events, errors, mutability)
//! - The primitive ABI type vocabulary
//! - JSON ABI import/export and structural validation
//! - Name-based call encoding, output/log/revert decoding
//! - The built-in Crowdfund and IERC20 descriptors

pub mod builtin;
pub mod codec;
pub mod descriptor;
mod error;
mod json;
pub mod types;
mod validate;

pub use builtin::{builtin, builtins, crowdfund, ierc20};
pub use codec::{DecodedCall, DecodedEvent, RevertReason};
pub use descriptor::{AbiError, Constructor, ContractSchema, Event, Function, Mutability, Param};
pub use error::{CodecError, SchemaError};
pub use types::ParamType;

// Values exchanged with the codec.
pub use alloy_dyn_abi::DynSolValue;
