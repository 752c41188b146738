use crate::descriptor::Mutability;
use alloy_primitives::{Selector, B256};
use thiserror::Error;

/// Structural problems in a descriptor.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Type outside the supported primitive vocabulary
    #[error("Unknown ABI type: {0:?}")]
    UnknownType(String),

    #[error("Empty {kind} name")]
    EmptyName { kind: &'static str },

    #[error("Duplicate {kind} name: {name}")]
    Duplicate { kind: &'static str, name: String },

    #[error("Parameter of {item} is marked indexed")]
    IndexedOutsideEvent { item: String },

    #[error("Event {event} has {count} indexed fields (max {max})")]
    TooManyIndexed {
        event: String,
        count: usize,
        max: usize,
    },

    #[error("Constructor cannot be {0}")]
    InvalidConstructorMutability(Mutability),

    #[error("Unknown contract: {0}")]
    UnknownContract(String),

    #[error("Invalid JSON ABI: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures while encoding or decoding against a descriptor.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("{contract} has no function named {name}")]
    UnknownFunction { contract: String, name: String },

    #[error("{contract} has no constructor")]
    NoConstructor { contract: String },

    #[error("No function with selector {0}")]
    UnknownSelector(Selector),

    #[error("No event with topic {0}")]
    UnknownEvent(B256),

    #[error("Log has no topics")]
    NoTopics,

    #[error("Event {event} expects {expected} topics, got {got}")]
    TopicCount {
        event: String,
        expected: usize,
        got: usize,
    },

    #[error("Expected {expected} arguments, got {got}")]
    ArgumentCount { expected: usize, got: usize },

    #[error("Argument {index} is not a {expected}")]
    ArgumentType { index: usize, expected: String },

    #[error("Argument {index}: {source}")]
    InvalidArgument {
        index: usize,
        #[source]
        source: alloy_dyn_abi::Error,
    },

    #[error("Value {index} does not fit {expected}")]
    OutOfRange { index: usize, expected: String },

    #[error("Calldata too short: {0} bytes")]
    CallDataTooShort(usize),

    #[error("ABI decoding failed: {0}")]
    Abi(#[from] alloy_dyn_abi::Error),
}
