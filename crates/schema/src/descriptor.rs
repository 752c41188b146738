//! Contract interface descriptors.
//!
//! A [`ContractSchema`] lists the constructor, functions, events and errors
//! of one contract. Descriptors are plain data: they compute their own
//! signatures and selectors, and leave encoding to [`crate::codec`].

use crate::types::ParamType;
use alloy_primitives::{keccak256, Selector, B256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a function may change remote state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mutability {
    Pure,
    View,
    NonPayable,
    Payable,
}

impl Mutability {
    /// True for `pure` and `view` functions.
    pub const fn is_read_only(self) -> bool {
        matches!(self, Self::Pure | Self::View)
    }
}

impl fmt::Display for Mutability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pure => "pure",
            Self::View => "view",
            Self::NonPayable => "nonpayable",
            Self::Payable => "payable",
        })
    }
}

/// A typed parameter of a function, event or error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Parameter name (may be empty)
    pub name: String,
    /// ABI type
    pub ty: ParamType,
    /// Source-level type when it differs from the ABI type, e.g. `contract IERC20`
    pub internal_type: Option<String>,
    /// Event fields only: stored in a topic instead of the data section
    pub indexed: bool,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
            internal_type: None,
            indexed: false,
        }
    }

    /// An unnamed parameter.
    pub fn unnamed(ty: ParamType) -> Self {
        Self::new("", ty)
    }

    pub fn with_internal_type(mut self, internal_type: impl Into<String>) -> Self {
        self.internal_type = Some(internal_type.into());
        self
    }

    pub const fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    /// Source-level type, falling back to the ABI type.
    pub fn internal_type(&self) -> String {
        self.internal_type
            .clone()
            .unwrap_or_else(|| self.ty.to_string())
    }
}

fn signature(name: &str, params: &[Param]) -> String {
    let types: Vec<String> = params.iter().map(|p| p.ty.to_string()).collect();
    format!("{}({})", name, types.join(","))
}

fn selector(signature: &str) -> Selector {
    let hash = keccak256(signature.as_bytes());
    Selector::from_slice(&hash[..4])
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constructor {
    pub inputs: Vec<Param>,
    pub mutability: Mutability,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub inputs: Vec<Param>,
    pub outputs: Vec<Param>,
    pub mutability: Mutability,
}

impl Function {
    /// Canonical signature, e.g. `launch(uint256,uint32,uint32)`.
    pub fn signature(&self) -> String {
        signature(&self.name, &self.inputs)
    }

    /// First four bytes of the keccak-256 hash of the signature.
    pub fn selector(&self) -> Selector {
        selector(&self.signature())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub name: String,
    pub inputs: Vec<Param>,
    pub anonymous: bool,
}

impl Event {
    pub fn signature(&self) -> String {
        signature(&self.name, &self.inputs)
    }

    /// Full keccak-256 hash of the signature, emitted as the first log topic.
    pub fn topic(&self) -> B256 {
        keccak256(self.signature().as_bytes())
    }

    pub fn indexed_count(&self) -> usize {
        self.inputs.iter().filter(|p| p.indexed).count()
    }
}

/// A named error condition the contract may revert with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiError {
    pub name: String,
    pub inputs: Vec<Param>,
}

impl AbiError {
    pub fn signature(&self) -> String {
        signature(&self.name, &self.inputs)
    }

    pub fn selector(&self) -> Selector {
        selector(&self.signature())
    }
}

/// Interface descriptor of a single contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractSchema {
    pub name: String,
    pub constructor: Option<Constructor>,
    pub functions: Vec<Function>,
    pub events: Vec<Event>,
    pub errors: Vec<AbiError>,
}

impl ContractSchema {
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn event(&self, name: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.name == name)
    }

    pub fn error(&self, name: &str) -> Option<&AbiError> {
        self.errors.iter().find(|e| e.name == name)
    }

    pub fn function_by_selector(&self, selector: Selector) -> Option<&Function> {
        self.functions.iter().find(|f| f.selector() == selector)
    }

    /// Anonymous events carry no signature topic and are never matched.
    pub fn event_by_topic(&self, topic: B256) -> Option<&Event> {
        self.events
            .iter()
            .find(|e| !e.anonymous && e.topic() == topic)
    }

    pub fn error_by_selector(&self, selector: Selector) -> Option<&AbiError> {
        self.errors.iter().find(|e| e.selector() == selector)
    }
}
