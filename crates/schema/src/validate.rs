//! Structural validation of descriptors.

use crate::{
    descriptor::{ContractSchema, Mutability, Param},
    SchemaError,
};
use std::collections::HashSet;

/// Indexed field limit: three topics besides the signature topic.
const MAX_INDEXED: usize = 3;
const MAX_INDEXED_ANONYMOUS: usize = 4;

fn check_unique<'a>(
    kind: &'static str,
    names: impl Iterator<Item = &'a str>,
) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for name in names {
        if name.is_empty() {
            return Err(SchemaError::EmptyName { kind });
        }
        if !seen.insert(name) {
            return Err(SchemaError::Duplicate {
                kind,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

fn check_params(item: &str, params: &[Param], allow_indexed: bool) -> Result<(), SchemaError> {
    for param in params {
        if !param.ty.is_valid() {
            return Err(SchemaError::UnknownType(param.ty.to_string()));
        }
        if param.indexed && !allow_indexed {
            return Err(SchemaError::IndexedOutsideEvent {
                item: item.to_string(),
            });
        }
    }
    Ok(())
}

impl ContractSchema {
    /// Check the structural invariants of the descriptor.
    ///
    /// Names are non-empty and unique per kind, every type is in the
    /// supported vocabulary, `indexed` only appears on event fields within
    /// the topic limit, and the constructor is `nonpayable` or `payable`.
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.name.is_empty() {
            return Err(SchemaError::EmptyName { kind: "contract" });
        }

        if let Some(constructor) = &self.constructor {
            if constructor.mutability.is_read_only() {
                return Err(SchemaError::InvalidConstructorMutability(
                    constructor.mutability,
                ));
            }
            check_params("constructor", &constructor.inputs, false)?;
        }

        check_unique("function", self.functions.iter().map(|f| f.name.as_str()))?;
        for function in &self.functions {
            check_params(&function.name, &function.inputs, false)?;
            check_params(&function.name, &function.outputs, false)?;
        }

        check_unique("event", self.events.iter().map(|e| e.name.as_str()))?;
        for event in &self.events {
            check_params(&event.name, &event.inputs, true)?;
            let max = if event.anonymous {
                MAX_INDEXED_ANONYMOUS
            } else {
                MAX_INDEXED
            };
            let count = event.indexed_count();
            if count > max {
                return Err(SchemaError::TooManyIndexed {
                    event: event.name.clone(),
                    count,
                    max,
                });
            }
        }

        check_unique("error", self.errors.iter().map(|e| e.name.as_str()))?;
        for error in &self.errors {
            check_params(&error.name, &error.inputs, false)?;
        }

        Ok(())
    }
}
