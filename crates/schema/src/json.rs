//! JSON ABI representation.
//!
//! The standard array form emitted by solc and consumed by client libraries:
//! one object per constructor/function/event/error, tagged by `type`.

use crate::{
    descriptor::{AbiError, Constructor, ContractSchema, Event, Function, Mutability, Param},
    SchemaError,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonParam {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    internal_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    indexed: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum JsonEntry {
    #[serde(rename_all = "camelCase")]
    Constructor {
        inputs: Vec<JsonParam>,
        state_mutability: Mutability,
    },
    #[serde(rename_all = "camelCase")]
    Function {
        name: String,
        inputs: Vec<JsonParam>,
        #[serde(default)]
        outputs: Vec<JsonParam>,
        state_mutability: Mutability,
    },
    Event {
        name: String,
        inputs: Vec<JsonParam>,
        #[serde(default)]
        anonymous: bool,
    },
    Error {
        name: String,
        #[serde(default)]
        inputs: Vec<JsonParam>,
    },
}

/// Entry kinds without a name or an encoding of their own.
const SKIPPED_KINDS: [&str; 2] = ["fallback", "receive"];

impl From<&Param> for JsonParam {
    fn from(param: &Param) -> Self {
        Self {
            name: param.name.clone(),
            ty: param.ty.to_string(),
            internal_type: Some(param.internal_type()),
            indexed: None,
        }
    }
}

fn to_json_params(params: &[Param]) -> Vec<JsonParam> {
    params.iter().map(JsonParam::from).collect()
}

fn from_json_params(params: Vec<JsonParam>) -> Result<Vec<Param>, SchemaError> {
    params
        .into_iter()
        .map(|p| {
            let ty = p.ty.parse()?;
            // internalType is only kept when it says more than the ABI type
            let internal_type = p.internal_type.filter(|t| *t != p.ty);
            Ok(Param {
                name: p.name,
                ty,
                internal_type,
                indexed: p.indexed.unwrap_or(false),
            })
        })
        .collect()
}

impl ContractSchema {
    /// Render as a JSON ABI array: constructor, then functions, events, errors.
    pub fn to_json_abi(&self) -> Result<serde_json::Value, SchemaError> {
        let mut entries = Vec::new();

        if let Some(constructor) = &self.constructor {
            entries.push(JsonEntry::Constructor {
                inputs: to_json_params(&constructor.inputs),
                state_mutability: constructor.mutability,
            });
        }

        entries.extend(self.functions.iter().map(|f| JsonEntry::Function {
            name: f.name.clone(),
            inputs: to_json_params(&f.inputs),
            outputs: to_json_params(&f.outputs),
            state_mutability: f.mutability,
        }));

        entries.extend(self.events.iter().map(|e| JsonEntry::Event {
            name: e.name.clone(),
            inputs: e
                .inputs
                .iter()
                .map(|p| JsonParam {
                    indexed: Some(p.indexed),
                    ..JsonParam::from(p)
                })
                .collect(),
            anonymous: e.anonymous,
        }));

        entries.extend(self.errors.iter().map(|e| JsonEntry::Error {
            name: e.name.clone(),
            inputs: to_json_params(&e.inputs),
        }));

        Ok(serde_json::to_value(&entries)?)
    }

    /// Parse a JSON ABI array into a descriptor named `name`.
    ///
    /// Types outside the supported vocabulary (including tuples) are rejected.
    pub fn from_json_abi(name: impl Into<String>, json: &str) -> Result<Self, SchemaError> {
        let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
        let mut schema = Self {
            name: name.into(),
            constructor: None,
            functions: Vec::new(),
            events: Vec::new(),
            errors: Vec::new(),
        };

        for value in values {
            let kind = value.get("type").and_then(|t| t.as_str()).unwrap_or_default();
            if SKIPPED_KINDS.contains(&kind) {
                debug!(contract = %schema.name, kind, "Skipping ABI entry");
                continue;
            }

            match serde_json::from_value(value)? {
                JsonEntry::Constructor {
                    inputs,
                    state_mutability,
                } => {
                    if schema.constructor.is_some() {
                        return Err(SchemaError::Duplicate {
                            kind: "constructor",
                            name: schema.name,
                        });
                    }
                    schema.constructor = Some(Constructor {
                        inputs: from_json_params(inputs)?,
                        mutability: state_mutability,
                    });
                }
                JsonEntry::Function {
                    name,
                    inputs,
                    outputs,
                    state_mutability,
                } => schema.functions.push(Function {
                    name,
                    inputs: from_json_params(inputs)?,
                    outputs: from_json_params(outputs)?,
                    mutability: state_mutability,
                }),
                JsonEntry::Event {
                    name,
                    inputs,
                    anonymous,
                } => schema.events.push(Event {
                    name,
                    inputs: from_json_params(inputs)?,
                    anonymous,
                }),
                JsonEntry::Error { name, inputs } => schema.errors.push(AbiError {
                    name,
                    inputs: from_json_params(inputs)?,
                }),
            }
        }

        Ok(schema)
    }
}
