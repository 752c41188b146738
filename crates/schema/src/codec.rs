//! Name-based encoding and decoding against a descriptor.
//!
//! The typed bindings cover the known contracts at compile time; this module
//! does the same at runtime for any [`ContractSchema`], keyed by the names
//! and selectors in the descriptor.

use crate::{
    descriptor::{ContractSchema, Function, Param},
    types::ParamType,
    CodecError,
};
use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{hex, Bytes, Selector, B256, U256};
use alloy_sol_types::{Panic, Revert, SolError};
use std::fmt;
use tracing::debug;

/// A function call recovered from calldata.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCall {
    pub name: String,
    pub args: Vec<DynSolValue>,
}

/// A log record matched to a declared event.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedEvent {
    pub name: String,
    /// Fields in declaration order
    pub fields: Vec<(String, DynSolValue)>,
}

/// Why a call failed, as far as the revert payload tells.
#[derive(Debug, Clone, PartialEq)]
pub enum RevertReason {
    /// One of the contract's declared errors
    Custom {
        name: String,
        fields: Vec<DynSolValue>,
    },
    /// `Error(string)` from `require`/`revert` with a message
    Message(String),
    /// `Panic(uint256)` from a failed assertion or arithmetic fault
    Panic(U256),
    /// Revert without data
    Empty,
    Unknown(Bytes),
}

impl fmt::Display for RevertReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom { name, fields } => {
                let fields: Vec<String> = fields.iter().map(format_value).collect();
                write!(f, "{}({})", name, fields.join(", "))
            }
            Self::Message(message) => write!(f, "Error({message:?})"),
            Self::Panic(code) => write!(f, "Panic(0x{code:x})"),
            Self::Empty => f.write_str("<empty revert>"),
            Self::Unknown(data) => write!(f, "<unknown revert {data}>"),
        }
    }
}

fn tuple_type(params: &[Param]) -> DynSolType {
    DynSolType::Tuple(params.iter().map(|p| p.ty.to_dyn()).collect())
}

fn encode_params(params: &[Param], args: &[DynSolValue]) -> Result<Vec<u8>, CodecError> {
    if params.len() != args.len() {
        return Err(CodecError::ArgumentCount {
            expected: params.len(),
            got: args.len(),
        });
    }

    for (index, (param, arg)) in params.iter().zip(args).enumerate() {
        if !param.ty.to_dyn().matches(arg) || !fits(&param.ty, arg) {
            return Err(CodecError::ArgumentType {
                index,
                expected: param.ty.to_string(),
            });
        }
    }

    Ok(DynSolValue::Tuple(args.to_vec()).abi_encode_params())
}

fn decode_params(params: &[Param], data: &[u8]) -> Result<Vec<DynSolValue>, CodecError> {
    if params.is_empty() {
        return Ok(Vec::new());
    }

    let values = match tuple_type(params).abi_decode_params(data)? {
        DynSolValue::Tuple(values) => values,
        other => vec![other],
    };

    for (index, (param, value)) in params.iter().zip(&values).enumerate() {
        if !fits(&param.ty, value) {
            return Err(CodecError::OutOfRange {
                index,
                expected: param.ty.to_string(),
            });
        }
    }

    Ok(values)
}

/// Whether integer values lie within the declared bit width, recursing into arrays.
fn fits(ty: &ParamType, value: &DynSolValue) -> bool {
    match (ty, value) {
        (ParamType::Uint(bits), DynSolValue::Uint(u, _)) => u.bit_len() <= *bits,
        (ParamType::Int(bits), DynSolValue::Int(i, _)) => {
            // sign-extending the low `bits` bits must give back the value
            let shift = 256usize.saturating_sub(*bits);
            i.wrapping_shl(shift).asr(shift) == *i
        }
        (ParamType::Array(inner), DynSolValue::Array(values))
        | (ParamType::FixedArray(inner, _), DynSolValue::FixedArray(values)) => {
            values.iter().all(|v| fits(inner, v))
        }
        _ => true,
    }
}

/// Encode a call to function `name`: selector followed by the ABI-encoded arguments.
pub fn encode_call(
    schema: &ContractSchema,
    name: &str,
    args: &[DynSolValue],
) -> Result<Bytes, CodecError> {
    let function = schema
        .function(name)
        .ok_or_else(|| CodecError::UnknownFunction {
            contract: schema.name.clone(),
            name: name.to_string(),
        })?;

    encode_function_call(function, args)
}

/// Encode a call to an already resolved function.
pub fn encode_function_call(
    function: &Function,
    args: &[DynSolValue],
) -> Result<Bytes, CodecError> {
    let body = encode_params(&function.inputs, args)?;
    let mut data = Vec::with_capacity(4 + body.len());
    data.extend_from_slice(function.selector().as_slice());
    data.extend_from_slice(&body);

    debug!(
        function = %function.signature(),
        len = data.len(),
        "Encoded call"
    );

    Ok(data.into())
}

/// Encode constructor arguments (appended to the creation bytecode, no selector).
pub fn encode_constructor(
    schema: &ContractSchema,
    args: &[DynSolValue],
) -> Result<Bytes, CodecError> {
    let constructor = schema
        .constructor
        .as_ref()
        .ok_or_else(|| CodecError::NoConstructor {
            contract: schema.name.clone(),
        })?;

    Ok(encode_params(&constructor.inputs, args)?.into())
}

/// Coerce textual arguments into values of the declared parameter types.
///
/// Accepts the usual notations: decimal or `0x` integers, hex addresses and
/// bytes, `true`/`false`.
pub fn parse_args(params: &[Param], args: &[&str]) -> Result<Vec<DynSolValue>, CodecError> {
    if params.len() != args.len() {
        return Err(CodecError::ArgumentCount {
            expected: params.len(),
            got: args.len(),
        });
    }

    params
        .iter()
        .zip(args)
        .enumerate()
        .map(|(index, (param, arg))| {
            param
                .ty
                .to_dyn()
                .coerce_str(arg)
                .map_err(|source| CodecError::InvalidArgument { index, source })
        })
        .collect()
}

/// Decode the return data of function `name`.
pub fn decode_output(
    schema: &ContractSchema,
    name: &str,
    data: &[u8],
) -> Result<Vec<DynSolValue>, CodecError> {
    let function = schema
        .function(name)
        .ok_or_else(|| CodecError::UnknownFunction {
            contract: schema.name.clone(),
            name: name.to_string(),
        })?;

    decode_params(&function.outputs, data)
}

/// Recover the function and arguments from calldata.
pub fn decode_call(schema: &ContractSchema, calldata: &[u8]) -> Result<DecodedCall, CodecError> {
    if calldata.len() < 4 {
        return Err(CodecError::CallDataTooShort(calldata.len()));
    }

    let selector = Selector::from_slice(&calldata[..4]);
    let function = schema
        .function_by_selector(selector)
        .ok_or(CodecError::UnknownSelector(selector))?;

    Ok(DecodedCall {
        name: function.name.clone(),
        args: decode_params(&function.inputs, &calldata[4..])?,
    })
}

/// Match a log record against the declared events.
///
/// The first topic selects the event; indexed fields are read from the
/// remaining topics and the rest from `data`. Indexed strings, bytes and
/// arrays only carry their hash and are returned as the raw topic.
pub fn decode_log(
    schema: &ContractSchema,
    topics: &[B256],
    data: &[u8],
) -> Result<DecodedEvent, CodecError> {
    let (signature, indexed_topics) = topics.split_first().ok_or(CodecError::NoTopics)?;
    let event = schema
        .event_by_topic(*signature)
        .ok_or(CodecError::UnknownEvent(*signature))?;

    let expected = 1 + event.indexed_count();
    if topics.len() != expected {
        return Err(CodecError::TopicCount {
            event: event.name.clone(),
            expected,
            got: topics.len(),
        });
    }

    let body: Vec<Param> = event
        .inputs
        .iter()
        .filter(|p| !p.indexed)
        .cloned()
        .collect();
    let mut body_values = decode_params(&body, data)?.into_iter();
    let mut indexed_topics = indexed_topics.iter();

    let mut fields = Vec::with_capacity(event.inputs.len());
    for param in &event.inputs {
        let value = if param.indexed {
            // topic count was checked above
            let Some(topic) = indexed_topics.next() else {
                break;
            };
            if param.ty.is_hashed_in_topic() {
                DynSolValue::FixedBytes(*topic, 32)
            } else {
                let value = param.ty.to_dyn().abi_decode(topic.as_slice())?;
                if !fits(&param.ty, &value) {
                    return Err(CodecError::OutOfRange {
                        index: fields.len(),
                        expected: param.ty.to_string(),
                    });
                }
                value
            }
        } else {
            let Some(value) = body_values.next() else {
                break;
            };
            value
        };
        fields.push((param.name.clone(), value));
    }

    debug!(contract = %schema.name, event = %event.name, "Decoded log");

    Ok(DecodedEvent {
        name: event.name.clone(),
        fields,
    })
}

/// Map revert data to a declared error, or to one of the builtin reverts.
pub fn decode_revert(schema: &ContractSchema, data: &[u8]) -> Result<RevertReason, CodecError> {
    if data.is_empty() {
        return Ok(RevertReason::Empty);
    }
    if data.len() < 4 {
        return Ok(RevertReason::Unknown(Bytes::copy_from_slice(data)));
    }

    let selector = Selector::from_slice(&data[..4]);

    if let Some(error) = schema.error_by_selector(selector) {
        return Ok(RevertReason::Custom {
            name: error.name.clone(),
            fields: decode_params(&error.inputs, &data[4..])?,
        });
    }

    if selector.0 == Revert::SELECTOR {
        if let Ok(revert) = Revert::abi_decode(data) {
            return Ok(RevertReason::Message(revert.reason));
        }
    }

    if selector.0 == Panic::SELECTOR {
        if let Ok(panic) = Panic::abi_decode(data) {
            return Ok(RevertReason::Panic(panic.code));
        }
    }

    Ok(RevertReason::Unknown(Bytes::copy_from_slice(data)))
}

/// Render a value for humans: decimal integers, checksummed addresses, hex bytes.
pub fn format_value(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::Int(i, _) => i.to_string(),
        DynSolValue::Uint(u, _) => u.to_string(),
        DynSolValue::Address(address) => address.to_checksum(None),
        DynSolValue::FixedBytes(word, size) => hex::encode_prefixed(&word[..*size]),
        DynSolValue::Bytes(bytes) => hex::encode_prefixed(bytes),
        DynSolValue::String(s) => format!("{s:?}"),
        DynSolValue::Array(values)
        | DynSolValue::FixedArray(values)
        | DynSolValue::Tuple(values) => {
            let items: Vec<String> = values.iter().map(format_value).collect();
            format!("[{}]", items.join(", "))
        }
        other => format!("{other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::{crowdfund, ierc20};
    use alloy_primitives::{b256, hex, Address, I256};

    fn uint(value: u64, bits: usize) -> DynSolValue {
        DynSolValue::Uint(U256::from(value), bits)
    }

    #[test]
    fn test_encode_transfer() {
        let to = Address::repeat_byte(0x11);
        let data = encode_call(
            ierc20(),
            "transfer",
            &[DynSolValue::Address(to), uint(1000, 256)],
        )
        .unwrap();

        assert_eq!(data.len(), 4 + 64);
        assert_eq!(&data[..4], &hex!("a9059cbb"));
        assert_eq!(&data[16..36], to.as_slice());
        assert_eq!(U256::from_be_slice(&data[36..68]), U256::from(1000));
    }

    #[test]
    fn test_encode_no_args() {
        let data = encode_call(crowdfund(), "count", &[]).unwrap();
        assert_eq!(&data[..], &hex!("06661abd"));
    }

    #[test]
    fn test_encode_unknown_function() {
        let err = encode_call(crowdfund(), "withdraw", &[]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnknownFunction { ref name, .. } if name == "withdraw"
        ));
    }

    #[test]
    fn test_encode_wrong_arity() {
        let err = encode_call(crowdfund(), "pledge", &[uint(1, 256)]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::ArgumentCount {
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn test_encode_wrong_type() {
        // `_start` is a uint32
        let err = encode_call(
            crowdfund(),
            "launch",
            &[uint(100, 256), uint(1, 256), uint(2, 32)],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CodecError::ArgumentType { index: 1, ref expected } if expected == "uint32"
        ));
    }

    #[test]
    fn test_encode_value_wider_than_type() {
        // 2^40 carries the uint32 tag but not a uint32 value
        let err = encode_call(
            crowdfund(),
            "launch",
            &[uint(1, 256), uint(1 << 40, 32), uint(3, 32)],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CodecError::ArgumentType { index: 1, ref expected } if expected == "uint32"
        ));

        assert!(encode_call(
            crowdfund(),
            "launch",
            &[uint(1, 256), uint(u32::MAX.into(), 32), uint(3, 32)],
        )
        .is_ok());
    }

    #[test]
    fn test_signed_width() {
        let int8 = |v: i64| DynSolValue::Int(I256::try_from(v).unwrap(), 8);
        assert!(fits(&ParamType::Int(8), &int8(127)));
        assert!(fits(&ParamType::Int(8), &int8(-128)));
        assert!(!fits(&ParamType::Int(8), &int8(128)));
        assert!(!fits(&ParamType::Int(8), &int8(-129)));
        assert!(fits(&ParamType::Int(256), &DynSolValue::Int(I256::MIN, 256)));
    }

    #[test]
    fn test_decode_call_dirty_word() {
        let mut data = encode_call(
            crowdfund(),
            "launch",
            &[uint(1000, 256), uint(100, 32), uint(200, 32)],
        )
        .unwrap()
        .to_vec();
        // set a bit above the uint32 range of `_start`
        data[4 + 32 + 27] = 0xff;

        assert!(matches!(
            decode_call(crowdfund(), &data),
            Err(CodecError::OutOfRange { index: 1, ref expected }) if expected == "uint32"
        ));
    }

    #[test]
    fn test_encode_constructor() {
        let token = Address::repeat_byte(0xaa);
        let data = encode_constructor(crowdfund(), &[DynSolValue::Address(token)]).unwrap();
        assert_eq!(data.len(), 32);
        assert_eq!(&data[12..], token.as_slice());

        assert!(matches!(
            encode_constructor(ierc20(), &[]),
            Err(CodecError::NoConstructor { .. })
        ));
    }

    #[test]
    fn test_parse_args() {
        let launch = crowdfund().function("launch").unwrap();
        let args = parse_args(&launch.inputs, &["1000", "0x10", "200"]).unwrap();
        assert_eq!(args, vec![uint(1000, 256), uint(16, 32), uint(200, 32)]);

        let err = parse_args(&launch.inputs, &["1000", "soon", "200"]).unwrap_err();
        assert!(matches!(err, CodecError::InvalidArgument { index: 1, .. }));
    }

    #[test]
    fn test_decode_call() {
        let data = encode_call(crowdfund(), "unpledge", &[uint(3, 256), uint(25, 256)]).unwrap();
        let call = decode_call(crowdfund(), &data).unwrap();
        assert_eq!(call.name, "unpledge");
        assert_eq!(call.args, vec![uint(3, 256), uint(25, 256)]);

        assert!(matches!(
            decode_call(crowdfund(), &hex!("0666")),
            Err(CodecError::CallDataTooShort(2))
        ));
        assert!(matches!(
            decode_call(crowdfund(), &hex!("a9059cbb")),
            Err(CodecError::UnknownSelector(_))
        ));
    }

    #[test]
    fn test_decode_output() {
        let mut word = [0u8; 32];
        word[31] = 42;
        let values = decode_output(crowdfund(), "count", &word).unwrap();
        assert_eq!(values, vec![uint(42, 256)]);

        let token = Address::repeat_byte(0x22);
        let mut word = [0u8; 32];
        word[12..].copy_from_slice(token.as_slice());
        let values = decode_output(crowdfund(), "token", &word).unwrap();
        assert_eq!(values, vec![DynSolValue::Address(token)]);

        assert!(decode_output(crowdfund(), "claim", &[]).unwrap().is_empty());
    }

    #[test]
    fn test_decode_output_truncated() {
        assert!(matches!(
            decode_output(ierc20(), "transfer", &[0u8; 8]),
            Err(CodecError::Abi(_))
        ));
    }

    #[test]
    fn test_decode_launched_log() {
        let creator = Address::repeat_byte(0x05);
        let data = DynSolValue::Tuple(vec![
            DynSolValue::Address(creator),
            uint(5000, 256),
            uint(1_700_000_000, 32),
            uint(1_700_086_400, 32),
        ])
        .abi_encode_params();
        let topic = b256!("42220eef057180a76bdb7079d44d9677d0637edbc0130c00bcea2dac48e92ff8");

        let event = decode_log(crowdfund(), &[topic], &data).unwrap();
        assert_eq!(event.name, "Launched");
        let names: Vec<&str> = event.fields.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["creator", "goal", "start", "end"]);
        assert_eq!(event.fields[0].1, DynSolValue::Address(creator));
        assert_eq!(event.fields[3].1, uint(1_700_086_400, 32));
    }

    #[test]
    fn test_decode_log_errors() {
        assert!(matches!(
            decode_log(crowdfund(), &[], &[]),
            Err(CodecError::NoTopics)
        ));

        let unknown = B256::repeat_byte(0x01);
        assert!(matches!(
            decode_log(crowdfund(), &[unknown], &[]),
            Err(CodecError::UnknownEvent(t)) if t == unknown
        ));

        let canceled = crowdfund().event("Canceled").unwrap().topic();
        assert!(matches!(
            decode_log(crowdfund(), &[canceled, B256::ZERO], &[0u8; 32]),
            Err(CodecError::TopicCount {
                expected: 1,
                got: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_decode_indexed_log() {
        let json = r#"[{
            "type": "event",
            "name": "Noted",
            "anonymous": false,
            "inputs": [
                { "name": "who", "type": "address", "indexed": true },
                { "name": "memo", "type": "string", "indexed": true },
                { "name": "amount", "type": "uint256", "indexed": false }
            ]
        }]"#;
        let schema = ContractSchema::from_json_abi("Notes", json).unwrap();
        let event = schema.event("Noted").unwrap();

        let who = Address::repeat_byte(0x33);
        let memo_hash = B256::repeat_byte(0x44);
        let topics = [event.topic(), who.into_word(), memo_hash];
        let data = uint(9, 256).abi_encode();

        let decoded = decode_log(&schema, &topics, &data).unwrap();
        assert_eq!(decoded.fields[0], ("who".to_string(), DynSolValue::Address(who)));
        assert_eq!(
            decoded.fields[1],
            ("memo".to_string(), DynSolValue::FixedBytes(memo_hash, 32))
        );
        assert_eq!(decoded.fields[2], ("amount".to_string(), uint(9, 256)));
    }

    #[test]
    fn test_decode_indexed_static_array() {
        let json = r#"[{
            "type": "event",
            "name": "Pair",
            "anonymous": false,
            "inputs": [{ "name": "ids", "type": "uint8[2]", "indexed": true }]
        }]"#;
        let schema = ContractSchema::from_json_abi("Pairs", json).unwrap();
        let topic = schema.event("Pair").unwrap().topic();
        let ids_hash = B256::repeat_byte(0x44);

        let decoded = decode_log(&schema, &[topic, ids_hash], &[]).unwrap();
        assert_eq!(
            decoded.fields,
            vec![("ids".to_string(), DynSolValue::FixedBytes(ids_hash, 32))]
        );
    }

    #[test]
    fn test_decode_custom_revert() {
        let reason = decode_revert(crowdfund(), &hex!("dd94a3a4")).unwrap();
        assert_eq!(
            reason,
            RevertReason::Custom {
                name: "CampaignOngoing".to_string(),
                fields: vec![],
            }
        );
        assert_eq!(reason.to_string(), "CampaignOngoing()");
    }

    #[test]
    fn test_decode_builtin_reverts() {
        let data = Revert {
            reason: "not enough".to_string(),
        }
        .abi_encode();
        assert_eq!(
            decode_revert(crowdfund(), &data).unwrap(),
            RevertReason::Message("not enough".to_string())
        );

        let data = Panic {
            code: U256::from(0x11),
        }
        .abi_encode();
        let reason = decode_revert(crowdfund(), &data).unwrap();
        assert_eq!(reason, RevertReason::Panic(U256::from(0x11)));
        assert_eq!(reason.to_string(), "Panic(0x11)");
    }

    #[test]
    fn test_decode_other_reverts() {
        assert_eq!(
            decode_revert(crowdfund(), &[]).unwrap(),
            RevertReason::Empty
        );
        assert_eq!(
            decode_revert(crowdfund(), &hex!("deadbeef")).unwrap(),
            RevertReason::Unknown(Bytes::from(hex!("deadbeef")))
        );
        // declared errors of another contract are not recognized
        assert!(matches!(
            decode_revert(ierc20(), &hex!("93687c0b")).unwrap(),
            RevertReason::Unknown(_)
        ));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&uint(42, 256)), "42");
        assert_eq!(format_value(&DynSolValue::Bool(true)), "true");
        assert_eq!(
            format_value(&DynSolValue::Bytes(vec![0xde, 0xad])),
            "0xdead"
        );
        assert_eq!(
            format_value(&DynSolValue::Array(vec![uint(1, 8), uint(2, 8)])),
            "[1, 2]"
        );
        assert_eq!(
            format_value(&DynSolValue::Address(Address::ZERO)),
            "0x0000000000000000000000000000000000000000"
        );
    }
}
