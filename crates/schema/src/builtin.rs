//! Descriptors of the contracts this workspace talks to.

use crate::{
    descriptor::{AbiError, Constructor, ContractSchema, Event, Function, Mutability, Param},
    types::ParamType,
    SchemaError,
};
use std::sync::LazyLock;

const UINT256: ParamType = ParamType::Uint(256);
const UINT32: ParamType = ParamType::Uint(32);

static CROWDFUND: LazyLock<ContractSchema> = LazyLock::new(|| ContractSchema {
    name: "Crowdfund".to_string(),
    constructor: Some(Constructor {
        inputs: vec![Param::new("_token", ParamType::Address)],
        mutability: Mutability::NonPayable,
    }),
    functions: vec![
        function("cancel", vec![Param::new("_id", UINT256)], vec![]),
        function("claim", vec![Param::new("_id", UINT256)], vec![]),
        view("count", vec![Param::unnamed(UINT256)]),
        function(
            "launch",
            vec![
                Param::new("_goal", UINT256),
                Param::new("_start", UINT32),
                Param::new("_end", UINT32),
            ],
            vec![],
        ),
        function(
            "pledge",
            vec![Param::new("_id", UINT256), Param::new("_amount", UINT256)],
            vec![],
        ),
        function("refund", vec![Param::new("_id", UINT256)], vec![]),
        view(
            "token",
            vec![Param::unnamed(ParamType::Address).with_internal_type("contract IERC20")],
        ),
        function(
            "unpledge",
            vec![Param::new("_id", UINT256), Param::new("_amount", UINT256)],
            vec![],
        ),
    ],
    events: vec![
        event("Canceled", vec![Param::new("id", UINT256)]),
        event(
            "Claimed",
            vec![Param::new("id", UINT256), Param::new("amount", UINT256)],
        ),
        event(
            "Launched",
            vec![
                Param::new("creator", ParamType::Address),
                Param::new("goal", UINT256),
                Param::new("start", UINT32),
                Param::new("end", UINT32),
            ],
        ),
        event("Pledged", pledge_fields()),
        event("Refunded", pledge_fields()),
        event("Unpledged", pledge_fields()),
    ],
    errors: ["CampaignClosed", "CampaignOngoing", "InvalidStart", "InvalidStartEnd", "NotCreator"]
        .into_iter()
        .map(|name| AbiError {
            name: name.to_string(),
            inputs: vec![],
        })
        .collect(),
});

static IERC20: LazyLock<ContractSchema> = LazyLock::new(|| ContractSchema {
    name: "IERC20".to_string(),
    constructor: None,
    functions: vec![
        function(
            "transfer",
            vec![
                Param::unnamed(ParamType::Address),
                Param::unnamed(UINT256),
            ],
            vec![Param::unnamed(ParamType::Bool)],
        ),
        function(
            "transferFrom",
            vec![
                Param::unnamed(ParamType::Address),
                Param::unnamed(ParamType::Address),
                Param::unnamed(UINT256),
            ],
            vec![Param::unnamed(ParamType::Bool)],
        ),
    ],
    events: vec![],
    errors: vec![],
});

fn function(name: &str, inputs: Vec<Param>, outputs: Vec<Param>) -> Function {
    Function {
        name: name.to_string(),
        inputs,
        outputs,
        mutability: Mutability::NonPayable,
    }
}

fn view(name: &str, outputs: Vec<Param>) -> Function {
    Function {
        name: name.to_string(),
        inputs: vec![],
        outputs,
        mutability: Mutability::View,
    }
}

fn event(name: &str, inputs: Vec<Param>) -> Event {
    Event {
        name: name.to_string(),
        inputs,
        anonymous: false,
    }
}

/// `(sender, id, amount)`, shared by the pledge bookkeeping events.
fn pledge_fields() -> Vec<Param> {
    vec![
        Param::new("sender", ParamType::Address),
        Param::new("id", UINT256),
        Param::new("amount", UINT256),
    ]
}

/// The Crowdfund contract.
pub fn crowdfund() -> &'static ContractSchema {
    &CROWDFUND
}

/// The ERC20 transfer interface used by Crowdfund.
pub fn ierc20() -> &'static ContractSchema {
    &IERC20
}

/// All built-in descriptors.
pub fn builtins() -> [&'static ContractSchema; 2] {
    [crowdfund(), ierc20()]
}

/// Look up a built-in descriptor by contract name, ignoring case.
pub fn builtin(name: &str) -> Result<&'static ContractSchema, SchemaError> {
    builtins()
        .into_iter()
        .find(|schema| schema.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| SchemaError::UnknownContract(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_are_valid() {
        for schema in builtins() {
            schema.validate().unwrap();
        }
    }

    #[test]
    fn test_crowdfund_shape() {
        let schema = crowdfund();
        assert_eq!(schema.functions.len(), 8);
        assert_eq!(schema.events.len(), 6);
        assert_eq!(schema.errors.len(), 5);

        let constructor = schema.constructor.as_ref().unwrap();
        assert_eq!(constructor.inputs[0].name, "_token");
        assert_eq!(constructor.mutability, Mutability::NonPayable);

        let read_only: Vec<&str> = schema
            .functions
            .iter()
            .filter(|f| f.mutability.is_read_only())
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(read_only, vec!["count", "token"]);

        assert!(schema.events.iter().all(|e| e.indexed_count() == 0 && !e.anonymous));
        assert!(schema.errors.iter().all(|e| e.inputs.is_empty()));
    }

    #[test]
    fn test_crowdfund_signatures() {
        let schema = crowdfund();
        assert_eq!(
            schema.function("launch").unwrap().signature(),
            "launch(uint256,uint32,uint32)"
        );
        assert_eq!(
            schema.event("Launched").unwrap().signature(),
            "Launched(address,uint256,uint32,uint32)"
        );
        assert_eq!(
            schema.event("Refunded").unwrap().signature(),
            "Refunded(address,uint256,uint256)"
        );
        assert_eq!(
            schema.error("InvalidStartEnd").unwrap().signature(),
            "InvalidStartEnd()"
        );
    }

    #[test]
    fn test_token_output_internal_type() {
        let token = crowdfund().function("token").unwrap();
        assert_eq!(token.outputs[0].ty, ParamType::Address);
        assert_eq!(token.outputs[0].internal_type(), "contract IERC20");
    }

    #[test]
    fn test_ierc20_shape() {
        let schema = ierc20();
        assert!(schema.constructor.is_none());
        assert!(schema.events.is_empty());
        assert!(schema.errors.is_empty());
        assert_eq!(
            schema.function("transferFrom").unwrap().signature(),
            "transferFrom(address,address,uint256)"
        );
        assert!(schema
            .functions
            .iter()
            .all(|f| f.outputs == vec![Param::unnamed(ParamType::Bool)]));
    }

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(builtin("crowdfund").unwrap().name, "Crowdfund");
        assert_eq!(builtin("IERC20").unwrap().name, "IERC20");
        assert!(matches!(
            builtin("WETH"),
            Err(SchemaError::UnknownContract(_))
        ));
    }

    #[test]
    fn test_json_abi_matches_published_abi() {
        let json = crowdfund().to_json_abi().unwrap();
        let entries = json.as_array().unwrap();
        // constructor + 8 functions + 6 events + 5 errors
        assert_eq!(entries.len(), 20);
        assert_eq!(entries[0]["type"], "constructor");
        assert_eq!(entries[0]["inputs"][0]["name"], "_token");

        let token = entries
            .iter()
            .find(|e| e["name"] == "token")
            .unwrap();
        assert_eq!(token["stateMutability"], "view");
        assert_eq!(token["outputs"][0]["internalType"], "contract IERC20");
        assert_eq!(token["outputs"][0]["type"], "address");

        let reparsed =
            ContractSchema::from_json_abi("Crowdfund", &json.to_string()).unwrap();
        assert_eq!(&reparsed, crowdfund());
    }
}
