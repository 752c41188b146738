//! Command handlers.
//!
//! Each handler returns the text to print so the binary stays a thin
//! argument-parsing shell.

use crate::config::Config;
use alloy_primitives::{hex, B256};
use client::CrowdfundReader;
use eyre::{eyre, WrapErr};
use schema::{
    codec::{self, format_value},
    ContractSchema,
};
use tracing::{info, warn};

fn parse_hex(input: &str) -> eyre::Result<Vec<u8>> {
    hex::decode(input.trim()).wrap_err_with(|| format!("Invalid hex: {input}"))
}

fn lookup(contract: &str) -> eyre::Result<&'static ContractSchema> {
    Ok(schema::builtin(contract)?)
}

/// Pretty-printed JSON ABI of a contract.
pub fn abi(contract: &str) -> eyre::Result<String> {
    let schema = lookup(contract)?;
    Ok(serde_json::to_string_pretty(&schema.to_json_abi()?)?)
}

/// Validate every built-in descriptor.
pub fn validate() -> eyre::Result<String> {
    let mut lines = Vec::new();
    for schema in schema::builtins() {
        schema
            .validate()
            .wrap_err_with(|| format!("{} is invalid", schema.name))?;
        lines.push(format!(
            "{}: ok ({} functions, {} events, {} errors)",
            schema.name,
            schema.functions.len(),
            schema.events.len(),
            schema.errors.len()
        ));
    }
    Ok(lines.join("\n"))
}

/// Signature table: selectors for functions and errors, topics for events.
pub fn selectors(contract: &str) -> eyre::Result<String> {
    let schema = lookup(contract)?;
    let mut lines = Vec::new();

    for function in &schema.functions {
        lines.push(format!(
            "function {} {} [{}]",
            function.selector(),
            function.signature(),
            function.mutability
        ));
    }
    for event in &schema.events {
        lines.push(format!("event    {} {}", event.topic(), event.signature()));
    }
    for error in &schema.errors {
        lines.push(format!("error    {} {}", error.selector(), error.signature()));
    }

    Ok(lines.join("\n"))
}

/// Hex calldata for a call to `function` with textual arguments.
pub fn encode(contract: &str, function: &str, args: &[String]) -> eyre::Result<String> {
    let schema = lookup(contract)?;
    let function = schema
        .function(function)
        .ok_or_else(|| eyre!("{} has no function named {}", schema.name, function))?;

    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let values = codec::parse_args(&function.inputs, &args)?;
    let data = codec::encode_function_call(function, &values)?;

    Ok(data.to_string())
}

/// Decode the return data of `function`.
pub fn decode_output(contract: &str, function: &str, data: &str) -> eyre::Result<String> {
    let schema = lookup(contract)?;
    let values = codec::decode_output(schema, function, &parse_hex(data)?)?;
    let values: Vec<String> = values.iter().map(format_value).collect();
    Ok(values.join("\n"))
}

/// Decode calldata into `name(arg, ..)`.
pub fn decode_call(contract: &str, data: &str) -> eyre::Result<String> {
    let schema = lookup(contract)?;
    let call = codec::decode_call(schema, &parse_hex(data)?)?;
    let args: Vec<String> = call.args.iter().map(format_value).collect();
    Ok(format!("{}({})", call.name, args.join(", ")))
}

/// Decode a log record into `Name { field: value, .. }`.
pub fn decode_log(contract: &str, topics: &[String], data: &str) -> eyre::Result<String> {
    let schema = lookup(contract)?;
    let topics = topics
        .iter()
        .map(|t| {
            t.parse::<B256>()
                .wrap_err_with(|| format!("Invalid topic: {t}"))
        })
        .collect::<eyre::Result<Vec<_>>>()?;

    let event = codec::decode_log(schema, &topics, &parse_hex(data)?)?;
    let fields: Vec<String> = event
        .fields
        .iter()
        .map(|(name, value)| format!("{}: {}", name, format_value(value)))
        .collect();
    Ok(format!("{} {{ {} }}", event.name, fields.join(", ")))
}

/// Name the error carried by revert data.
pub fn decode_revert(contract: &str, data: &str) -> eyre::Result<String> {
    let schema = lookup(contract)?;
    let reason = codec::decode_revert(schema, &parse_hex(data)?)?;
    Ok(reason.to_string())
}

/// Number of campaigns on the configured deployment.
pub async fn count(config: &Config) -> eyre::Result<String> {
    let provider = client::create_provider(&config.rpc_url).await?;
    let reader = CrowdfundReader::from_deployment(provider, &config.deployment);

    info!(crowdfund = %reader.address(), "Querying campaign count");
    Ok(reader.count().await?.to_string())
}

/// Pledge token of the configured deployment.
pub async fn token(config: &Config) -> eyre::Result<String> {
    let provider = client::create_provider(&config.rpc_url).await?;
    let reader = CrowdfundReader::from_deployment(provider, &config.deployment);

    info!(crowdfund = %reader.address(), "Querying pledge token");
    let token = reader.token().await?;
    if token != config.deployment.token {
        warn!(
            configured = %config.deployment.token,
            onchain = %token,
            "Configured token differs from the contract's token"
        );
    }
    Ok(token.to_checksum(None))
}
