//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, slippage <= 100%)
//! - Check that every module id and coin type parses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ToolkitConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;
use std::fmt;

use crate::blockchain::transaction::{ModuleId, TypeTag};
use crate::config::schema::ToolkitConfig;

/// Highest decimal precision accepted for a token.
const MAX_DECIMALS: u8 = 18;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate the whole configuration, collecting every error.
pub fn validate_config(config: &ToolkitConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url(&mut errors, "node.url", &config.node.url);
    if config.node.request_timeout_secs == 0 {
        errors.push(ValidationError::new("node.request_timeout_secs", "must be > 0"));
    }
    if config.node.expiration_offset_secs == 0 {
        errors.push(ValidationError::new("node.expiration_offset_secs", "must be > 0"));
    }

    check_url(&mut errors, "oracle.url", &config.oracle.url);
    if config.oracle.request_timeout_secs == 0 {
        errors.push(ValidationError::new("oracle.request_timeout_secs", "must be > 0"));
    }

    for (field, gas) in [
        ("gas.transfer", config.gas.transfer),
        ("gas.swap", config.gas.swap),
        ("gas.marketplace", config.gas.marketplace),
        ("gas.mint", config.gas.mint),
    ] {
        if gas.max_gas_amount == 0 || gas.gas_unit_price == 0 {
            errors.push(ValidationError::new(field, "gas amount and unit price must be > 0"));
        }
    }

    check_module(&mut errors, "swap.router_module", &config.swap.router_module);
    check_type(&mut errors, "swap.curve_type", &config.swap.curve_type);
    if config.swap.slippage_bps > 10_000 {
        errors.push(ValidationError::new(
            "swap.slippage_bps",
            format!("{} exceeds 10000 (100%)", config.swap.slippage_bps),
        ));
    }

    let mut symbols = HashSet::new();
    for (i, token) in config.tokens.iter().enumerate() {
        let field = format!("tokens[{}]", i);
        if token.symbol.trim().is_empty() {
            errors.push(ValidationError::new(&field, "symbol must not be empty"));
        } else if !symbols.insert(token.symbol.to_uppercase()) {
            errors.push(ValidationError::new(
                &field,
                format!("duplicate symbol '{}'", token.symbol),
            ));
        }
        check_type(&mut errors, &format!("{}.coin_type", field), &token.coin_type);
        if token.decimals > MAX_DECIMALS {
            errors.push(ValidationError::new(
                format!("{}.decimals", field),
                format!("{} exceeds {}", token.decimals, MAX_DECIMALS),
            ));
        }
    }

    check_module(&mut errors, "marketplace.topaz_module", &config.marketplace.topaz_module);
    check_module(&mut errors, "marketplace.bluemove_module", &config.marketplace.bluemove_module);
    check_type(&mut errors, "marketplace.listing_coin", &config.marketplace.listing_coin);
    if config.marketplace.price_decimals > MAX_DECIMALS {
        errors.push(ValidationError::new(
            "marketplace.price_decimals",
            format!("{} exceeds {}", config.marketplace.price_decimals, MAX_DECIMALS),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<std::net::SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    match url::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            field,
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(field, format!("invalid URL '{}': {}", value, e))),
    }
}

fn check_module(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if value.parse::<ModuleId>().is_err() {
        errors.push(ValidationError::new(field, format!("invalid module id '{}'", value)));
    }
}

fn check_type(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if value.parse::<TypeTag>().is_err() {
        errors.push(ValidationError::new(field, format!("invalid type '{}'", value)));
    }
}
