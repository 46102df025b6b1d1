//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the toolkit.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Liquidswap router and curve published under this address.
const LIQUIDSWAP_ADDRESS: &str =
    "0x190d44266241744264b964a37b8f09863167a12d3e70cda39376cfb4e3561e12";

/// LayerZero bridged assets.
const LAYERZERO_ASSETS: &str =
    "0xf22bede237a07e121b56d91a491eb7bcdfd1f5907926a9e58338f964a01b17fa";

/// Root configuration for the toolkit.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Node REST endpoint and request settings.
    pub node: NodeConfig,

    /// Gas budgets per action.
    pub gas: GasConfig,

    /// Fiat price oracle.
    pub oracle: OracleConfig,

    /// DEX router settings.
    pub swap: SwapConfig,

    /// Token symbol table used by swaps and mints.
    pub tokens: Vec<TokenConfig>,

    /// NFT marketplace contracts.
    pub marketplace: MarketplaceConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            node: NodeConfig::default(),
            gas: GasConfig::default(),
            oracle: OracleConfig::default(),
            swap: SwapConfig::default(),
            tokens: default_tokens(),
            marketplace: MarketplaceConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Node REST API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NodeConfig {
    /// REST base URL including the version segment (e.g. ".../v1").
    pub url: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Seconds added to the build time to form the expiration timestamp.
    pub expiration_offset_secs: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            url: "https://fullnode.mainnet.aptoslabs.com/v1".to_string(),
            request_timeout_secs: 30,
            expiration_offset_secs: 600,
        }
    }
}

/// Gas budget for one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct GasParams {
    pub max_gas_amount: u64,
    pub gas_unit_price: u64,
}

impl GasParams {
    pub const fn new(max_gas_amount: u64, gas_unit_price: u64) -> Self {
        Self {
            max_gas_amount,
            gas_unit_price,
        }
    }
}

/// Gas budgets per action kind.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GasConfig {
    pub transfer: GasParams,
    pub swap: GasParams,
    pub marketplace: GasParams,
    pub mint: GasParams,
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            transfer: GasParams::new(3_000, 100),
            swap: GasParams::new(9_000, 100),
            marketplace: GasParams::new(9_000, 100),
            mint: GasParams::new(9_000, 100),
        }
    }
}

/// Price oracle configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Base URL; `/fiat-prices` is appended.
    pub url: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            url: "https://control.pontem.network/api/integrations".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// DEX swap configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SwapConfig {
    /// Module exposing the `swap` entry function.
    pub router_module: String,

    /// Liquidity curve type argument.
    pub curve_type: String,

    /// Slippage tolerance in basis points (100 = 1%).
    pub slippage_bps: u32,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            router_module: format!("{}::scripts_v2", LIQUIDSWAP_ADDRESS),
            curve_type: format!("{}::curves::Uncorrelated", LIQUIDSWAP_ADDRESS),
            slippage_bps: 100,
        }
    }
}

/// One entry of the token symbol table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TokenConfig {
    /// Ticker symbol, matched case-insensitively (e.g. "APT").
    pub symbol: String,

    /// Fully qualified coin type (e.g. "0x1::aptos_coin::AptosCoin").
    pub coin_type: String,

    /// On-chain decimal precision.
    pub decimals: u8,
}

impl TokenConfig {
    pub fn new(symbol: &str, coin_type: &str, decimals: u8) -> Self {
        Self {
            symbol: symbol.to_string(),
            coin_type: coin_type.to_string(),
            decimals,
        }
    }
}

/// Default token table: the native coin plus the bridged stablecoins.
pub fn default_tokens() -> Vec<TokenConfig> {
    vec![
        TokenConfig::new("APT", "0x1::aptos_coin::AptosCoin", 8),
        TokenConfig::new("USDC", &format!("{}::asset::USDC", LAYERZERO_ASSETS), 6),
        TokenConfig::new("USDT", &format!("{}::asset::USDT", LAYERZERO_ASSETS), 6),
    ]
}

/// NFT marketplace configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MarketplaceConfig {
    /// Topaz marketplace module (exposes `list`).
    pub topaz_module: String,

    /// BlueMove marketplace module (exposes `batch_list_script`).
    pub bluemove_module: String,

    /// Coin type listings are priced in.
    pub listing_coin: String,

    /// Decimal precision applied to listing prices.
    pub price_decimals: u8,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            topaz_module:
                "0x2c7bccf7b31baf770fdbcc768d9e9cb3d87805e255355df5db32ac9a669010a2::marketplace_v2"
                    .to_string(),
            bluemove_module:
                "0xd1fd99c1944b84d1670a2536417e997864ad12303d19eac725891691b04d614e::marketplaceV2"
                    .to_string(),
            listing_coin: "0x1::aptos_coin::AptosCoin".to_string(),
            price_decimals: 8,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
