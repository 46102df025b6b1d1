//! One-stop wiring of every component from configuration.
//!
//! Components are built in dependency order: node client, builder, sender,
//! then the actions that share that sender.

use std::sync::Arc;

use crate::actions::{BlueMoveMarket, LiquidSwap, TopazMarket, Transfers};
use crate::blockchain::{Account, AptosResult, NodeClient, TxBuilder, TxSender};
use crate::config::ToolkitConfig;
use crate::mint::Minter;
use crate::oracle::{HttpPriceOracle, TokenTable};
use crate::wallet::WalletInspector;

/// Every action component for one account.
#[derive(Debug, Clone)]
pub struct Toolkit {
    pub transfers: Transfers,
    pub swap: LiquidSwap,
    pub topaz: TopazMarket,
    pub bluemove: BlueMoveMarket,
    pub minter: Minter,
    pub wallet: WalletInspector,
}

impl Toolkit {
    /// Build all components for `account`. Performs no network access.
    pub fn new(config: &ToolkitConfig, account: Account) -> AptosResult<Self> {
        let client = NodeClient::new(&config.node)?;
        let builder = TxBuilder::new(client.clone())
            .with_expiration_offset(config.node.expiration_offset_secs);
        let sender = TxSender::new(Arc::new(account), builder);

        let oracle = Arc::new(HttpPriceOracle::new(&config.oracle)?);
        let tokens = TokenTable::new(&config.tokens)?;

        let toolkit = Self {
            transfers: Transfers::new(sender.clone(), config.gas.transfer),
            swap: LiquidSwap::new(sender.clone(), oracle, tokens, &config.swap, config.gas.swap)?,
            topaz: TopazMarket::new(sender.clone(), &config.marketplace, config.gas.marketplace)?,
            bluemove: BlueMoveMarket::new(sender.clone(), &config.marketplace, config.gas.marketplace)?,
            minter: Minter::new(sender.clone(), config.gas.mint),
            wallet: WalletInspector::new(client),
        };

        tracing::info!(
            address = %sender.address(),
            node = %config.node.url,
            tokens = config.tokens.len(),
            "Toolkit ready"
        );

        Ok(toolkit)
    }
}
