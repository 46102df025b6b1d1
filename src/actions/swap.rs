//! Liquidswap swaps sized by the fiat oracle.

use std::sync::Arc;

use crate::blockchain::sender::TxSender;
use crate::blockchain::transaction::{EntryFunction, FunctionId, ModuleId, MoveValue, TypeTag};
use crate::blockchain::types::{AptosResult, GasParams};
use crate::config::SwapConfig;
use crate::oracle::client::PriceOracle;
use crate::oracle::swap::{compute_swap_amounts, SwapAmounts, TokenTable};

/// Swaps one listed token for another through the router's `swap` entry function.
#[derive(Clone)]
pub struct LiquidSwap {
    sender: TxSender,
    oracle: Arc<dyn PriceOracle>,
    tokens: TokenTable,
    router: ModuleId,
    curve: TypeTag,
    slippage_bps: u32,
    gas: GasParams,
}

impl LiquidSwap {
    pub fn new(
        sender: TxSender,
        oracle: Arc<dyn PriceOracle>,
        tokens: TokenTable,
        config: &SwapConfig,
        gas: GasParams,
    ) -> AptosResult<Self> {
        Ok(Self {
            sender,
            oracle,
            tokens,
            router: config.router_module.parse()?,
            curve: config.curve_type.parse()?,
            slippage_bps: config.slippage_bps,
            gas,
        })
    }

    /// Price both legs and size the swap without submitting.
    pub async fn quote(&self, from: &str, to: &str, amount: f64) -> AptosResult<SwapAmounts> {
        let token_a = self.tokens.get(from)?;
        let token_b = self.tokens.get(to)?;

        let price_a = self.oracle.get_price(&token_a.symbol).await?;
        let price_b = self.oracle.get_price(&token_b.symbol).await?;

        let amounts = compute_swap_amounts(
            price_a,
            price_b,
            amount,
            token_a.decimals,
            token_b.decimals,
            self.slippage_bps,
        )?;

        tracing::debug!(
            from = %token_a.symbol,
            to = %token_b.symbol,
            price_a = price_a,
            price_b = price_b,
            amount_in = amounts.amount_in,
            min_amount_out = amounts.min_amount_out,
            "Swap quoted"
        );

        Ok(amounts)
    }

    /// Swap `amount` whole units of `from` into `to`. Returns the transaction hash.
    pub async fn swap(&self, from: &str, to: &str, amount: f64) -> AptosResult<String> {
        let amounts = self.quote(from, to, amount).await?;
        let entry = self.swap_entry(from, to, amounts)?;

        tracing::info!(from = %from, to = %to, amount = amount, "Swapping");
        self.sender.send("swap", entry, self.gas).await
    }

    /// `{router}::swap<A, B, Curve>(amount_in, min_amount_out)`.
    pub fn swap_entry(&self, from: &str, to: &str, amounts: SwapAmounts) -> AptosResult<EntryFunction> {
        let coin_a = self.tokens.get(from)?.coin_type.clone();
        let coin_b = self.tokens.get(to)?.coin_type.clone();

        EntryFunction::new(
            FunctionId::new(self.router.clone(), "swap"),
            vec![coin_a, coin_b, self.curve.clone()],
            &[MoveValue::U64(amounts.amount_in), MoveValue::U64(amounts.min_amount_out)],
        )
    }
}

impl std::fmt::Debug for LiquidSwap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiquidSwap")
            .field("router", &self.router)
            .field("slippage_bps", &self.slippage_bps)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::account::Account;
    use crate::blockchain::builder::TxBuilder;
    use crate::blockchain::client::NodeClient;
    use crate::blockchain::types::AptosError;
    use crate::config::schema::{default_tokens, TokenConfig};
    use async_trait::async_trait;
    use ed25519_dalek::SigningKey;

    struct StaticOracle;

    #[async_trait]
    impl PriceOracle for StaticOracle {
        async fn get_price(&self, symbol: &str) -> AptosResult<f64> {
            match symbol {
                "ALT" => Ok(10.0),
                "APT" => Ok(5.0),
                other => Err(AptosError::PriceUnavailable(other.to_string())),
            }
        }
    }

    fn swapper() -> LiquidSwap {
        let client = NodeClient::from_url("http://127.0.0.1:1/v1").unwrap();
        let account = Arc::new(Account::from_signing_key(SigningKey::from_bytes(&[5u8; 32])));
        let sender = TxSender::new(account, TxBuilder::new(client));

        let mut entries = default_tokens();
        entries.push(TokenConfig::new("ALT", "0xa11::alt::Alt", 6));
        let tokens = TokenTable::new(&entries).unwrap();

        LiquidSwap::new(
            sender,
            Arc::new(StaticOracle),
            tokens,
            &SwapConfig::default(),
            GasParams::new(9_000, 100),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_quote_uses_token_decimals() {
        let amounts = swapper().quote("alt", "apt", 2.0).await.unwrap();
        assert_eq!(amounts.amount_in, 2_000_000);
        assert_eq!(amounts.min_amount_out, 396_000_000);
    }

    #[tokio::test]
    async fn test_quote_unknown_symbol() {
        let err = swapper().quote("DOGE", "APT", 1.0).await.unwrap_err();
        assert!(matches!(err, AptosError::UnknownToken(_)));
    }

    #[test]
    fn test_swap_entry_layout() {
        let swap = swapper();
        let amounts = SwapAmounts {
            amount_in: 2_000_000,
            min_amount_out: 396_000_000,
        };
        let entry = swap.swap_entry("ALT", "APT", amounts).unwrap();

        assert_eq!(entry.function, "swap");
        assert_eq!(entry.module.name, "scripts_v2");
        assert_eq!(entry.ty_args.len(), 3);
        assert_eq!(entry.ty_args[0], "0xa11::alt::Alt".parse::<TypeTag>().unwrap());
        assert_eq!(entry.ty_args[1], "0x1::aptos_coin::AptosCoin".parse::<TypeTag>().unwrap());
        assert_eq!(entry.ty_args[2], SwapConfig::default().curve_type.parse::<TypeTag>().unwrap());
        assert_eq!(entry.args[0], 2_000_000u64.to_le_bytes().to_vec());
        assert_eq!(entry.args[1], 396_000_000u64.to_le_bytes().to_vec());
    }
}
