//! Token table and swap amount computation.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::blockchain::transaction::TypeTag;
use crate::blockchain::types::{AptosError, AptosResult};
use crate::config::TokenConfig;

/// Basis points in one whole.
const BPS_DENOMINATOR: u128 = 10_000;

/// A resolved token table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub symbol: String,
    pub coin_type: TypeTag,
    pub decimals: u8,
}

/// Symbol → coin type and precision. Lookups are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct TokenTable {
    tokens: HashMap<String, TokenInfo>,
}

impl TokenTable {
    /// Build the table from configuration entries.
    ///
    /// Fails if a coin type does not parse or a symbol appears twice.
    pub fn new(entries: &[TokenConfig]) -> AptosResult<Self> {
        let mut tokens = HashMap::with_capacity(entries.len());
        for entry in entries {
            let coin_type: TypeTag = entry.coin_type.parse()?;
            let symbol = entry.symbol.to_uppercase();
            match tokens.entry(symbol.clone()) {
                Entry::Occupied(_) => return Err(AptosError::DuplicateToken(entry.symbol.clone())),
                Entry::Vacant(slot) => {
                    slot.insert(TokenInfo {
                        symbol,
                        coin_type,
                        decimals: entry.decimals,
                    });
                }
            }
        }
        Ok(Self { tokens })
    }

    pub fn get(&self, symbol: &str) -> AptosResult<&TokenInfo> {
        self.tokens
            .get(&symbol.to_uppercase())
            .ok_or_else(|| AptosError::UnknownToken(symbol.to_string()))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// On-chain integer amounts for one swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapAmounts {
    /// Input in the smallest unit of coin A.
    pub amount_in: u64,
    /// Minimum acceptable output in the smallest unit of coin B.
    pub min_amount_out: u64,
}

/// Size a swap of `amount` units of A into B.
///
/// The input is rounded to the nearest base unit. The expected output is
/// `floor(price_a / price_b × amount × 10^decimals_b)`, then reduced by
/// `slippage_bps` and floored again.
pub fn compute_swap_amounts(
    price_a: f64,
    price_b: f64,
    amount: f64,
    decimals_a: u8,
    decimals_b: u8,
    slippage_bps: u32,
) -> AptosResult<SwapAmounts> {
    if !price_a.is_finite() || price_a <= 0.0 {
        return Err(AptosError::Amount(format!("price of input token must be positive, got {}", price_a)));
    }
    if !price_b.is_finite() || price_b <= 0.0 {
        return Err(AptosError::Amount(format!("price of output token must be positive, got {}", price_b)));
    }
    if !amount.is_finite() || amount < 0.0 {
        return Err(AptosError::Amount(format!("swap amount must be non-negative, got {}", amount)));
    }
    if u128::from(slippage_bps) > BPS_DENOMINATOR {
        return Err(AptosError::Amount(format!("slippage of {} bps exceeds 100%", slippage_bps)));
    }

    let amount_in = to_u64((amount * 10f64.powi(i32::from(decimals_a))).round(), "input")?;
    let expected_out =
        to_u64((price_a / price_b * amount * 10f64.powi(i32::from(decimals_b))).floor(), "output")?;

    let min_amount_out =
        u128::from(expected_out) * (BPS_DENOMINATOR - u128::from(slippage_bps)) / BPS_DENOMINATOR;

    Ok(SwapAmounts {
        amount_in,
        // Never larger than expected_out, so it fits
        min_amount_out: min_amount_out as u64,
    })
}

fn to_u64(value: f64, what: &str) -> AptosResult<u64> {
    if value >= u64::MAX as f64 {
        return Err(AptosError::Amount(format!("{} amount {} overflows u64", what, value)));
    }
    Ok(value as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::default_tokens;

    #[test]
    fn test_non_native_to_native() {
        // 2 units of a 6-decimal coin at 10 into an 8-decimal coin at 5, 1% slippage
        let amounts = compute_swap_amounts(10.0, 5.0, 2.0, 6, 8, 100).unwrap();
        assert_eq!(amounts.amount_in, 2_000_000);
        assert_eq!(amounts.min_amount_out, 396_000_000);
    }

    #[test]
    fn test_native_input_uses_eight_decimals() {
        let amounts = compute_swap_amounts(5.0, 1.0, 1.5, 8, 6, 0).unwrap();
        assert_eq!(amounts.amount_in, 150_000_000);
        assert_eq!(amounts.min_amount_out, 7_500_000);
    }

    #[test]
    fn test_output_is_floored() {
        // 1/3 × 10^6 = 333333.33.. → 333333, then 99% → 329999.67 → 329999
        let amounts = compute_swap_amounts(1.0, 3.0, 1.0, 6, 6, 100).unwrap();
        assert_eq!(amounts.min_amount_out, 329_999);
    }

    #[test]
    fn test_input_is_rounded() {
        // 0.1 + 0.2 style representation error must not lose a unit
        let amounts = compute_swap_amounts(1.0, 1.0, 0.3, 6, 6, 0).unwrap();
        assert_eq!(amounts.amount_in, 300_000);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        assert!(compute_swap_amounts(0.0, 1.0, 1.0, 6, 6, 100).is_err());
        assert!(compute_swap_amounts(1.0, f64::NAN, 1.0, 6, 6, 100).is_err());
        assert!(compute_swap_amounts(1.0, 1.0, -1.0, 6, 6, 100).is_err());
        assert!(compute_swap_amounts(1.0, 1.0, 1.0, 6, 6, 10_001).is_err());
        assert!(matches!(
            compute_swap_amounts(1e20, 1.0, 1.0, 6, 8, 0),
            Err(AptosError::Amount(_))
        ));
    }

    #[test]
    fn test_token_table_lookup_is_case_insensitive() {
        let table = TokenTable::new(&default_tokens()).unwrap();
        assert_eq!(table.len(), 3);

        let apt = table.get("apt").unwrap();
        assert_eq!(apt.decimals, 8);
        assert_eq!(apt.coin_type, "0x1::aptos_coin::AptosCoin".parse::<TypeTag>().unwrap());
        assert_eq!(table.get("Usdc").unwrap().decimals, 6);
    }

    #[test]
    fn test_unknown_symbol() {
        let table = TokenTable::new(&default_tokens()).unwrap();
        assert!(matches!(table.get("DOGE"), Err(AptosError::UnknownToken(s)) if s == "DOGE"));
    }

    #[test]
    fn test_bad_coin_type_rejected() {
        let entries = vec![TokenConfig::new("BAD", "not a type", 6)];
        assert!(TokenTable::new(&entries).is_err());
    }

    #[test]
    fn test_duplicate_symbol_rejected() {
        let mut entries = default_tokens();
        entries.push(TokenConfig::new("usdc", "0xbad::fake::Usdc", 6));

        let err = TokenTable::new(&entries).unwrap_err();
        assert!(matches!(err, AptosError::DuplicateToken(s) if s == "usdc"));
    }
}
