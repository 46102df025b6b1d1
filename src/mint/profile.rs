//! Mint entry function shapes.

use crate::blockchain::transaction::{EntryFunction, FunctionId, ModuleId, MoveValue, TypeTag};
use crate::blockchain::types::AptosResult;

/// Allow-list mints live next to the public mint under this name.
pub const ALLOW_LIST_FUNCTION: &str = "mint_with_quantity_wl";

/// Which mint function to call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintProfile {
    /// `{module}::{function}(quantity: u64)` without type arguments.
    Public { function: FunctionId },
    /// `{module}::mint_with_quantity_wl<Coin?>(quantity: u64)`.
    AllowList {
        module: ModuleId,
        payment_coin: Option<TypeTag>,
    },
}

impl MintProfile {
    /// Public mint from an `address::module::function` string.
    pub fn public(function: &str) -> AptosResult<Self> {
        Ok(Self::Public {
            function: function.parse()?,
        })
    }

    /// Allow-list mint in `module`, optionally paid in `payment_coin`.
    pub fn allow_list(module: &str, payment_coin: Option<&str>) -> AptosResult<Self> {
        Ok(Self::AllowList {
            module: module.parse()?,
            payment_coin: payment_coin.map(str::parse::<TypeTag>).transpose()?,
        })
    }

    pub fn function_id(&self) -> FunctionId {
        match self {
            MintProfile::Public { function } => function.clone(),
            MintProfile::AllowList { module, .. } => FunctionId::new(module.clone(), ALLOW_LIST_FUNCTION),
        }
    }

    /// Entry function minting `quantity` tokens.
    pub fn entry(&self, quantity: u64) -> AptosResult<EntryFunction> {
        let ty_args = match self {
            MintProfile::Public { .. } => vec![],
            MintProfile::AllowList { payment_coin, .. } => payment_coin.iter().cloned().collect(),
        };
        EntryFunction::new(self.function_id(), ty_args, &[MoveValue::U64(quantity)])
    }
}
