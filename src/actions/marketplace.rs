//! NFT listings on Topaz and BlueMove.

use crate::blockchain::sender::TxSender;
use crate::blockchain::transaction::{EntryFunction, FunctionId, ModuleId, MoveValue, TypeTag};
use crate::blockchain::types::{AptosError, AptosResult, GasParams};
use crate::config::MarketplaceConfig;
use crate::wallet::types::TokenId;

/// One token offered at a price in whole coin units.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub token: TokenId,
    pub price: f64,
}

impl Listing {
    pub fn new(token: TokenId, price: f64) -> Self {
        Self { token, price }
    }
}

/// Scale a whole-unit price to base units.
fn scale_price(price: f64, decimals: u8) -> AptosResult<u64> {
    let scaled = (price * 10f64.powi(i32::from(decimals))).round();
    if !scaled.is_finite() || scaled < 0.0 || scaled >= u64::MAX as f64 {
        return Err(AptosError::Amount(format!("listing price {} out of range", price)));
    }
    Ok(scaled as u64)
}

/// Topaz `list<Coin>` entry function.
#[derive(Debug, Clone)]
pub struct TopazMarket {
    sender: TxSender,
    module: ModuleId,
    coin: TypeTag,
    price_decimals: u8,
    gas: GasParams,
}

impl TopazMarket {
    pub fn new(sender: TxSender, config: &MarketplaceConfig, gas: GasParams) -> AptosResult<Self> {
        Ok(Self {
            sender,
            module: config.topaz_module.parse()?,
            coin: config.listing_coin.parse()?,
            price_decimals: config.price_decimals,
            gas,
        })
    }

    /// List one token. Returns the transaction hash.
    pub async fn list(&self, listing: &Listing) -> AptosResult<String> {
        let entry = self.list_entry(listing)?;
        tracing::info!(token = %listing.token, price = listing.price, "Listing on Topaz");
        self.sender.send("topaz_list", entry, self.gas).await
    }

    /// `list<Coin>(price, 1, creator, collection, name, property_version)`.
    pub fn list_entry(&self, listing: &Listing) -> AptosResult<EntryFunction> {
        let token = &listing.token;
        EntryFunction::new(
            FunctionId::new(self.module.clone(), "list"),
            vec![self.coin.clone()],
            &[
                MoveValue::U64(scale_price(listing.price, self.price_decimals)?),
                MoveValue::U64(1),
                MoveValue::Address(token.creator()),
                MoveValue::String(token.collection().to_string()),
                MoveValue::String(token.name().to_string()),
                MoveValue::U64(token.property_version),
            ],
        )
    }
}

/// BlueMove `batch_list_script` entry function.
#[derive(Debug, Clone)]
pub struct BlueMoveMarket {
    sender: TxSender,
    module: ModuleId,
    price_decimals: u8,
    gas: GasParams,
}

impl BlueMoveMarket {
    pub fn new(sender: TxSender, config: &MarketplaceConfig, gas: GasParams) -> AptosResult<Self> {
        Ok(Self {
            sender,
            module: config.bluemove_module.parse()?,
            price_decimals: config.price_decimals,
            gas,
        })
    }

    /// List a single token.
    pub async fn list(&self, listing: &Listing) -> AptosResult<String> {
        self.batch_list(std::slice::from_ref(listing)).await
    }

    /// List several tokens in one transaction.
    pub async fn batch_list(&self, listings: &[Listing]) -> AptosResult<String> {
        let entry = self.batch_list_entry(listings)?;
        tracing::info!(count = listings.len(), "Listing on BlueMove");
        self.sender.send("bluemove_list", entry, self.gas).await
    }

    /// `batch_list_script(creators, collections, names, prices, property_versions)`.
    pub fn batch_list_entry(&self, listings: &[Listing]) -> AptosResult<EntryFunction> {
        if listings.is_empty() {
            return Err(AptosError::Amount("batch listing needs at least one token".to_string()));
        }

        let mut creators = Vec::with_capacity(listings.len());
        let mut collections = Vec::with_capacity(listings.len());
        let mut names = Vec::with_capacity(listings.len());
        let mut prices = Vec::with_capacity(listings.len());
        let mut versions = Vec::with_capacity(listings.len());

        for listing in listings {
            let token = &listing.token;
            creators.push(MoveValue::Address(token.creator()));
            collections.push(MoveValue::String(token.collection().to_string()));
            names.push(MoveValue::String(token.name().to_string()));
            prices.push(MoveValue::U64(scale_price(listing.price, self.price_decimals)?));
            versions.push(MoveValue::U64(token.property_version));
        }

        EntryFunction::new(
            FunctionId::new(self.module.clone(), "batch_list_script"),
            vec![],
            &[
                MoveValue::Vector(creators),
                MoveValue::Vector(collections),
                MoveValue::Vector(names),
                MoveValue::Vector(prices),
                MoveValue::Vector(versions),
            ],
        )
    }
}
