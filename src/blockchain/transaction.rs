//! Transaction data model and its BCS encoding.
//!
//! # Responsibilities
//! - Entry function payloads with type arguments and typed arguments
//! - Raw and signed transactions in the node's canonical byte layout
//! - The signing message (domain-separated SHA3 prefix + BCS bytes)
//!
//! Only entry function payloads are modelled. Enum variant indices follow the
//! on-chain layout, so the declaration order of `TypeTag` matters.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use serde::{Serialize, Serializer};
use sha3::{Digest, Sha3_256};
use std::fmt;
use std::str::FromStr;

use crate::blockchain::types::{AccountAddress, AptosError, AptosResult, ChainId};

/// Domain separator hashed in front of every raw transaction before signing.
const RAW_TRANSACTION_SALT: &[u8] = b"APTOS::RawTransaction";

/// A Move type argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TypeTag {
    Bool,
    U8,
    U64,
    U128,
    Address,
    Signer,
    Vector(Box<TypeTag>),
    Struct(Box<StructTag>),
    U16,
    U32,
    U256,
}

/// A fully qualified struct type, e.g. `0x1::aptos_coin::AptosCoin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructTag {
    pub address: AccountAddress,
    pub module: String,
    pub name: String,
    pub type_args: Vec<TypeTag>,
}

impl FromStr for TypeTag {
    type Err = AptosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let tag = match s {
            "bool" => TypeTag::Bool,
            "u8" => TypeTag::U8,
            "u16" => TypeTag::U16,
            "u32" => TypeTag::U32,
            "u64" => TypeTag::U64,
            "u128" => TypeTag::U128,
            "u256" => TypeTag::U256,
            "address" => TypeTag::Address,
            "signer" => TypeTag::Signer,
            _ => {
                if let Some(inner) = s.strip_prefix("vector<").and_then(|r| r.strip_suffix('>')) {
                    TypeTag::Vector(Box::new(inner.parse()?))
                } else {
                    TypeTag::Struct(Box::new(s.parse()?))
                }
            }
        };
        Ok(tag)
    }
}

impl FromStr for StructTag {
    type Err = AptosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AptosError::TypeTag(s.to_string());

        let (path, type_args) = match s.find('<') {
            Some(open) => {
                let inner = s[open + 1..].strip_suffix('>').ok_or_else(invalid)?;
                let args = split_top_level(inner)
                    .into_iter()
                    .map(str::parse)
                    .collect::<AptosResult<Vec<TypeTag>>>()?;
                (&s[..open], args)
            }
            None => (s, Vec::new()),
        };

        let parts: Vec<&str> = path.split("::").collect();
        let [address, module, name] = parts.as_slice() else {
            return Err(invalid());
        };
        if module.is_empty() || name.is_empty() {
            return Err(invalid());
        }

        Ok(StructTag {
            address: AccountAddress::from_hex(address).map_err(|_| invalid())?,
            module: module.to_string(),
            name: name.to_string(),
            type_args,
        })
    }
}

/// Split a comma-separated type list, ignoring commas nested inside `<...>`.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(s[start..].trim());
    parts
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Bool => write!(f, "bool"),
            TypeTag::U8 => write!(f, "u8"),
            TypeTag::U16 => write!(f, "u16"),
            TypeTag::U32 => write!(f, "u32"),
            TypeTag::U64 => write!(f, "u64"),
            TypeTag::U128 => write!(f, "u128"),
            TypeTag::U256 => write!(f, "u256"),
            TypeTag::Address => write!(f, "address"),
            TypeTag::Signer => write!(f, "signer"),
            TypeTag::Vector(inner) => write!(f, "vector<{}>", inner),
            TypeTag::Struct(tag) => write!(f, "{}", tag),
        }
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.address, self.module, self.name)?;
        if !self.type_args.is_empty() {
            let args: Vec<String> = self.type_args.iter().map(|t| t.to_string()).collect();
            write!(f, "<{}>", args.join(", "))?;
        }
        Ok(())
    }
}

/// A published module: `address::name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleId {
    pub address: AccountAddress,
    pub name: String,
}

impl FromStr for ModuleId {
    type Err = AptosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AptosError::FunctionId(s.to_string());
        let (address, name) = s.split_once("::").ok_or_else(invalid)?;
        if name.is_empty() || name.contains("::") {
            return Err(invalid());
        }
        Ok(ModuleId {
            address: AccountAddress::from_hex(address).map_err(|_| invalid())?,
            name: name.to_string(),
        })
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.address, self.name)
    }
}

/// A callable entry function: `address::module::function`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionId {
    pub module: ModuleId,
    pub function: String,
}

impl FunctionId {
    pub fn new(module: ModuleId, function: &str) -> Self {
        Self {
            module,
            function: function.to_string(),
        }
    }
}

impl FromStr for FunctionId {
    type Err = AptosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (module, function) = s
            .rsplit_once("::")
            .ok_or_else(|| AptosError::FunctionId(s.to_string()))?;
        if function.is_empty() {
            return Err(AptosError::FunctionId(s.to_string()));
        }
        Ok(FunctionId {
            module: module.parse().map_err(|_| AptosError::FunctionId(s.to_string()))?,
            function: function.to_string(),
        })
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module, self.function)
    }
}

/// A typed entry function argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveValue {
    U8(u8),
    U64(u64),
    U128(u128),
    Bool(bool),
    Address(AccountAddress),
    String(String),
    Vector(Vec<MoveValue>),
}

impl MoveValue {
    /// BCS bytes as expected by the entry function's argument list.
    pub fn to_bcs(&self) -> AptosResult<Vec<u8>> {
        Ok(bcs::to_bytes(self)?)
    }
}

impl Serialize for MoveValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MoveValue::U8(v) => v.serialize(serializer),
            MoveValue::U64(v) => v.serialize(serializer),
            MoveValue::U128(v) => v.serialize(serializer),
            MoveValue::Bool(v) => v.serialize(serializer),
            MoveValue::Address(v) => v.serialize(serializer),
            MoveValue::String(v) => v.serialize(serializer),
            MoveValue::Vector(items) => items.serialize(serializer),
        }
    }
}

/// Entry function call with encoded arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryFunction {
    pub module: ModuleId,
    pub function: String,
    pub ty_args: Vec<TypeTag>,
    pub args: Vec<Vec<u8>>,
}

impl EntryFunction {
    /// Build an entry function call, encoding each argument to BCS.
    pub fn new(function: FunctionId, ty_args: Vec<TypeTag>, args: &[MoveValue]) -> AptosResult<Self> {
        let args = args.iter().map(MoveValue::to_bcs).collect::<AptosResult<Vec<_>>>()?;
        Ok(Self {
            module: function.module,
            function: function.function,
            ty_args,
            args,
        })
    }

    pub fn function_id(&self) -> String {
        format!("{}::{}", self.module, self.function)
    }
}

/// Transaction payload. Only the entry function variant is supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionPayload {
    EntryFunction(EntryFunction),
}

impl Serialize for TransactionPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Variants 0 (script) and 1 (module bundle) are not produced here
            TransactionPayload::EntryFunction(entry) => {
                serializer.serialize_newtype_variant("TransactionPayload", 2, "EntryFunction", entry)
            }
        }
    }
}

/// An unsigned transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawTransaction {
    pub sender: AccountAddress,
    pub sequence_number: u64,
    pub payload: TransactionPayload,
    pub max_gas_amount: u64,
    pub gas_unit_price: u64,
    pub expiration_timestamp_secs: u64,
    pub chain_id: ChainId,
}

impl RawTransaction {
    /// Bytes that get signed: SHA3-256 of the domain separator followed by BCS.
    pub fn signing_message(&self) -> AptosResult<Vec<u8>> {
        let mut message = Sha3_256::digest(RAW_TRANSACTION_SALT).to_vec();
        message.extend(bcs::to_bytes(self)?);
        Ok(message)
    }
}

/// Ed25519 public key encoded as length-prefixed bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ed25519PublicKey(pub [u8; 32]);

impl Serialize for Ed25519PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

/// Ed25519 signature encoded as length-prefixed bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ed25519Signature(pub [u8; 64]);

impl Serialize for Ed25519Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

/// Proof that the sender authorized the transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TransactionAuthenticator {
    Ed25519 {
        public_key: Ed25519PublicKey,
        signature: Ed25519Signature,
    },
}

/// A raw transaction paired with its authenticator.
///
/// Fields are private: the pair is immutable once signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedTransaction {
    raw_txn: RawTransaction,
    authenticator: TransactionAuthenticator,
}

impl SignedTransaction {
    pub(crate) fn new(raw_txn: RawTransaction, authenticator: TransactionAuthenticator) -> Self {
        Self {
            raw_txn,
            authenticator,
        }
    }

    pub fn raw_transaction(&self) -> &RawTransaction {
        &self.raw_txn
    }

    pub fn authenticator(&self) -> &TransactionAuthenticator {
        &self.authenticator
    }

    /// Canonical bytes posted to the submission endpoint.
    pub fn to_bcs(&self) -> AptosResult<Vec<u8>> {
        Ok(bcs::to_bytes(self)?)
    }

    /// Check the signature against the paired raw transaction.
    pub fn verify(&self) -> AptosResult<()> {
        let TransactionAuthenticator::Ed25519 {
            public_key,
            signature,
        } = &self.authenticator;

        let key = VerifyingKey::from_bytes(&public_key.0)
            .map_err(|e| AptosError::Account(format!("Invalid public key: {}", e)))?;
        let signature = Signature::from_bytes(&signature.0);
        key.verify(&self.raw_txn.signing_message()?, &signature)
            .map_err(|e| AptosError::Account(format!("Signature verification failed: {}", e)))
    }
}
