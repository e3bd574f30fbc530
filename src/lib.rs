//! Cardano enterprise address derivation.
//!
//! This crate supports:
//! - Fresh Ed25519 payment key pairs from the OS entropy source.
//! - Blake2b-224 payment credential hashes.
//! - Enterprise (payment key hash only) address bodies for Mainnet and Testnet.
//! - A Bech32 text codec with the BIP-173 checksum, see [`codec`].

pub mod codec;
mod hash;
mod keys;
mod service;

use log::debug;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use codec::CodecError;
pub use hash::{CredentialHash, PaymentHasher};
pub use keys::{EntropyError, InvalidInputLength, KeyPair, generate_key_pair};
pub use service::{AddressService, GeneratedAddress, GeneratedAddresses};

/// Which network you're on.
///
/// This determines both the human‑readable part (HRP) of the address and the
/// low nibble of its header byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Testnet addresses use `addr_test1…`
    Testnet,
    /// Mainnet addresses use `addr1…`
    Mainnet,
}

impl Network {
    /// Network tag carried in the header byte.
    #[must_use]
    pub fn tag(self) -> u8 {
        match self {
            Network::Testnet => 0,
            Network::Mainnet => 1,
        }
    }

    /// Reverse lookup from header tag to enum.
    #[must_use]
    pub fn from_tag(tag: u8) -> Option<Network> {
        match tag {
            0 => Some(Network::Testnet),
            1 => Some(Network::Mainnet),
            _ => None,
        }
    }

    /// Returns the Bech32 HRP for this network.
    #[must_use]
    pub fn hrp(self) -> &'static str {
        match self {
            Network::Testnet => "addr_test",
            Network::Mainnet => "addr",
        }
    }
}

/// Attempts to parse a network from an address HRP.
impl TryFrom<&str> for Network {
    type Error = AddressDecodeError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "addr" => Ok(Network::Mainnet),
            "addr_test" => Ok(Network::Testnet),
            other => Err(AddressDecodeError::UnknownHrp(other.to_string())),
        }
    }
}

/// A network name that is neither `mainnet` nor `testnet`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown network {0:?}: expected `mainnet` or `testnet`")]
pub struct UnknownNetwork(pub String);

/// Parses a network by name, ignoring case.
impl FromStr for Network {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            _ => Err(UnknownNetwork(s.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Testnet => f.write_str("testnet"),
            Network::Mainnet => f.write_str("mainnet"),
        }
    }
}

/// Address type, carried in the high nibble of the header byte.
///
/// Only the enterprise variant is produced: a payment key hash with no
/// staking part.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressType {
    /// Enterprise address with a key-hash payment credential.
    EnterpriseKeyHash,
}

impl AddressType {
    /// Nibble code to embed in the header.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            AddressType::EnterpriseKeyHash => 0b0110,
        }
    }

    /// Reverse lookup from nibble code to enum.
    #[must_use]
    pub fn from_code(code: u8) -> Option<AddressType> {
        match code {
            0b0110 => Some(AddressType::EnterpriseKeyHash),
            _ => None,
        }
    }
}

/// Binary address body: header byte then credential hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AddressBody {
    address_type: AddressType,
    network: Network,
    credential_hash: CredentialHash,
}

impl AddressBody {
    /// Serialized length: one header byte plus the credential hash.
    pub const LENGTH: usize = 1 + PaymentHasher::DIGEST_LENGTH;

    /// Builds an enterprise address body for `network`.
    #[must_use]
    pub fn build(credential_hash: CredentialHash, network: Network) -> Self {
        Self {
            address_type: AddressType::EnterpriseKeyHash,
            network,
            credential_hash,
        }
    }

    /// Parses a serialized body.
    ///
    /// # Errors
    /// Returns `AddressDecodeError` if the length, type nibble or network
    /// nibble is not recognized.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AddressDecodeError> {
        let (&header, hash) = bytes
            .split_first()
            .filter(|_| bytes.len() == Self::LENGTH)
            .ok_or(AddressDecodeError::InvalidBodyLength {
                got: bytes.len(),
                expected: Self::LENGTH,
            })?;

        let type_code = header >> 4;
        let address_type = AddressType::from_code(type_code)
            .ok_or(AddressDecodeError::UnknownAddressType(type_code))?;
        let tag = header & 0x0f;
        let network =
            Network::from_tag(tag).ok_or(AddressDecodeError::UnknownNetworkTag(tag))?;

        let mut digest = [0u8; PaymentHasher::DIGEST_LENGTH];
        digest.copy_from_slice(hash);

        Ok(Self {
            address_type,
            network,
            credential_hash: CredentialHash::from_bytes(digest),
        })
    }

    /// `(type << 4) | network tag`.
    #[must_use]
    pub fn header(&self) -> u8 {
        (self.address_type.code() << 4) | self.network.tag()
    }

    #[must_use]
    pub fn address_type(&self) -> AddressType {
        self.address_type
    }

    #[must_use]
    pub fn network(&self) -> Network {
        self.network
    }

    #[must_use]
    pub fn credential_hash(&self) -> &CredentialHash {
        &self.credential_hash
    }

    /// The 29-byte wire form.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::LENGTH] {
        let mut out = [0u8; Self::LENGTH];
        out[0] = self.header();
        out[1..].copy_from_slice(self.credential_hash.as_bytes());
        out
    }

    /// Bech32-encodes the body under its network's HRP.
    ///
    /// # Errors
    /// Only fails if the codec rejects the HRP, which the built-in HRPs never trigger.
    pub fn encode(&self) -> Result<String, CodecError> {
        codec::encode(self.network.hrp(), &self.to_bytes())
    }
}

impl fmt::Display for AddressBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.encode().map_err(|_| fmt::Error)?;
        write!(f, "{s}")
    }
}

/// Errors that can occur during address encoding.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AddressEncodeError {
    /// Verification key was not 32 bytes
    #[error(transparent)]
    InvalidInputLength(#[from] InvalidInputLength),

    /// Bech32 encoding failed
    #[error("Bech32 error: {0}")]
    Codec(#[from] CodecError),
}

/// Errors that can occur during address decoding.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AddressDecodeError {
    /// Invalid Bech32 structure or checksum
    #[error("Bech32 error: {0}")]
    Codec(#[from] CodecError),

    /// HRP wasn't `addr` or `addr_test`
    #[error("unknown HRP: {0}")]
    UnknownHrp(String),

    /// Payload wasn't header + 28-byte hash
    #[error("invalid address body length: got {got}, expected {expected}")]
    InvalidBodyLength { got: usize, expected: usize },

    /// High nibble of the header isn't a supported address type
    #[error("unsupported address type: 0b{0:04b}")]
    UnknownAddressType(u8),

    /// Low nibble of the header isn't a known network
    #[error("unknown network tag: {0}")]
    UnknownNetworkTag(u8),

    /// HRP and header disagree about the network
    #[error("network mismatch: HRP is {hrp}, header is {header}")]
    NetworkMismatch { hrp: Network, header: Network },
}

/// Any failure surfaced by this crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Entropy(#[from] EntropyError),

    #[error(transparent)]
    Encode(#[from] AddressEncodeError),

    #[error(transparent)]
    Decode(#[from] AddressDecodeError),
}

/// Derives the enterprise address of `key_pair` on `network`.
///
/// # Errors
/// Returns `AddressEncodeError` if the encode step fails.
pub fn derive_address(key_pair: &KeyPair, network: Network) -> Result<String, AddressEncodeError> {
    derive_address_from_key(key_pair.verification_key_bytes(), network)
}

/// Derives the enterprise address for raw verification key bytes.
///
/// # Errors
/// - `InvalidInputLength` unless the key is 32 bytes.
/// - `Codec` if the encode step fails.
pub fn derive_address_from_key(
    verification_key: &[u8],
    network: Network,
) -> Result<String, AddressEncodeError> {
    // Hash the verification key
    let credential_hash = PaymentHasher::hash(verification_key)?;

    // [ header, hash… ]
    let body = AddressBody::build(credential_hash, network);
    let encoded = body.encode()?;

    debug!("derived {network} address {encoded}");
    Ok(encoded)
}

/// Decode an address string back into its body.
///
/// # Errors
/// Returns `AddressDecodeError` on any failure:
/// - Bad checksum or format
/// - Unknown HRP
/// - Invalid body length
/// - Unrecognized address type or network tag
/// - HRP and header naming different networks
pub fn decode_address(s: &str) -> Result<AddressBody, AddressDecodeError> {
    let (hrp, bytes) = codec::decode(s)?;

    // Map HRP to network enum
    let network = Network::try_from(hrp.as_str())?;

    let body = AddressBody::from_bytes(&bytes)?;
    if body.network() != network {
        return Err(AddressDecodeError::NetworkMismatch {
            hrp: network,
            header: body.network(),
        });
    }

    Ok(body)
}
