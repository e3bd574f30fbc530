//! Stateless entry point for callers that want a fresh address in one call.

use log::debug;
use serde::Serialize;

use crate::{Error, KeyPair, Network, derive_address, generate_key_pair};

/// Addresses for a fresh key pair on both networks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeneratedAddresses {
    pub testnet_address: String,
    pub mainnet_address: String,
    /// Hex-encoded verification key.
    pub verification_key: String,
    /// Hex-encoded signing key seed.
    pub signing_key: String,
}

/// Address for a fresh key pair on a single network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeneratedAddress {
    pub network: Network,
    pub address: String,
    pub verification_key: String,
    pub signing_key: String,
}

/// Generates key pairs and their addresses.
///
/// Holds no state; every call draws its own key pair and takes the network
/// explicitly.
#[derive(Clone, Copy, Debug, Default)]
pub struct AddressService;

impl AddressService {
    /// Generates a key pair and its Testnet and Mainnet addresses.
    ///
    /// # Errors
    /// Returns [`Error::Entropy`] if no key pair could be generated.
    pub fn generate(&self) -> Result<GeneratedAddresses, Error> {
        let key_pair = generate_key_pair()?;
        self.addresses_for(&key_pair)
    }

    /// Generates a key pair and its address on `network`.
    ///
    /// # Errors
    /// Returns [`Error::Entropy`] if no key pair could be generated.
    pub fn generate_for(&self, network: Network) -> Result<GeneratedAddress, Error> {
        let key_pair = generate_key_pair()?;
        let address = derive_address(&key_pair, network)?;
        debug!("generated {network} address");
        Ok(GeneratedAddress {
            network,
            address,
            verification_key: key_pair.verification_key_hex(),
            signing_key: key_pair.signing_key_hex(),
        })
    }

    /// Both addresses of an existing key pair.
    ///
    /// # Errors
    /// Returns [`Error::Encode`] if either address fails to encode.
    pub fn addresses_for(&self, key_pair: &KeyPair) -> Result<GeneratedAddresses, Error> {
        Ok(GeneratedAddresses {
            testnet_address: derive_address(key_pair, Network::Testnet)?,
            mainnet_address: derive_address(key_pair, Network::Mainnet)?,
            verification_key: key_pair.verification_key_hex(),
            signing_key: key_pair.signing_key_hex(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PaymentHasher, decode_address};

    #[test]
    fn generated_pair_shares_credential() {
        let generated = AddressService.generate().unwrap();
        let testnet = decode_address(&generated.testnet_address).unwrap();
        let mainnet = decode_address(&generated.mainnet_address).unwrap();

        assert_eq!(testnet.network(), Network::Testnet);
        assert_eq!(mainnet.network(), Network::Mainnet);
        assert_eq!(testnet.credential_hash(), mainnet.credential_hash());

        let vkey = hex::decode(&generated.verification_key).unwrap();
        assert_eq!(generated.verification_key.len(), 64);
        assert_eq!(
            testnet.credential_hash(),
            &PaymentHasher::hash(&vkey).unwrap()
        );
    }

    #[test]
    fn addresses_for_known_key() {
        let key_pair = KeyPair::from_seed(&[0u8; 32]);
        let first = AddressService.addresses_for(&key_pair).unwrap();
        let second = AddressService.addresses_for(&key_pair).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.signing_key, "0".repeat(64));
    }

    #[test]
    fn generate_for_single_network() {
        let generated = AddressService.generate_for(Network::Mainnet).unwrap();
        assert!(generated.address.starts_with("addr1"));
        let body = decode_address(&generated.address).unwrap();
        assert_eq!(body.network(), Network::Mainnet);
    }

    #[test]
    fn serializes_as_json() {
        let generated = AddressService.generate_for(Network::Testnet).unwrap();
        let value = serde_json::to_value(&generated).unwrap();
        assert_eq!(value["network"], "testnet");
        assert_eq!(value["address"], generated.address.as_str());
    }

    #[test]
    fn service_is_shareable_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| AddressService.generate().unwrap()))
            .collect();
        let mut keys: Vec<String> = handles
            .into_iter()
            .map(|h| h.join().unwrap().verification_key)
            .collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 4);
    }
}
