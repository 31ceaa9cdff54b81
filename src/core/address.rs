//! Wallet address generation

use rand::RngCore;

/// Number of random bytes behind a generated address (64 hex characters)
const ADDRESS_BYTES: usize = 32;

/// Source of fresh wallet addresses
///
/// Implementations give no uniqueness guarantee; collisions surface as
/// `DuplicateAddress` from the wallet store.
pub trait AddressGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Uniform random lowercase-hex addresses
#[derive(Debug, Clone, Copy, Default)]
pub struct HexAddressGenerator;

impl AddressGenerator for HexAddressGenerator {
    fn generate(&self) -> String {
        let mut bytes = [0u8; ADDRESS_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}
