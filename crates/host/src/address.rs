use std::{fmt::Display, ops::Deref, str::FromStr};

use blake3::Hasher as Blake3;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

const ADDRESS_SIZE: usize = 32;

/// Identifies either a deployed service instance or an account calling into one.
#[serde_as]
#[derive(PartialEq, Eq, Clone, Copy, Serialize, Deserialize, Hash, PartialOrd, Ord)]
pub struct ServiceAddress(#[serde_as(as = "[_; ADDRESS_SIZE]")] [u8; ADDRESS_SIZE]);

impl ServiceAddress {
    pub const fn new(value: [u8; ADDRESS_SIZE]) -> Self {
        Self(value)
    }

    /// Address of the account owning the given gateway key.
    pub fn from_api_key(api_key: &str) -> Self {
        let mut hasher = Blake3::new();
        hasher.update(b"account:");
        hasher.update(api_key.as_bytes());
        Self(*hasher.finalize().as_bytes())
    }

    /// Address of a new deployment.
    ///
    /// The nonce is unique per node, so deploying the same code with the same
    /// parameters twice still yields two independent instances.
    pub fn for_deployment(code: &str, params: &[u8], deployer: &ServiceAddress, nonce: u64) -> Self {
        let mut hasher = Blake3::new();
        hasher.update(code.as_bytes());
        hasher.update(&(params.len() as u64).to_le_bytes());
        hasher.update(params);
        hasher.update(deployer.as_ref());
        hasher.update(&nonce.to_le_bytes());
        Self(*hasher.finalize().as_bytes())
    }

    /// `Base58` string representation of the address.
    pub fn encode(&self) -> String {
        bs58::encode(self.0)
            .with_alphabet(bs58::Alphabet::BITCOIN)
            .into_string()
    }

    pub fn from_encoded(encoded: impl AsRef<[u8]>) -> Result<Self, bs58::decode::Error> {
        let mut bytes = [0; ADDRESS_SIZE];
        let written = bs58::decode(encoded)
            .with_alphabet(bs58::Alphabet::BITCOIN)
            .onto(&mut bytes)?;
        if written != ADDRESS_SIZE {
            return Err(bs58::decode::Error::BufferTooSmall);
        }
        Ok(Self(bytes))
    }
}

impl Deref for ServiceAddress {
    type Target = [u8; ADDRESS_SIZE];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[u8]> for ServiceAddress {
    fn as_ref(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl FromStr for ServiceAddress {
    type Err = bs58::decode::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_encoded(s)
    }
}

impl Display for ServiceAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.encode())
    }
}

impl std::fmt::Debug for ServiceAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ServiceAddress").field(&self.encode()).finish()
    }
}
