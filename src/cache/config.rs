use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::cache::CacheConfigError;

pub const DEFAULT_CAPACITY: usize = 29;
pub const DEFAULT_PRIMES: [u64; 3] = [102523, 100907, 104659];

/// Construction parameters of a [`PathCache`](crate::cache::PathCache).
///
/// The table never grows: `capacity` slots are allocated up front and inserts
/// are refused once more than `capacity / 2` of them are occupied. Only prime
/// capacities are accepted by [`validate`](Self::validate): with any other
/// size the quadratic probe sequence can visit just a handful of slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub capacity: usize,
    /// Multipliers for the start key, end key and mode flag.
    pub primes: [u64; 3],
}

impl CacheConfig {
    pub fn with_capacity(capacity: usize) -> Self {
        CacheConfig {
            capacity,
            ..Default::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, CacheConfigError> {
        let config: CacheConfig = serde_json::from_str(json)?;
        config.validate()
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, CacheConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| CacheConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(self) -> Result<Self, CacheConfigError> {
        if self.capacity == 0 {
            return Err(CacheConfigError::ZeroCapacity);
        }
        if !is_prime(self.capacity) {
            return Err(CacheConfigError::NonPrimeCapacity(self.capacity));
        }
        Ok(self)
    }
}

fn is_prime(n: usize) -> bool {
    n >= 2 && (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            capacity: DEFAULT_CAPACITY,
            primes: DEFAULT_PRIMES,
        }
    }
}
