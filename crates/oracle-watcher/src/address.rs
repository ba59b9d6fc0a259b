use {
    crate::errors::EncodingError,
    alloy_primitives::Address,
};

/// Prefix some chains use for their addresses in place of `0x`.
pub const DEFAULT_LEGACY_PREFIX: &str = "xdc";

const STANDARD_PREFIX: &str = "0x";

/// Turns user supplied contract addresses into canonical 20 byte addresses.
///
/// Addresses may either be plain hex (with or without `0x`) or use a chain
/// specific legacy prefix such as `xdc` which gets swapped for `0x` before
/// parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressNormalizer {
    legacy_prefix: String,
}

impl AddressNormalizer {
    pub fn new(legacy_prefix: impl Into<String>) -> Self {
        Self {
            legacy_prefix: legacy_prefix.into(),
        }
    }

    /// Normalizes every address in order. Duplicates are kept.
    pub fn normalize<S: AsRef<str>>(
        &self,
        addresses: &[S],
    ) -> Result<Vec<Address>, EncodingError> {
        addresses
            .iter()
            .map(|address| self.normalize_one(address.as_ref()))
            .collect()
    }

    pub fn normalize_one(&self, address: &str) -> Result<Address, EncodingError> {
        let standard = match address.strip_prefix(self.legacy_prefix.as_str()) {
            Some(rest) if !self.legacy_prefix.is_empty() => format!("{STANDARD_PREFIX}{rest}"),
            _ => address.to_string(),
        };
        standard
            .parse::<Address>()
            .map_err(|err| EncodingError::InvalidAddress {
                input: address.to_string(),
                reason: err.to_string(),
            })
    }
}

impl Default for AddressNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_LEGACY_PREFIX)
    }
}
