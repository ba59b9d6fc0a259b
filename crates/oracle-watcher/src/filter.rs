//! Log filters for `eth_getLogs`.

use {
    crate::{address::AddressNormalizer, errors::EncodingError, topic::TopicEncoder},
    alloy_eips::BlockNumberOrTag,
    alloy_primitives::{Address, B256, b256},
    serde::{Deserialize, Serialize},
};

/// Event emitted by oracle contracts for every new job run.
pub const ORACLE_REQUEST_SIGNATURE: &str =
    "OracleRequest(bytes32,address,bytes32,uint256,address,bytes4,uint256,uint256,bytes)";

/// `keccak256(ORACLE_REQUEST_SIGNATURE)`
pub const ORACLE_REQUEST_TOPIC: B256 =
    b256!("0xd8d7ecc4800d25fa53ce0372f13a416d98907a7ef3d8d3bdd79cf4fe75529c65");

/// Which logs a node should return.
///
/// Topics are matched by position: positions are AND'd, the values within a
/// position are OR'd and an empty position matches anything.
///
/// `block_hash` and the block range are mutually exclusive in intent; this is
/// not enforced.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<B256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_block: Option<BlockNumberOrTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_block: Option<BlockNumberOrTag>,
    #[serde(default, rename = "address")]
    pub addresses: Vec<Address>,
    #[serde(default)]
    pub topics: Vec<Vec<B256>>,
}

impl FilterQuery {
    pub fn with_block_range(
        mut self,
        from: Option<BlockNumberOrTag>,
        to: Option<BlockNumberOrTag>,
    ) -> Self {
        self.from_block = from;
        self.to_block = to;
        self
    }
}

/// Builds filters matching oracle request events for one job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterQueryBuilder {
    event_signature: B256,
    topics: TopicEncoder,
    addresses: AddressNormalizer,
}

impl FilterQueryBuilder {
    pub fn new(event_signature: B256, topics: TopicEncoder, addresses: AddressNormalizer) -> Self {
        Self {
            event_signature,
            topics,
            addresses,
        }
    }

    /// Filter on the event signature in topic 0 and the encoded job id in
    /// topic 1, restricted to the given contracts. No block range is set.
    pub fn build<S: AsRef<str>>(
        &self,
        job_id: &str,
        addresses: &[S],
    ) -> Result<FilterQuery, EncodingError> {
        Ok(FilterQuery {
            addresses: self.addresses.normalize(addresses)?,
            topics: vec![vec![self.event_signature], vec![self.topics.encode(job_id)]],
            ..Default::default()
        })
    }
}

impl Default for FilterQueryBuilder {
    fn default() -> Self {
        Self::new(
            ORACLE_REQUEST_TOPIC,
            TopicEncoder::default(),
            AddressNormalizer::default(),
        )
    }
}
