use {crate::errors::EncodingError, alloy_primitives::B256};

/// Size of an EVM word and therefore of a single log topic.
pub const WORD_BYTE_LEN: usize = 32;

/// Encodes opaque job identifiers into log topics.
///
/// The identifier's bytes are right padded with zeros up to `width` bytes and
/// anything beyond `width` bytes is silently dropped. Identifiers that only
/// differ after that point therefore map to the same topic. Oracle contracts
/// index job ids with these exact bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TopicEncoder {
    width: usize,
}

impl TopicEncoder {
    pub fn new(width: usize) -> Result<Self, EncodingError> {
        if width == 0 || width > WORD_BYTE_LEN {
            return Err(EncodingError::InvalidTopicWidth(width));
        }
        Ok(Self { width })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn encode(&self, identifier: &str) -> B256 {
        let mut bytes = identifier.as_bytes().to_vec();
        bytes.resize(self.width, 0);
        // Narrower topics end up in the low order bytes of the word, just like
        // a short hex string parsed as a hash.
        B256::left_padding_from(&bytes)
    }
}

impl Default for TopicEncoder {
    fn default() -> Self {
        Self {
            width: WORD_BYTE_LEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, alloy_primitives::b256};

    #[test]
    fn exact_width_identifier_is_its_raw_bytes() {
        let topic = TopicEncoder::default().encode("c3d9861a75b945888e14b37e406cd85f");

        assert_eq!(
            topic,
            b256!("0x6333643938363161373562393435383838653134623337653430366364383566")
        );
    }

    #[test]
    fn short_identifiers_are_right_padded() {
        let encoder = TopicEncoder::default();

        let topic = encoder.encode("job");
        let mut expected = [0u8; 32];
        expected[..3].copy_from_slice(b"job");
        assert_eq!(topic, B256::from(expected));

        assert_eq!(encoder.encode(""), B256::ZERO);
    }

    #[test]
    fn long_identifiers_are_truncated() {
        let encoder = TopicEncoder::default();
        let long = "c3d9861a75b945888e14b37e406cd85f-and-then-some";

        assert_eq!(encoder.encode(long), B256::from_slice(&long.as_bytes()[..32]));
        // Truncation collides identifiers that share the first 32 bytes.
        assert_eq!(encoder.encode(long), encoder.encode("c3d9861a75b945888e14b37e406cd85f"));
    }

    #[test]
    fn reencoding_is_idempotent() {
        let encoder = TopicEncoder::default();

        for identifier in ["", "a", "job-42", "c3d9861a75b945888e14b37e406cd85f"] {
            let topic = encoder.encode(identifier);
            // Feeding the topic's bytes back in as an identifier of exactly the
            // word width reproduces it.
            let bytes = topic.as_slice();
            let reencoded = encoder.encode(std::str::from_utf8(bytes).unwrap());
            assert_eq!(reencoded, topic, "{identifier}");
        }
    }

    #[test]
    fn multibyte_identifiers_are_truncated_bytewise() {
        let encoder = TopicEncoder::default();
        let identifier = "ü".repeat(20);

        assert_eq!(
            encoder.encode(&identifier),
            B256::from_slice(&identifier.as_bytes()[..32])
        );
    }

    #[test]
    fn narrow_topics_are_right_aligned() {
        let encoder = TopicEncoder::new(4).unwrap();

        assert_eq!(
            encoder.encode("ab"),
            b256!("0x0000000000000000000000000000000000000000000000000000000061620000")
        );
        assert_eq!(
            encoder.encode("abcdef"),
            b256!("0x0000000000000000000000000000000000000000000000000000000061626364")
        );
    }

    #[test]
    fn rejects_invalid_widths() {
        assert!(matches!(
            TopicEncoder::new(0),
            Err(EncodingError::InvalidTopicWidth(0))
        ));
        assert!(matches!(
            TopicEncoder::new(33),
            Err(EncodingError::InvalidTopicWidth(33))
        ));
        assert_eq!(TopicEncoder::new(32).unwrap(), TopicEncoder::default());
    }
}
