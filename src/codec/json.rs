use super::{Codec, RecordSnapshot};
use crate::error::StoreError;

/// JSON encoding via serde_json. The default codec.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode(&self, records: &[RecordSnapshot]) -> Result<Vec<u8>, StoreError> {
        serde_json::to_vec_pretty(records).map_err(|err| StoreError::Codec(err.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<RecordSnapshot>, StoreError> {
        serde_json::from_slice(bytes).map_err(|err| StoreError::Codec(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn snapshot(id: u64, name: &str) -> RecordSnapshot {
        let mut attributes = BTreeMap::new();
        attributes.insert("name".to_string(), json!(name));
        RecordSnapshot { id, attributes }
    }

    #[test]
    fn round_trip() {
        let records = vec![snapshot(1, "David"), snapshot(2, "Joe")];
        let bytes = JsonCodec.encode(&records).unwrap();
        let decoded = JsonCodec.decode(&bytes).unwrap();
        assert_eq!(decoded, records);
    }

    #[test]
    fn round_trip_empty_collection() {
        let bytes = JsonCodec.encode(&[]).unwrap();
        assert_eq!(JsonCodec.decode(&bytes).unwrap(), Vec::new());
    }

    #[test]
    fn garbage_is_a_codec_error() {
        let err = JsonCodec.decode(b"not json").unwrap_err();
        assert!(matches!(err, StoreError::Codec(_)));
    }
}
