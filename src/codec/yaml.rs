use super::{Codec, RecordSnapshot};
use crate::error::StoreError;

/// YAML encoding via serde_yaml.
#[derive(Clone, Copy, Debug, Default)]
pub struct YamlCodec;

impl Codec for YamlCodec {
    fn encode(&self, records: &[RecordSnapshot]) -> Result<Vec<u8>, StoreError> {
        serde_yaml::to_string(records)
            .map(String::into_bytes)
            .map_err(|err| StoreError::Codec(err.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<RecordSnapshot>, StoreError> {
        serde_yaml::from_slice(bytes).map_err(|err| StoreError::Codec(err.to_string()))
    }
}
