//! Codecs - the byte encoding of a store's backing file.
//!
//! A store serializes its whole collection as an ordered sequence of
//! [`RecordSnapshot`]s through a [`Codec`]. The codec is an opaque
//! encode/decode pair: `decode(encode(s))` must reconstruct `s` with ids and
//! attributes intact. [`JsonCodec`] is the default; [`YamlCodec`] is
//! available behind the default-on `yaml` feature; anything else plugs in
//! through the trait.
//!
//! ## Example
//!
//! ```ignore
//! use stored_rust::{RecordSchema, RecordStore, YamlCodec};
//!
//! let schema = RecordSchema::new("person").attribute("name");
//! let store = RecordStore::with_codec(schema, "people.yml", YamlCodec);
//! ```

mod json;
#[cfg(feature = "yaml")]
mod yaml;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StoreError;

/// One record as it appears in the backing file: its identity plus the full
/// attribute map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordSnapshot {
    pub id: u64,
    pub attributes: BTreeMap<String, Value>,
}

/// Byte encoding of an ordered collection of record snapshots.
pub trait Codec: Send + Sync {
    fn encode(&self, records: &[RecordSnapshot]) -> Result<Vec<u8>, StoreError>;
    fn decode(&self, bytes: &[u8]) -> Result<Vec<RecordSnapshot>, StoreError>;
}

pub use json::JsonCodec;
#[cfg(feature = "yaml")]
pub use yaml::YamlCodec;
