mod callbacks;
mod codec;
mod error;
mod record;
mod schema;
mod store;
mod validation;

pub use callbacks::CallbackSet;
pub use codec::{Codec, JsonCodec, RecordSnapshot};
#[cfg(feature = "yaml")]
pub use codec::YamlCodec;
pub use error::StoreError;
pub use record::Record;
pub use schema::RecordSchema;
pub use store::{Findable, RecordStore};
pub use validation::{is_blank, Validator};

// Re-export the attribute value type from serde_json
pub use serde_json::Value;
