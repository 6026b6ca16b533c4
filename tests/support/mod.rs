use std::path::Path;

use stored_rust::{RecordSchema, RecordStore};

/// A "person" store with a single declared `name` attribute that must be
/// present, bound to the given backing file.
pub fn person_store(path: impl AsRef<Path>) -> RecordStore {
    let schema = RecordSchema::new("person").attribute("name");
    let mut store = RecordStore::new(schema, path.as_ref());
    store.validates_presence_of("name");
    store
}
