//! RecordStore - per-type record collection with a file binding.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde_json::Value;

use super::Findable;
use crate::callbacks::CallbackSet;
use crate::codec::{Codec, JsonCodec, RecordSnapshot};
use crate::error::StoreError;
use crate::record::Record;
use crate::schema::RecordSchema;
use crate::validation::Validator;

/// The persistence engine for one record type: an in-memory collection keyed
/// by id, lazily loaded from the backing file and rewritten in full on every
/// successful save. Owns the type's schema, validation rules, and save
/// callbacks.
pub struct RecordStore {
    schema: RecordSchema,
    validator: Validator,
    callbacks: CallbackSet,
    codec: Box<dyn Codec>,
    path: PathBuf,
    records: BTreeMap<u64, Record>,
    next_id: u64,
    loaded: bool,
}

impl RecordStore {
    /// A store backed by the given file, encoded as JSON.
    pub fn new(schema: RecordSchema, path: impl Into<PathBuf>) -> Self {
        RecordStore::with_codec(schema, path, JsonCodec)
    }

    /// A store backed by the given file, encoded by the given codec.
    pub fn with_codec(
        schema: RecordSchema,
        path: impl Into<PathBuf>,
        codec: impl Codec + 'static,
    ) -> Self {
        RecordStore {
            schema,
            validator: Validator::new(),
            callbacks: CallbackSet::new(),
            codec: Box::new(codec),
            path: path.into(),
            records: BTreeMap::new(),
            next_id: 1,
            loaded: false,
        }
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Point the store at a different backing file. The cached collection is
    /// kept; call [`reset`](Self::reset) to re-read from the new path.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
    }

    // Declaration surface

    /// Require an attribute to be non-blank on save.
    pub fn validates_presence_of(&mut self, attribute: &str) {
        self.validator.presence_of(attribute);
    }

    /// Register an arbitrary validation rule.
    pub fn validate(
        &mut self,
        message: impl Into<String>,
        check: impl Fn(&Record) -> bool + Send + Sync + 'static,
    ) {
        self.validator.rule(message, check);
    }

    /// Register a hook to run before validation on every save.
    pub fn before_save(&mut self, hook: impl Fn(&mut Record) + Send + Sync + 'static) {
        self.callbacks.before_save(hook);
    }

    /// Register a hook to run after every successful file write.
    pub fn after_save(&mut self, hook: impl Fn(&mut Record) + Send + Sync + 'static) {
        self.callbacks.after_save(hook);
    }

    /// Drop every registered before-save and after-save hook.
    pub fn clear_callbacks(&mut self) {
        self.callbacks.clear();
    }

    // Record lifecycle

    /// A new unsaved record: supplied attributes merged over the schema's
    /// blank defaults. No I/O.
    pub fn build(&self, attrs: &[(&str, Value)]) -> Record {
        let mut record = self.schema.blank_record();
        for (name, value) in attrs {
            record.set(name, value.clone());
        }
        record
    }

    /// Build and save in one step. The record is returned whether or not the
    /// save succeeded; callers inspect `is_new_record()` for the outcome.
    pub fn create(&mut self, attrs: &[(&str, Value)]) -> Record {
        let mut record = self.build(attrs);
        self.save(&mut record);
        record
    }

    /// Run the validation pipeline against the record's current attributes,
    /// refreshing its error messages. No I/O, no mutation of stored state.
    pub fn valid(&self, record: &mut Record) -> bool {
        let errors = self.validator.run(record);
        let ok = errors.is_empty();
        record.set_errors(errors);
        ok
    }

    /// Persist the record: before-save hooks, validation, identity
    /// assignment on first save, in-memory insert, full file rewrite,
    /// after-save hooks. Returns false if validation fails or the file
    /// cannot be written; the caller never sees an I/O error here.
    pub fn save(&mut self, record: &mut Record) -> bool {
        if let Err(err) = self.load_records() {
            warn!("save aborted, store not loadable: {}", err);
            return false;
        }

        self.callbacks.run_before_save(record);

        if !self.valid(record) {
            return false;
        }

        let id = match record.id() {
            Some(id) => id,
            None => {
                let id = self.next_id;
                self.next_id += 1;
                record.set_id(id);
                id
            }
        };

        let prior = self.records.insert(id, record.clone());

        if let Err(err) = self.dump_records() {
            warn!("save of {} record {} failed: {}", self.schema.name(), id, err);
            // A freshly assigned id stays with the instance (ids are never
            // reused); the map entry is rolled back so memory still matches
            // the file.
            match prior {
                Some(previous) => self.records.insert(id, previous),
                None => self.records.remove(&id),
            };
            return false;
        }

        self.callbacks.run_after_save(record);
        // After-save hooks may mutate the instance; keep the cached copy in
        // step with it. The file retains the pre-hook snapshot until the
        // next save.
        self.records.insert(id, record.clone());

        true
    }

    /// Merge the given attributes into the record, then save. The merge
    /// sticks even if the save fails.
    pub fn update_attributes(&mut self, record: &mut Record, attrs: &[(&str, Value)]) -> bool {
        for (name, value) in attrs {
            record.set(name, value.clone());
        }
        self.save(record)
    }

    // Lookup

    /// Find by a single id (returns the record) or a sequence of ids
    /// (returns records in input order). Any missing id fails the call with
    /// `StoreError::NotFound`.
    pub fn find<K: Findable>(&mut self, key: K) -> Result<K::Output, StoreError> {
        self.load_records()?;
        key.find_in(self)
    }

    /// Every loaded record, in id order.
    pub fn all(&mut self) -> Result<Vec<Record>, StoreError> {
        self.load_records()?;
        Ok(self.records.values().cloned().collect())
    }

    /// All records matching a predicate, in id order.
    pub fn find_where<F>(&mut self, predicate: F) -> Result<Vec<Record>, StoreError>
    where
        F: Fn(&Record) -> bool,
    {
        self.load_records()?;
        Ok(self
            .records
            .values()
            .filter(|record| predicate(record))
            .cloned()
            .collect())
    }

    /// The first record matching a predicate, if any.
    pub fn find_one_where<F>(&mut self, predicate: F) -> Result<Option<Record>, StoreError>
    where
        F: Fn(&Record) -> bool,
    {
        self.load_records()?;
        Ok(self
            .records
            .values()
            .find(|record| predicate(record))
            .cloned())
    }

    /// Whether any record matches a predicate.
    pub fn exists<F>(&mut self, predicate: F) -> Result<bool, StoreError>
    where
        F: Fn(&Record) -> bool,
    {
        self.load_records()?;
        Ok(self.records.values().any(|record| predicate(record)))
    }

    /// How many records match a predicate.
    pub fn count<F>(&mut self, predicate: F) -> Result<usize, StoreError>
    where
        F: Fn(&Record) -> bool,
    {
        self.load_records()?;
        Ok(self
            .records
            .values()
            .filter(|record| predicate(record))
            .count())
    }

    pub(crate) fn find_one(&self, id: u64) -> Result<Record, StoreError> {
        self.records
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                record_type: self.schema.name().to_string(),
                id,
            })
    }

    pub(crate) fn find_many(&self, ids: &[u64]) -> Result<Vec<Record>, StoreError> {
        ids.iter().map(|id| self.find_one(*id)).collect()
    }

    // Load/dump cycle

    /// Populate the in-memory collection from the backing file. Idempotent:
    /// a loaded store is left alone. A missing file means an empty
    /// collection, not an error; any other read or decode failure
    /// propagates.
    pub fn load_records(&mut self) -> Result<(), StoreError> {
        if self.loaded {
            return Ok(());
        }

        let snapshots = match fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Vec::new(),
            Ok(bytes) => self.codec.decode(&bytes)?,
            Err(err) if err.kind() == ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    message: err.to_string(),
                })
            }
        };

        self.records.clear();
        self.next_id = 1;
        for snapshot in snapshots {
            self.next_id = self.next_id.max(snapshot.id + 1);
            let record = self.record_from_snapshot(snapshot);
            if let Some(id) = record.id() {
                self.records.insert(id, record);
            }
        }
        self.loaded = true;

        debug!(
            "loaded {} {} record(s) from {}",
            self.records.len(),
            self.schema.name(),
            self.path.display()
        );
        Ok(())
    }

    /// Encode the in-memory collection and rewrite the backing file. Writes
    /// to a temp file and renames over the target, leaving the previous file
    /// intact on failure. I/O errors propagate, unlike the save path.
    pub fn dump_records(&mut self) -> Result<(), StoreError> {
        self.load_records()?;

        let snapshots: Vec<RecordSnapshot> = self
            .records
            .iter()
            .map(|(id, record)| RecordSnapshot {
                id: *id,
                attributes: record.attributes().clone(),
            })
            .collect();
        let bytes = self.codec.encode(&snapshots)?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, &bytes).map_err(|err| StoreError::Io {
            path: self.path.clone(),
            message: err.to_string(),
        })?;
        fs::rename(&tmp, &self.path).map_err(|err| StoreError::Io {
            path: self.path.clone(),
            message: err.to_string(),
        })?;

        debug!(
            "dumped {} {} record(s) to {}",
            snapshots.len(),
            self.schema.name(),
            self.path.display()
        );
        Ok(())
    }

    /// Drop the cached collection; the next access re-reads the backing
    /// file.
    pub fn reset(&mut self) {
        self.records.clear();
        self.next_id = 1;
        self.loaded = false;
    }

    fn record_from_snapshot(&self, snapshot: RecordSnapshot) -> Record {
        let mut record = self.schema.blank_record();
        record.set_id(snapshot.id);
        for (name, value) in snapshot.attributes {
            record.set(&name, value);
        }
        record
    }
}
