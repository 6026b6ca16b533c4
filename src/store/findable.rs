use super::RecordStore;
use crate::error::StoreError;
use crate::record::Record;

/// Trait for types that can be used as find arguments: a single id resolves
/// to one record, a sequence of ids to a `Vec` in the same order. A missing
/// id fails the whole call with `StoreError::NotFound`.
pub trait Findable {
    type Output;
    fn find_in(&self, store: &RecordStore) -> Result<Self::Output, StoreError>;
}

// Single id
impl Findable for u64 {
    type Output = Record;

    fn find_in(&self, store: &RecordStore) -> Result<Self::Output, StoreError> {
        store.find_one(*self)
    }
}

// Slice of ids
impl Findable for &[u64] {
    type Output = Vec<Record>;

    fn find_in(&self, store: &RecordStore) -> Result<Self::Output, StoreError> {
        store.find_many(self)
    }
}

// Fixed-size arrays
impl<const N: usize> Findable for [u64; N] {
    type Output = Vec<Record>;

    fn find_in(&self, store: &RecordStore) -> Result<Self::Output, StoreError> {
        store.find_many(self.as_slice())
    }
}

// Fixed-size arrays by reference
impl<const N: usize> Findable for &[u64; N] {
    type Output = Vec<Record>;

    fn find_in(&self, store: &RecordStore) -> Result<Self::Output, StoreError> {
        store.find_many(self.as_slice())
    }
}

// Vec of ids
impl Findable for Vec<u64> {
    type Output = Vec<Record>;

    fn find_in(&self, store: &RecordStore) -> Result<Self::Output, StoreError> {
        store.find_many(self.as_slice())
    }
}

// Vec of ids by reference
impl Findable for &Vec<u64> {
    type Output = Vec<Record>;

    fn find_in(&self, store: &RecordStore) -> Result<Self::Output, StoreError> {
        store.find_many(self.as_slice())
    }
}
