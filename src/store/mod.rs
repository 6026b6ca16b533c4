mod findable;
mod store;

pub use findable::Findable;
pub use store::RecordStore;
