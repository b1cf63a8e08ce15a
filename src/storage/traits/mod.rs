//! Storage traits.

mod kv;

pub use kv::KeyValueStore;
