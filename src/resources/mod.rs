//! Linguistic resources
//!
//! The tokenizer tables, stopword corpus and WordNet database are packages
//! in a remote index. [`ResourceStore`] keeps them unpacked in a local cache
//! directory and fetches the missing ones once through a [`Fetcher`].

pub mod catalog;
pub mod fetch;
pub mod store;

pub use catalog::{Resource, DEFAULT_INDEX_URL};
pub use fetch::{Fetcher, HttpFetcher, OfflineFetcher};
pub use store::{default_data_dir, ResourceStore, DATA_DIR_ENV};
