//! Opens the inventory described by the configuration.

use std::sync::Arc;

use barapp_core::{CollectionStore, FileStore, Inventory};

use crate::config::Config;

/// Builds the file-backed inventory for `config`.
pub fn open_inventory(config: &Config) -> Inventory<FileStore> {
    let backend = Arc::new(FileStore::new(config.data_dir.value.clone()));
    let store = CollectionStore::new(backend.clone()).with_policy(config.load_policy.value);

    tracing::debug!(
        "Opening inventory in {} (ids: {}, load policy: {})",
        backend.data_dir().display(),
        config.id_scheme.value,
        config.load_policy.value
    );

    Inventory::new(store, config.id_scheme.value.generator())
}
