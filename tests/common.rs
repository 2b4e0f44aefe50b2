//! Test utilities & fixtures.
//! Each test gets a throwaway sled store in a temp directory; the directory
//! is dropped with the fixture.

use tempfile::TempDir;
use wordspell::engine::{ProgressStore, ProgressStoreBuilder};

pub fn temp_store() -> (TempDir, ProgressStore) {
    let dir = TempDir::new().expect("tempdir");
    let store = ProgressStoreBuilder::new(dir.path()).open().expect("store");
    (dir, store)
}
