//! In-memory file store for development and testing

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{FileStore, FileStoreError};

#[derive(Default)]
pub struct InMemoryFileStore {
    files: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, reference: &str) -> Option<Vec<u8>> {
        self.files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(reference)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.files.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl FileStore for InMemoryFileStore {
    async fn put(&self, file_name: &str, bytes: &[u8]) -> Result<String, FileStoreError> {
        let reference = format!("memory/{}_{}", uuid::Uuid::new_v4(), file_name);
        self.files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(reference.clone(), bytes.to_vec());
        Ok(reference)
    }

    async fn delete(&self, reference: &str) -> Result<(), FileStoreError> {
        self.files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(reference);
        Ok(())
    }
}
