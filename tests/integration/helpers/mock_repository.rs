// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use harvestrs::domain::repositories::payload_repository::PayloadRepository;
use harvestrs::utils::errors::PersistError;
use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

/// 内存仓库，可以让指定URL的写入失败
#[derive(Default)]
pub struct MockPayloadRepository {
    rejected: HashSet<String>,
    save_delay: Duration,
    calls: Mutex<Vec<String>>,
    saved: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MockPayloadRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(mut self, url: &str) -> Self {
        self.rejected.insert(url.to_string());
        self
    }

    /// 每次写入前等待 `delay`
    pub fn with_save_delay(mut self, delay: Duration) -> Self {
        self.save_delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn saved(&self) -> Vec<(String, Vec<u8>)> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl PayloadRepository for MockPayloadRepository {
    async fn save(&self, url: &str, payload: &[u8]) -> Result<(), PersistError> {
        self.calls.lock().unwrap().push(url.to_string());
        if !self.save_delay.is_zero() {
            tokio::time::sleep(self.save_delay).await;
        }
        if self.rejected.contains(url) {
            return Err(PersistError::WriteFailure(
                "unique constraint violated".to_string(),
            ));
        }
        self.saved
            .lock()
            .unwrap()
            .push((url.to_string(), payload.to_vec()));
        Ok(())
    }
}
