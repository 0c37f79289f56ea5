// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::stored_payload::StoredPayload;
use crate::domain::repositories::payload_repository::PayloadRepository;
use crate::infrastructure::database::entities::url_response as url_response_entity;
use crate::utils::errors::PersistError;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// URL响应仓库实现
///
/// 每次保存是一条独立的 INSERT，由数据库保证原子性，连接池保证并发安全
pub struct UrlResponseRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl UrlResponseRepositoryImpl {
    /// 创建新的URL响应仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    ///
    /// # 返回值
    ///
    /// 返回新的URL响应仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// 按写入顺序查找某个URL的所有响应
    pub async fn find_by_url(&self, url: &str) -> Result<Vec<StoredPayload>, DbErr> {
        let models = url_response_entity::Entity::find()
            .filter(url_response_entity::Column::Url.eq(url))
            .order_by_asc(url_response_entity::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        Ok(models
            .into_iter()
            .map(|m| StoredPayload {
                id: m.id,
                url: m.url,
                response: m.response,
                created_at: m.created_at.into(),
            })
            .collect())
    }

    /// 已保存的响应总数
    pub async fn count(&self) -> Result<u64, DbErr> {
        url_response_entity::Entity::find()
            .count(self.db.as_ref())
            .await
    }
}

#[async_trait]
impl PayloadRepository for UrlResponseRepositoryImpl {
    async fn save(&self, url: &str, payload: &[u8]) -> Result<(), PersistError> {
        let active_model = url_response_entity::ActiveModel {
            id: Set(Uuid::new_v4()),
            url: Set(url.to_owned()),
            response: Set(payload.to_vec()),
            created_at: Set(Utc::now().into()),
        };

        let inserted = url_response_entity::Entity::insert(active_model)
            .exec_without_returning(self.db.as_ref())
            .await?;

        if inserted != 1 {
            return Err(PersistError::WriteFailure(format!(
                "expected 1 row written for {}, got {}",
                url, inserted
            )));
        }

        Ok(())
    }
}
