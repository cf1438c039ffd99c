//! # 세션 리포지토리 구현
//!
//! `sessions` 컬렉션은 토큰 다이제스트로 조회되며,
//! `expires_at` TTL 인덱스로 만료된 세션이 자동 삭제됩니다.

use std::time::Duration;

use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::db::Database;
use crate::domain::entities::sessions::SessionRecord;
use crate::errors::AppError;

const COLLECTION: &str = "sessions";

#[derive(Clone)]
pub struct SessionRepository {
    collection: Collection<SessionRecord>,
}

impl SessionRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.get_database().collection::<SessionRecord>(COLLECTION),
        }
    }

    pub async fn insert(&self, mut record: SessionRecord) -> Result<SessionRecord, AppError> {
        let result = self
            .collection
            .insert_one(&record)
            .await
            .map_err(|e| AppError::ConnectionError(e.to_string()))?;

        record.id = result.inserted_id.as_object_id();

        Ok(record)
    }

    /// 다이제스트에 해당하는 세션을 삭제합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(true)` - 세션이 삭제된 경우
    /// * `Ok(false)` - 해당 세션이 없는 경우 (이미 로그아웃되었거나 만료됨)
    pub async fn delete_by_hash(&self, token_hash: &str) -> Result<bool, AppError> {
        let result = self
            .collection
            .delete_one(doc! { "token_hash": token_hash })
            .await
            .map_err(|e| AppError::ConnectionError(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let token_index = IndexModel::builder()
            .keys(doc! { "token_hash": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("token_hash_unique".to_string())
                .build())
            .build();

        // 만료 시각에 바로 삭제
        let expiry_index = IndexModel::builder()
            .keys(doc! { "expires_at": 1 })
            .options(IndexOptions::builder()
                .expire_after(Duration::from_secs(0))
                .name("expires_at_ttl".to_string())
                .build())
            .build();

        self.collection
            .create_indexes([token_index, expiry_index])
            .await
            .map_err(|e| AppError::ConnectionError(e.to_string()))?;

        Ok(())
    }
}
