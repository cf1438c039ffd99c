//! Session Record Entity
//!
//! 로그인 세션 한 건을 나타냅니다. 세션 토큰 원문은 저장하지 않고
//! 프로바이더 비밀 값을 섞은 SHA-256 다이제스트만 보관합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 세션 토큰 다이제스트 (unique)
    pub token_hash: String,
    pub user_id: ObjectId,
    /// 만료 시간 (TTL 인덱스 대상)
    pub expires_at: DateTime,
    pub created_at: DateTime,
}

impl SessionRecord {
    pub fn new(token_hash: String, user_id: ObjectId, expires_at: DateTime) -> Self {
        Self {
            id: None,
            token_hash,
            user_id,
            expires_at,
            created_at: DateTime::now(),
        }
    }

    /// TTL 인덱스가 아직 지우지 않았더라도 만료된 세션인지 확인
    pub fn is_expired(&self) -> bool {
        self.expires_at <= DateTime::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry() {
        let past = DateTime::from_millis(DateTime::now().timestamp_millis() - 1_000);
        let future = DateTime::from_millis(DateTime::now().timestamp_millis() + 60_000);

        assert!(SessionRecord::new("a".into(), ObjectId::new(), past).is_expired());
        assert!(!SessionRecord::new("b".into(), ObjectId::new(), future).is_expired());
    }
}
