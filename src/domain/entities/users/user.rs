//! User Entity Implementation
//!
//! 자격 증명 프로바이더가 소유하는 사용자 레코드입니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 사용자 엔티티
///
/// 비밀번호는 bcrypt 해시로만 저장됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 사용자 이메일 (unique, 소문자로 정규화)
    pub email: String,
    /// 표시 이름
    pub name: String,
    /// 해시된 비밀번호
    pub password_hash: String,
    /// 이메일 인증 여부
    pub email_verified: bool,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl User {
    /// 새 로컬 사용자 생성
    ///
    /// 이메일 인증이 필요한 상태로 시작됩니다.
    pub fn new_local(email: String, name: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            email: normalize_email(&email),
            name,
            password_hash,
            email_verified: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// 이메일 비교와 저장에 사용하는 정규화 형식
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_local_normalizes_email() {
        let user = User::new_local(
            "  Alice@Example.COM ".to_string(),
            "Alice".to_string(),
            "$2b$04$hash".to_string(),
        );

        assert_eq!(user.email, "alice@example.com");
        assert!(!user.email_verified);
        assert!(user.id.is_none());
    }
}
