//! # 사용자 리포지토리 구현
//!
//! `users` 컬렉션에 대한 데이터 액세스를 담당합니다.
//! 이메일은 저장 전에 소문자로 정규화되며 unique 인덱스로 중복을 막습니다.

use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::db::Database;
use crate::domain::entities::users::{user::normalize_email, User};
use crate::errors::AppError;
use crate::repositories::is_duplicate_key;

const COLLECTION: &str = "users";

/// 사용자 데이터 액세스 리포지토리
#[derive(Clone)]
pub struct UserRepository {
    collection: Collection<User>,
}

impl UserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.get_database().collection::<User>(COLLECTION),
        }
    }

    /// 이메일 주소로 사용자 조회
    ///
    /// # 인자
    ///
    /// * `email` - 조회할 이메일 (대소문자 무시)
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(User))` - 사용자를 찾은 경우
    /// * `Ok(None)` - 해당 이메일의 사용자가 없는 경우
    /// * `Err(AppError::ConnectionError)` - 데이터베이스 오류
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.collection
            .find_one(doc! { "email": normalize_email(email) })
            .await
            .map_err(|e| AppError::ConnectionError(e.to_string()))
    }

    /// 새 사용자 저장
    ///
    /// 이메일 중복은 unique 인덱스 위반으로 감지하여 `ProviderError`를 반환합니다.
    /// 조회 후 삽입 방식과 달리 동시 가입 요청에서도 한 건만 성공합니다.
    pub async fn insert(&self, mut user: User) -> Result<User, AppError> {
        let result = self
            .collection
            .insert_one(&user)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::ProviderError(format!("user already exists: {}", user.email))
                } else {
                    AppError::ConnectionError(e.to_string())
                }
            })?;

        user.id = result.inserted_id.as_object_id();

        Ok(user)
    }

    /// 컬렉션 인덱스 생성
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        self.collection
            .create_index(email_index)
            .await
            .map_err(|e| AppError::ConnectionError(e.to_string()))?;

        Ok(())
    }
}
