//! # MongoDB 자격 증명 프로바이더
//!
//! `users`/`sessions` 컬렉션을 저장소로 사용하는 프로바이더 어댑터입니다.
//!
//! ## 정책
//!
//! | 항목 | 기본값 | 설정 |
//! |------|--------|------|
//! | 가입 허용 | 허용 | `AUTH_DISABLE_SIGN_UP` |
//! | 비밀번호 길이 | 6-128자 | `AUTH_MIN_PASSWORD_LENGTH`, `AUTH_MAX_PASSWORD_LENGTH` |
//! | 가입 후 자동 로그인 | 항상 | - |
//! | 세션 수명 | 7일 | `AUTH_SESSION_TTL_DAYS` |
//!
//! 비밀번호는 bcrypt로 해싱하며, 세션 토큰은 원문 대신
//! `SHA-256(secret ":" token)` 다이제스트로 저장합니다.
//! 존재하지 않는 이메일로 로그인해도 더미 해시를 검증하여 응답 시간을 맞춥니다.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use mongodb::bson::DateTime;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::ProviderConfig;
use crate::db::Database;
use crate::domain::entities::{SessionRecord, User};
use crate::domain::models::{RequestContext, Session, SessionUser};
use crate::errors::{AppError, ErrorContext};
use crate::repositories::{SessionRepository, UserRepository};
use crate::services::auth::provider::{CredentialProvider, ProviderFactory};

pub struct MongoCredentialProvider {
    users: UserRepository,
    sessions: SessionRepository,
    config: ProviderConfig,
    /// 존재하지 않는 계정 검증용 해시
    dummy_hash: String,
}

impl MongoCredentialProvider {
    /// 인덱스를 준비하고 프로바이더를 초기화합니다.
    pub async fn initialize(db: &Database, config: ProviderConfig) -> Result<Self, AppError> {
        let users = UserRepository::new(db);
        let sessions = SessionRepository::new(db);

        users.create_indexes().await?;
        sessions.create_indexes().await?;

        let dummy_hash = hash_password(Uuid::new_v4().to_string(), config.bcrypt_cost).await?;

        info!("✅ 자격 증명 프로바이더 초기화 완료: {}", db.database_name());

        Ok(Self {
            users,
            sessions,
            config,
            dummy_hash,
        })
    }

    async fn issue_session(&self, user: &User) -> Result<Session, AppError> {
        let user_id = user
            .id
            .ok_or_else(|| AppError::InternalError("user has no id".to_string()))?;

        let token = generate_session_token();
        let expires_at = chrono::Utc::now() + self.config.session_ttl;

        self.sessions
            .insert(SessionRecord::new(
                session_digest(&self.config.secret, &token),
                user_id,
                DateTime::from_millis(expires_at.timestamp_millis()),
            ))
            .await?;

        Ok(Session {
            token,
            user: SessionUser {
                id: user_id.to_hex(),
                email: user.email.clone(),
                name: user.name.clone(),
            },
            expires_at,
        })
    }
}

#[async_trait]
impl CredentialProvider for MongoCredentialProvider {
    async fn sign_up_email(&self, email: &str, password: &str, name: &str) -> Result<Session, AppError> {
        if self.config.disable_sign_up {
            return Err(AppError::ProviderError("email sign-up is disabled".to_string()));
        }

        if !self.config.accepts_password_length(password) {
            return Err(AppError::ProviderError("password length outside policy".to_string()));
        }

        let hash_start = std::time::Instant::now();
        let password_hash = hash_password(password.to_string(), self.config.bcrypt_cost).await?;
        debug!("Password hashing took: {:?}", hash_start.elapsed());

        let user = self
            .users
            .insert(User::new_local(email.to_string(), name.to_string(), password_hash))
            .await?;

        self.issue_session(&user).await
    }

    async fn sign_in_email(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let user = self.users.find_by_email(email).await?;

        let stored_hash = user
            .as_ref()
            .map(|user| user.password_hash.clone())
            .unwrap_or_else(|| self.dummy_hash.clone());

        let is_valid = verify_password(password.to_string(), stored_hash).await?;

        match user {
            Some(user) if is_valid => self.issue_session(&user).await,
            Some(_) => Err(AppError::ProviderError("invalid password".to_string())),
            None => Err(AppError::ProviderError("unknown email".to_string())),
        }
    }

    async fn sign_out(&self, context: &RequestContext) -> Result<(), AppError> {
        let token = context
            .session_token()
            .ok_or_else(|| AppError::ProviderError("no active session".to_string()))?;

        let deleted = self
            .sessions
            .delete_by_hash(&session_digest(&self.config.secret, token))
            .await?;

        if deleted {
            Ok(())
        } else {
            Err(AppError::ProviderError("session not found".to_string()))
        }
    }
}

pub struct MongoProviderFactory {
    config: ProviderConfig,
}

impl MongoProviderFactory {
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProviderFactory<Database> for MongoProviderFactory {
    async fn build(&self, connection: Database) -> Result<Arc<dyn CredentialProvider>, AppError> {
        let provider = MongoCredentialProvider::initialize(&connection, self.config.clone()).await?;
        Ok(Arc::new(provider))
    }
}

/// 256비트 이상 무작위 세션 토큰
fn generate_session_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

fn session_digest(secret: &str, token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(b":");
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .context("비밀번호 해싱 작업 실패")?
        .with_context(|| format!("비밀번호 해싱 실패 (cost {})", cost))
}

async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .context("비밀번호 검증 작업 실패")?
        .context("비밀번호 검증 실패")
}
