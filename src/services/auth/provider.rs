//! 자격 증명 프로바이더 경계
//!
//! 게이트웨이는 이 트레이트만 알고, 비밀번호 해싱이나 세션 저장 방식은
//! 구현체가 책임집니다.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::models::{RequestContext, Session};
use crate::errors::AppError;

/// 이메일/비밀번호 자격 증명 프로바이더
///
/// 모든 메서드는 거부 사유를 `AppError::ProviderError`로, 인프라 장애를
/// `AppError::ConnectionError`로 돌려줍니다.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// 계정을 만들고 곧바로 로그인된 세션을 반환합니다.
    async fn sign_up_email(&self, email: &str, password: &str, name: &str) -> Result<Session, AppError>;

    async fn sign_in_email(&self, email: &str, password: &str) -> Result<Session, AppError>;

    /// 컨텍스트가 가리키는 세션을 무효화합니다. 세션이 없으면 `ProviderError`
    async fn sign_out(&self, context: &RequestContext) -> Result<(), AppError>;
}

/// 저장소 연결을 받아 프로바이더 핸들을 만드는 팩토리
///
/// 게이트웨이가 프로세스당 한 번만 호출합니다.
#[async_trait]
pub trait ProviderFactory<C>: Send + Sync {
    async fn build(&self, connection: C) -> Result<Arc<dyn CredentialProvider>, AppError>;
}
