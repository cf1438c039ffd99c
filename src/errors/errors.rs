//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 계정 생명주기 서비스를 위한 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! ## 에러 분류
//!
//! | 변형 | 의미 | 요청에 미치는 영향 |
//! |------|------|-------------------|
//! | `ConfigError` | 필수 설정 누락 | 요청 실패 (일반 메시지) |
//! | `ConnectionError` | 저장소 연결/네트워크 실패 | 요청 실패 (일반 메시지) |
//! | `ProviderError` | 자격 증명 프로바이더가 작업 거부 | 고정 메시지 2종으로 변환 |
//! | `DispatchError` | 이벤트 발행 실패 | 로그만 남기고 무시 |
//!
//! 이 에러들의 `Display` 문자열은 서버 로그 전용입니다.
//! 클라이언트에게는 [`ActionResult`](super::action_result::ActionResult)의
//! 고정 메시지만 전달됩니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! let uri = config.uri.as_deref()
//!     .ok_or_else(|| AppError::ConfigError("MONGODB_URI must be defined".to_string()))?;
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 단일 비행(single-flight) 연결 시도의 결과를 모든 대기자에게 동일하게
/// 전달해야 하므로 `Clone`을 구현합니다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// 필수 설정 누락 (500 Internal Server Error)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// 저장소 연결 실패 (503 Service Unavailable)
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// 자격 증명 프로바이더 거부 (400 Bad Request)
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// 이벤트 발행 실패 (500 Internal Server Error)
    #[error("Dispatch error: {0}")]
    DispatchError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 연결 재시도 대상인지 여부
    ///
    /// 연결 수립 단계의 `ConnectionError`만 재시도합니다.
    /// 설정 오류나 자격 증명 검증 실패는 재시도하지 않습니다.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::ConnectionError(_))
    }
}

impl actix_web::ResponseError for AppError {
    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 검증 에러를 제외하면 상세 메시지를 노출하지 않습니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = actix_web::ResponseError::status_code(self);

        let message = match self {
            AppError::ValidationError(_) => self.to_string(),
            AppError::AuthenticationError(_) => "Authentication required".to_string(),
            AppError::ProviderError(_) => "Request rejected".to_string(),
            _ => "Internal server error".to_string(),
        };

        actix_web::HttpResponse::build(status).json(serde_json::json!({
            "success": false,
            "error": message
        }))
    }

    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) | AppError::ProviderError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::ConnectionError(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
