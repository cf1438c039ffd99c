//! # Credential Provider Configuration
//!
//! 이메일/비밀번호 자격 증명 프로바이더의 설정을 관리합니다.
//! 비밀 키, 기준 URL, 비밀번호 정책, 세션 수명 등을 환경 변수에서 읽습니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! export BETTER_AUTH_SECRET="your-provider-secret"
//! export BETTER_AUTH_URL="https://app.example.com"
//!
//! # 선택 사항
//! export AUTH_MIN_PASSWORD_LENGTH="6"
//! export AUTH_MAX_PASSWORD_LENGTH="128"
//! export AUTH_DISABLE_SIGN_UP="false"
//! export AUTH_SESSION_TTL_DAYS="7"
//! export AUTH_REQUEST_TIMEOUT_SECS="10"
//! ```

use std::env;
use std::time::Duration;

use crate::config::PasswordConfig;

/// 세션 쿠키 이름
pub const SESSION_COOKIE_NAME: &str = "account_session";

/// 자격 증명 프로바이더 설정
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// 세션 토큰 다이제스트에 섞는 비밀 값
    pub secret: String,
    /// 프로바이더 기준 URL (https이면 Secure 쿠키 사용)
    pub base_url: String,
    pub min_password_length: usize,
    pub max_password_length: usize,
    pub disable_sign_up: bool,
    pub session_ttl: chrono::Duration,
    /// 프로바이더 호출 1회당 제한 시간
    pub request_timeout: Duration,
    pub bcrypt_cost: u32,
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        let secret = env::var("BETTER_AUTH_SECRET").unwrap_or_else(|_| {
            log::warn!("BETTER_AUTH_SECRET not set, using default (not secure for production!)");
            "account-service-dev-secret".to_string()
        });

        let base_url = env::var("BETTER_AUTH_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        let min_password_length = env::var("AUTH_MIN_PASSWORD_LENGTH")
            .unwrap_or_else(|_| "6".to_string())
            .parse()
            .unwrap_or(6);

        let max_password_length = env::var("AUTH_MAX_PASSWORD_LENGTH")
            .unwrap_or_else(|_| "128".to_string())
            .parse()
            .unwrap_or(128);

        let disable_sign_up = env::var("AUTH_DISABLE_SIGN_UP")
            .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let session_ttl_days = env::var("AUTH_SESSION_TTL_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse()
            .unwrap_or(7);

        let request_timeout_secs = env::var("AUTH_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);

        Self {
            secret,
            base_url,
            min_password_length,
            max_password_length,
            disable_sign_up,
            session_ttl: chrono::Duration::days(session_ttl_days),
            request_timeout: Duration::from_secs(request_timeout_secs),
            bcrypt_cost: PasswordConfig::bcrypt_cost(),
        }
    }

    /// 비밀번호 길이가 정책 범위 안에 있는지 확인합니다.
    pub fn accepts_password_length(&self, password: &str) -> bool {
        let length = password.chars().count();
        length >= self.min_password_length && length <= self.max_password_length
    }

    /// 기준 URL이 https이면 세션 쿠키에 Secure 속성을 붙입니다.
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

/// 세션 쿠키 속성
#[derive(Debug, Clone)]
pub struct SessionCookieSettings {
    pub name: String,
    /// 기준 URL이 https일 때만 Secure
    pub secure: bool,
    pub max_age_secs: i64,
}

impl SessionCookieSettings {
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self {
            name: SESSION_COOKIE_NAME.to_string(),
            secure: config.secure_cookies(),
            max_age_secs: config.session_ttl.num_seconds(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            secret: "account-service-dev-secret".to_string(),
            base_url: "http://localhost:8080".to_string(),
            min_password_length: 6,
            max_password_length: 128,
            disable_sign_up: false,
            session_ttl: chrono::Duration::days(7),
            request_timeout: Duration::from_secs(10),
            bcrypt_cost: 4,
        }
    }
}
