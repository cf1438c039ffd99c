//! 데이터 및 서버 설정 관리 모듈
//!
//! 실행 환경, 서버 바인딩, 백엔드 문서 저장소(MongoDB) 연결 설정을 관리합니다.

use std::env;
use std::time::Duration;

use log::{info, warn};

use crate::errors::AppError;
use crate::utils::string_utils::clean_optional_string;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - 최고 수준의 보안 및 성능
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 또는 `NODE_ENV` 환경 변수를 확인하며,
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    pub fn current() -> Self {
        let raw = env::var("ENVIRONMENT")
            .unwrap_or_else(|_| env::var("NODE_ENV").unwrap_or_else(|_| "production".to_string()));

        Self::from_str(&raw)
    }

    /// 문자열에서 Environment를 생성합니다.
    ///
    /// 알 수 없는 값인 경우 `Production`을 반환합니다.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// 패스워드 해싱 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// 현재 환경에 맞는 bcrypt cost를 반환합니다.
    ///
    /// `BCRYPT_COST`가 4-15 범위이면 그 값을, 아니면 환경별 기본값을 사용합니다.
    pub fn bcrypt_cost() -> u32 {
        if let Ok(cost_str) = env::var("BCRYPT_COST") {
            if let Ok(cost) = cost_str.parse::<u32>() {
                if (4..=15).contains(&cost) {
                    return cost;
                }
            }
        }

        Self::bcrypt_cost_for_env(&Environment::current())
    }

    /// 특정 환경에 대한 bcrypt cost를 반환합니다.
    ///
    /// - Development/Test: 4 (빠른 처리)
    /// - Staging: 10 (중간 보안)
    /// - Production: 12 (고보안)
    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버가 바인딩할 포트를 반환합니다. 기본값: 8080
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    /// 서버가 바인딩할 호스트 주소를 반환합니다. 기본값: "127.0.0.1"
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
    }

    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }
}

/// 프로필별 `.env` 파일을 로드하고, 사용한 프로필 이름을 반환합니다.
///
/// | `PROFILE` | 파일 |
/// |-----------|------|
/// | `dev` (기본값) | `.env.dev` |
/// | `prod` | `.env.prod` |
/// | 기타 | `.env` |
///
/// 파일이 없어도 실패하지 않으며, 이미 설정된 환경 변수가 우선합니다.
pub fn load_env_file() -> String {
    let profile = env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    let loaded = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ".env.prod"),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ".env.dev"),
        _ => dotenv::dotenv().map(|_| ".env"),
    };

    match loaded {
        Ok(file) => info!("{} 파일 로드 됨 (profile: {})", file, profile),
        Err(e) => warn!("프로필 {} 환경 파일 로드 실패: {}", profile, e),
    }

    profile
}

/// 요청 속도 제한 설정
///
/// - `RATE_LIMIT_PER_SECOND`: 초당 허용 요청 수 (기본값: 100)
/// - `RATE_LIMIT_BURST_SIZE`: 버스트 허용량 (기본값: 200)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        Self {
            per_second: parse_env_or("RATE_LIMIT_PER_SECOND", 100),
            burst_size: parse_env_or("RATE_LIMIT_BURST_SIZE", 200),
        }
    }
}

/// 숫자 환경 변수를 읽습니다. 형식이 잘못되면 경고 후 기본값을 사용합니다.
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} 파싱 실패: {:?}. 기본값 {} 사용", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}

/// 백엔드 문서 저장소 연결 설정
///
/// # Environment Variables
///
/// - `MONGODB_URI`: 연결 주소 (필수, 기본값 없음)
/// - `DATABASE_NAME`: 데이터베이스 이름 (기본값: "account_service_dev")
/// - `MONGODB_CONNECT_TIMEOUT_SECS`: 연결 시도 타임아웃 (기본값: 10)
/// - `MONGODB_RETRY_BACKOFF_MS`: 연결 재시도 전 대기 시간 (기본값: 500, 0이면 재시도 안 함)
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// 연결 주소. 비어 있으면 `None`
    pub uri: Option<String>,
    pub database_name: String,
    pub app_name: String,
    pub connect_timeout: Duration,
    pub retry_backoff: Option<Duration>,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        let uri = clean_optional_string(env::var("MONGODB_URI").ok());

        let database_name = env::var("DATABASE_NAME")
            .unwrap_or_else(|_| "account_service_dev".to_string());

        let connect_timeout_secs = env::var("MONGODB_CONNECT_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .unwrap_or(10);

        let retry_backoff_ms = env::var("MONGODB_RETRY_BACKOFF_MS")
            .unwrap_or_else(|_| "500".to_string())
            .parse::<u64>()
            .unwrap_or(500);

        Self {
            uri,
            database_name,
            app_name: "account_service".to_string(),
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            retry_backoff: (retry_backoff_ms > 0).then(|| Duration::from_millis(retry_backoff_ms)),
        }
    }

    /// 연결 주소를 반환합니다.
    ///
    /// 주소가 설정되지 않은 경우 연결 시도 전에 `ConfigError`를 반환합니다.
    pub fn require_uri(&self) -> Result<&str, AppError> {
        self.uri
            .as_deref()
            .ok_or_else(|| AppError::ConfigError("MONGODB_URI must be defined".to_string()))
    }
}
