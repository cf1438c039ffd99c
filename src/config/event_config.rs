//! 이벤트 플랫폼 설정
//!
//! 가입 후 온보딩 이벤트를 전달할 외부 이벤트 플랫폼(Inngest 호환)의
//! 주소와 이벤트 키, 디스패치 큐 크기를 관리합니다.

use std::env;
use std::time::Duration;

use crate::utils::string_utils::clean_optional_string;

#[derive(Debug, Clone)]
pub struct EventConfig {
    /// 이벤트 플랫폼 기준 URL. 기본값: "https://inn.gs"
    pub base_url: String,
    /// 이벤트 키. 없으면 이벤트는 로그만 남기고 버려집니다.
    pub event_key: Option<String>,
    /// 디스패치 대기열 크기
    pub queue_capacity: usize,
    /// 발행 1회당 제한 시간
    pub publish_timeout: Duration,
}

impl EventConfig {
    pub fn from_env() -> Self {
        let base_url = env::var("INNGEST_BASE_URL")
            .unwrap_or_else(|_| "https://inn.gs".to_string());

        let event_key = clean_optional_string(env::var("INNGEST_EVENT_KEY").ok());

        let queue_capacity = env::var("EVENT_QUEUE_CAPACITY")
            .unwrap_or_else(|_| "256".to_string())
            .parse::<usize>()
            .ok()
            .filter(|capacity| *capacity > 0)
            .unwrap_or(256);

        let publish_timeout_secs = env::var("EVENT_PUBLISH_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .unwrap_or(5);

        Self {
            base_url,
            event_key,
            queue_capacity,
            publish_timeout: Duration::from_secs(publish_timeout_secs),
        }
    }
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            base_url: "https://inn.gs".to_string(),
            event_key: None,
            queue_capacity: 256,
            publish_timeout: Duration::from_secs(5),
        }
    }
}
