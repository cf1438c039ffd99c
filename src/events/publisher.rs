//! 이벤트 플랫폼 발행자
//!
//! - [`InngestPublisher`] - `POST {base}/e/{event_key}` 로 이벤트 배열을 전송
//! - [`LogOnlyPublisher`] - 이벤트 키가 없을 때 사용. 로그만 남기고 버림

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{error, info, warn};
use reqwest::Client;
use serde_json::json;

use crate::config::EventConfig;
use crate::errors::AppError;

#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, name: &str, data: &serde_json::Value) -> Result<(), AppError>;
}

/// Inngest 호환 이벤트 API 클라이언트
#[derive(Clone)]
pub struct InngestPublisher {
    endpoint: String,
    client: Client,
}

impl InngestPublisher {
    pub fn new(base_url: &str, event_key: &str, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::ConfigError(format!("event client build failed: {}", e)))?;

        Ok(Self {
            endpoint: format!("{}/e/{}", base_url.trim_end_matches('/'), event_key),
            client,
        })
    }
}

#[async_trait]
impl EventPublisher for InngestPublisher {
    async fn publish(&self, name: &str, data: &serde_json::Value) -> Result<(), AppError> {
        let body = json!([{ "name": name, "data": data }]);

        let response = self.client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::DispatchError(format!("event platform unreachable: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            error!("❌ 이벤트 플랫폼 오류 {}: {}", status, error_text);
            return Err(AppError::DispatchError(format!(
                "event platform responded {}: {}",
                status, error_text
            )));
        }

        Ok(())
    }
}

pub struct LogOnlyPublisher;

#[async_trait]
impl EventPublisher for LogOnlyPublisher {
    async fn publish(&self, name: &str, _data: &serde_json::Value) -> Result<(), AppError> {
        info!("📭 INNGEST_EVENT_KEY 미설정, 이벤트 발행 생략: {}", name);
        Ok(())
    }
}

/// 설정에 맞는 발행자를 만듭니다.
pub fn publisher_from_config(config: &EventConfig) -> Result<Arc<dyn EventPublisher>, AppError> {
    match &config.event_key {
        Some(key) => Ok(Arc::new(InngestPublisher::new(
            &config.base_url,
            key,
            config.publish_timeout,
        )?)),
        None => {
            warn!("⚠️ INNGEST_EVENT_KEY not set, onboarding events will only be logged");
            Ok(Arc::new(LogOnlyPublisher))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_inngest_publisher_posts_event_array() {
        let server = MockServer::start().await;
        let data = json!({ "email": "a@b.com" });

        Mock::given(method("POST"))
            .and(path("/e/test-key"))
            .and(body_json(json!([{ "name": "app/user.created", "data": data }])))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ids": ["01H"], "status": 200 })))
            .expect(1)
            .mount(&server)
            .await;

        let publisher = InngestPublisher::new(&server.uri(), "test-key", Duration::from_secs(2)).unwrap();

        let result = publisher.publish("app/user.created", &data).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_inngest_publisher_maps_error_status_to_dispatch_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid event key"))
            .mount(&server)
            .await;

        let publisher = InngestPublisher::new(&server.uri(), "bad-key", Duration::from_secs(2)).unwrap();

        let result = publisher.publish("app/user.created", &json!({})).await;

        assert!(matches!(result, Err(AppError::DispatchError(msg)) if msg.contains("401")));
    }

    #[test]
    fn test_missing_event_key_selects_log_only_publisher() {
        let config = EventConfig::default();
        assert!(publisher_from_config(&config).is_ok());
    }
}
