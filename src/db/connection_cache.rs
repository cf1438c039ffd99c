//! # Connection Cache
//!
//! 프로세스 전역에서 하나뿐인 저장소 연결을 소유합니다.
//!
//! - 최초 호출자가 연결 시도를 시작하고, 동시에 들어온 호출자들은 같은 시도를 기다립니다.
//! - 성공한 연결은 프로세스 수명 동안 캐시되며 명시적으로 닫지 않습니다.
//! - 실패하면 진행 중 표시를 지워 이후 호출이 다시 시도할 수 있습니다.
//! - 주소가 설정되지 않았으면 어떤 시도도 하기 전에 `ConfigError`로 실패합니다.
//!
//! 연결 수립 단계의 `ConnectionError`에 한해 백오프 후 한 번 재시도합니다.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{error, info, warn};

use crate::config::StoreConfig;
use crate::core::SingleFlight;
use crate::db::Database;
use crate::errors::AppError;

/// 저장소 주소로 연결 핸들을 만드는 구성 요소
///
/// 실제 구현은 [`MongoConnector`]이며, 테스트에서는 가짜 커넥터로 대체합니다.
#[async_trait]
pub trait StoreConnector<C>: Send + Sync {
    async fn connect(&self, address: &str) -> Result<C, AppError>;
}

/// MongoDB 커넥터
pub struct MongoConnector {
    config: StoreConfig,
}

impl MongoConnector {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl StoreConnector<Database> for MongoConnector {
    async fn connect(&self, address: &str) -> Result<Database, AppError> {
        Database::connect(address, &self.config).await
    }
}

/// 연결 시도 제한 시간과 재시도 정책
#[derive(Debug, Clone, Copy)]
pub struct ConnectionPolicy {
    /// 시도 1회당 제한 시간
    pub connect_timeout: Duration,
    /// 재시도 전 대기 시간. `None`이면 재시도하지 않음
    pub retry_backoff: Option<Duration>,
}

impl ConnectionPolicy {
    pub fn from_config(config: &StoreConfig) -> Self {
        Self {
            connect_timeout: config.connect_timeout,
            retry_backoff: config.retry_backoff,
        }
    }
}

impl Default for ConnectionPolicy {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            retry_backoff: Some(Duration::from_millis(500)),
        }
    }
}

/// 프로세스당 하나의 저장소 연결을 보관하는 캐시
///
/// 연결 타입 `C`는 기본적으로 [`Database`]이며, 테스트에서는 임의의 타입을 사용할 수 있습니다.
pub struct ConnectionCache<C = Database>
where
    C: Clone + Send + Sync + 'static,
{
    address: Option<String>,
    connector: Arc<dyn StoreConnector<C>>,
    policy: ConnectionPolicy,
    flight: SingleFlight<C, AppError>,
}

impl ConnectionCache<Database> {
    /// 환경 설정으로 MongoDB 연결 캐시를 만듭니다. 이 시점에는 연결하지 않습니다.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(
            config.uri.clone(),
            Arc::new(MongoConnector::new(config.clone())),
            ConnectionPolicy::from_config(config),
        )
    }
}

impl<C> ConnectionCache<C>
where
    C: Clone + Send + Sync + 'static,
{
    pub fn new(
        address: Option<String>,
        connector: Arc<dyn StoreConnector<C>>,
        policy: ConnectionPolicy,
    ) -> Self {
        Self {
            address,
            connector,
            policy,
            flight: SingleFlight::new(),
        }
    }

    /// 연결 주소가 설정되어 있는지 여부
    pub fn is_configured(&self) -> bool {
        self.address.is_some()
    }

    /// 이미 수립된 연결이 있으면 반환합니다.
    pub fn cached(&self) -> Option<C> {
        self.flight.get()
    }

    /// 연결 시도가 진행 중인지 여부
    pub fn is_connecting(&self) -> bool {
        self.flight.is_pending()
    }

    /// 연결을 반환하거나, 없으면 단일 비행으로 수립합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(C)` - 캐시된 연결 또는 이번 시도(혹은 공유된 시도)로 수립된 연결
    /// * `Err(AppError::ConfigError)` - 주소 미설정. 연결 시도 없음
    /// * `Err(AppError::ConnectionError)` - 연결 실패. 이후 호출에서 재시도 가능
    pub async fn acquire(&self) -> Result<C, AppError> {
        if let Some(connection) = self.flight.get() {
            return Ok(connection);
        }

        let address = self.address.clone().ok_or_else(|| {
            let err = AppError::ConfigError("MONGODB_URI must be defined".to_string());
            error!("❌ 저장소 연결 불가: {}", err);
            err
        })?;

        let connector = self.connector.clone();
        let policy = self.policy;

        self.flight
            .get_or_try_init(move || establish(connector, address, policy))
            .await
    }

    /// 연결 가능 여부를 확인합니다. 실패는 로그로만 남깁니다.
    pub async fn verify_connection(&self) -> bool {
        match self.acquire().await {
            Ok(_) => true,
            Err(err) => {
                warn!("⚠️ 저장소 연결 확인 실패: {}", err);
                false
            }
        }
    }
}

async fn establish<C>(
    connector: Arc<dyn StoreConnector<C>>,
    address: String,
    policy: ConnectionPolicy,
) -> Result<C, AppError>
where
    C: Send + 'static,
{
    let first = attempt(connector.as_ref(), &address, policy.connect_timeout).await;

    let result = match (first, policy.retry_backoff) {
        (Err(err), Some(backoff)) if err.is_retryable() => {
            warn!(
                "⚠️ 저장소 연결 실패, {}ms 후 한 번 재시도합니다: {}",
                backoff.as_millis(),
                err
            );
            tokio::time::sleep(backoff).await;
            attempt(connector.as_ref(), &address, policy.connect_timeout).await
        }
        (result, _) => result,
    };

    match &result {
        Ok(_) => info!("✅ 저장소 연결 성공"),
        Err(err) => error!("❌ 저장소 연결 실패: {}", err),
    }

    result
}

async fn attempt<C>(
    connector: &dyn StoreConnector<C>,
    address: &str,
    timeout: Duration,
) -> Result<C, AppError> {
    tokio::time::timeout(timeout, connector.connect(address))
        .await
        .map_err(|_| {
            AppError::ConnectionError(format!(
                "connection attempt timed out after {}ms",
                timeout.as_millis()
            ))
        })?
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 처음 `failures`번은 지정된 에러로 실패하고 이후 성공하는 커넥터
    struct FakeConnector {
        calls: AtomicUsize,
        failures: usize,
        failure: AppError,
        delay: Duration,
    }

    impl FakeConnector {
        fn succeeding() -> Self {
            Self::failing(0, AppError::ConnectionError("unused".to_string()))
        }

        fn failing(failures: usize, failure: AppError) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                failures,
                failure,
                delay: Duration::from_millis(20),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StoreConnector<String> for FakeConnector {
        async fn connect(&self, address: &str) -> Result<String, AppError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;

            if call < self.failures {
                Err(self.failure.clone())
            } else {
                Ok(format!("connection-to-{}", address))
            }
        }
    }

    fn no_retry() -> ConnectionPolicy {
        ConnectionPolicy {
            connect_timeout: Duration::from_secs(1),
            retry_backoff: None,
        }
    }

    fn cache_with(
        address: Option<&str>,
        connector: Arc<FakeConnector>,
        policy: ConnectionPolicy,
    ) -> ConnectionCache<String> {
        ConnectionCache::new(address.map(str::to_string), connector, policy)
    }

    #[tokio::test]
    async fn test_missing_address_fails_before_any_attempt() {
        let connector = Arc::new(FakeConnector::succeeding());
        let cache = cache_with(None, connector.clone(), no_retry());

        let result = cache.acquire().await;

        assert!(matches!(result, Err(AppError::ConfigError(_))));
        assert_eq!(connector.calls(), 0);
    }

    #[tokio::test]
    async fn test_in_flight_attempt_is_reported_as_connecting() {
        let connector = Arc::new(FakeConnector::succeeding());
        let cache = Arc::new(cache_with(Some("db"), connector, no_retry()));
        assert!(!cache.is_connecting());

        let pending = tokio::spawn({
            let cache = cache.clone();
            async move { cache.acquire().await }
        });
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(cache.is_connecting());

        pending.await.unwrap().unwrap();
        assert!(!cache.is_connecting());
        assert!(cache.cached().is_some());
    }

    #[tokio::test]
    async fn test_concurrent_acquire_makes_one_attempt() {
        let connector = Arc::new(FakeConnector::succeeding());
        let cache = Arc::new(cache_with(Some("db"), connector.clone(), no_retry()));

        let callers = (0..8).map(|_| {
            let cache = cache.clone();
            async move { cache.acquire().await }
        });
        let results = futures_util::future::join_all(callers).await;

        assert_eq!(connector.calls(), 1);
        assert!(results.iter().all(|r| r.as_deref() == Ok("connection-to-db")));

        // 캐시된 연결은 새 시도 없이 반환
        cache.acquire().await.unwrap();
        assert_eq!(connector.calls(), 1);
        assert_eq!(cache.cached().as_deref(), Some("connection-to-db"));
    }

    #[tokio::test]
    async fn test_failed_attempt_is_not_cached() {
        let connector = Arc::new(FakeConnector::failing(
            1,
            AppError::ConnectionError("connection refused".to_string()),
        ));
        let cache = cache_with(Some("db"), connector.clone(), no_retry());

        let first = cache.acquire().await;
        assert!(matches!(first, Err(AppError::ConnectionError(_))));
        assert!(cache.cached().is_none());

        let second = cache.acquire().await;
        assert_eq!(second.as_deref(), Ok("connection-to-db"));
        assert_eq!(connector.calls(), 2);
    }

    #[tokio::test]
    async fn test_connection_error_is_retried_once_after_backoff() {
        let connector = Arc::new(FakeConnector::failing(
            1,
            AppError::ConnectionError("connection refused".to_string()),
        ));
        let policy = ConnectionPolicy {
            connect_timeout: Duration::from_secs(1),
            retry_backoff: Some(Duration::from_millis(5)),
        };
        let cache = cache_with(Some("db"), connector.clone(), policy);

        let result = cache.acquire().await;

        assert_eq!(result.as_deref(), Ok("connection-to-db"));
        assert_eq!(connector.calls(), 2);
    }

    #[tokio::test]
    async fn test_retry_happens_at_most_once() {
        let connector = Arc::new(FakeConnector::failing(
            5,
            AppError::ConnectionError("connection refused".to_string()),
        ));
        let policy = ConnectionPolicy {
            connect_timeout: Duration::from_secs(1),
            retry_backoff: Some(Duration::from_millis(5)),
        };
        let cache = cache_with(Some("db"), connector.clone(), policy);

        let result = cache.acquire().await;

        assert!(matches!(result, Err(AppError::ConnectionError(_))));
        assert_eq!(connector.calls(), 2);
    }

    #[tokio::test]
    async fn test_config_error_from_connector_is_not_retried() {
        let connector = Arc::new(FakeConnector::failing(
            1,
            AppError::ConfigError("Invalid MONGODB_URI".to_string()),
        ));
        let cache = cache_with(Some("not-a-uri"), connector.clone(), ConnectionPolicy::default());

        let result = cache.acquire().await;

        assert!(matches!(result, Err(AppError::ConfigError(_))));
        assert_eq!(connector.calls(), 1);
    }

    #[tokio::test]
    async fn test_slow_connector_times_out() {
        let connector = Arc::new(FakeConnector::succeeding());
        let policy = ConnectionPolicy {
            connect_timeout: Duration::from_millis(1),
            retry_backoff: None,
        };
        let cache = cache_with(Some("db"), connector, policy);

        let result = cache.acquire().await;

        assert!(matches!(result, Err(AppError::ConnectionError(_))));
    }

    #[tokio::test]
    async fn test_verify_connection_reports_outcome() {
        let healthy = cache_with(Some("db"), Arc::new(FakeConnector::succeeding()), no_retry());
        let missing = cache_with(None, Arc::new(FakeConnector::succeeding()), no_retry());

        assert!(healthy.verify_connection().await);
        assert!(!missing.verify_connection().await);
    }
}
