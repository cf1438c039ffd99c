//! # Auth Gateway
//!
//! 자격 증명 프로바이더를 감싸 가입, 로그인, 로그아웃을 일관된
//! [`ActionResult`] 계약으로 노출하는 서비스입니다.
//!
//! ## 동작 흐름
//!
//! ```text
//! sign_up ──▶ 입력 검증 ──▶ ConnectionCache::acquire() ──▶ 프로바이더 핸들 (단일 비행)
//!                                                              │
//!                                    sign_up_email ◀───────────┘
//!                                         │
//!                          성공 ──▶ OnboardingEvent 생성 ──▶ EventDispatcher::publish (기다리지 않음)
//!                          실패 ──▶ "Sign up failed." (이벤트 없음)
//! ```
//!
//! ## 실패 메시지
//!
//! | 작업 | 프로바이더 거부 | 설정/연결 장애 |
//! |------|----------------|---------------|
//! | 가입 | `Sign up failed.` | `Sign up failed.` |
//! | 로그인 | `Email or password is incorrect.` | `Sign in failed. Please try again.` |
//! | 로그아웃 | `Sign out failed.` | `Sign out failed.` |
//!
//! 원본 에러는 서버 로그에만 남고 호출자에게는 전달되지 않습니다.
//!
//! ## 가입 상태 전이
//!
//! `Idle → Validating → Creating → Created → Emitting → Done`, 실패 시
//! `Validating | Creating → Failed → Done`. 이벤트 발행 단계(`Emitting`)는
//! 실패 상태로 가지 않습니다.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, info, warn};
use validator::ValidateEmail;

use crate::config::ProviderConfig;
use crate::core::SingleFlight;
use crate::db::{ConnectionCache, Database};
use crate::domain::dto::SignUpRequest;
use crate::domain::models::{RequestContext, Session};
use crate::errors::action_result::{
    INVALID_CREDENTIALS, SIGN_IN_FAILED, SIGN_OUT_FAILED, SIGN_UP_FAILED,
};
use crate::errors::{ActionResult, AppError};
use crate::events::{DispatchHandle, EventDispatcher, OnboardingEvent};
use crate::services::auth::provider::{CredentialProvider, ProviderFactory};

/// HTTP 핸들러가 의존하는 계정 생명주기 인터페이스
#[async_trait]
pub trait AccountGateway: Send + Sync {
    async fn sign_up(&self, request: SignUpRequest) -> ActionResult<Session>;

    async fn sign_in(&self, email: &str, password: &str) -> ActionResult<Session>;

    async fn sign_out(&self, context: &RequestContext) -> ActionResult<()>;
}

/// 게이트웨이 입력 검증과 호출 제한 시간
#[derive(Debug, Clone, Copy)]
pub struct GatewayPolicy {
    pub min_password_length: usize,
    pub max_password_length: usize,
    /// 프로바이더 호출 1회당 제한 시간
    pub call_timeout: Duration,
}

impl GatewayPolicy {
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self {
            min_password_length: config.min_password_length,
            max_password_length: config.max_password_length,
            call_timeout: config.request_timeout,
        }
    }

    fn accepts_password(&self, password: &str) -> bool {
        let length = password.chars().count();
        length >= self.min_password_length && length <= self.max_password_length
    }
}

impl Default for GatewayPolicy {
    fn default() -> Self {
        Self {
            min_password_length: 6,
            max_password_length: 128,
            call_timeout: Duration::from_secs(10),
        }
    }
}

/// 가입 요청 한 건의 진행 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpState {
    Idle,
    Validating,
    Creating,
    Created,
    Emitting,
    Failed,
    Done,
}

impl SignUpState {
    pub fn can_advance_to(self, next: SignUpState) -> bool {
        use SignUpState::*;

        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Creating)
                | (Validating, Failed)
                | (Creating, Created)
                | (Creating, Failed)
                | (Created, Emitting)
                | (Emitting, Done)
                | (Failed, Done)
        )
    }
}

struct SignUpFlow {
    state: SignUpState,
}

impl SignUpFlow {
    fn start() -> Self {
        Self { state: SignUpState::Idle }
    }

    fn advance(&mut self, next: SignUpState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "invalid sign-up transition {:?} -> {:?}",
            self.state,
            next
        );
        debug!("sign-up {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn fail(&mut self) {
        self.advance(SignUpState::Failed);
        self.advance(SignUpState::Done);
    }
}

/// 계정 생명주기 게이트웨이
///
/// 프로바이더 핸들은 첫 요청에서 한 번만 만들어지며, 동시에 들어온
/// 최초 요청들은 같은 생성 작업을 기다립니다.
pub struct AuthGateway<C = Database>
where
    C: Clone + Send + Sync + 'static,
{
    connections: Arc<ConnectionCache<C>>,
    factory: Arc<dyn ProviderFactory<C>>,
    provider: SingleFlight<Arc<dyn CredentialProvider>, AppError>,
    dispatcher: Arc<EventDispatcher>,
    policy: GatewayPolicy,
}

impl<C> AuthGateway<C>
where
    C: Clone + Send + Sync + 'static,
{
    pub fn new(
        connections: Arc<ConnectionCache<C>>,
        factory: Arc<dyn ProviderFactory<C>>,
        dispatcher: Arc<EventDispatcher>,
        policy: GatewayPolicy,
    ) -> Self {
        Self {
            connections,
            factory,
            provider: SingleFlight::new(),
            dispatcher,
            policy,
        }
    }

    /// 회원가입을 처리하고, 이벤트가 발행된 경우 그 완료 핸들을 함께 반환합니다.
    ///
    /// 요청 경로에서는 핸들을 버리며([`AccountGateway::sign_up`]),
    /// 테스트는 핸들로 발행 완료를 기다릴 수 있습니다.
    ///
    /// # 반환값
    ///
    /// * `(Success(session), Some(handle))` - 계정 생성 성공, 이벤트 대기열 추가
    /// * `(Failure("Sign up failed."), None)` - 입력 거부 또는 프로바이더 실패. 이벤트 없음
    pub async fn sign_up_with_hook(
        &self,
        request: SignUpRequest,
    ) -> (ActionResult<Session>, Option<DispatchHandle>) {
        let mut flow = SignUpFlow::start();

        flow.advance(SignUpState::Validating);
        if let Err(reason) = self.check_sign_up(&request) {
            warn!("회원가입 입력 거부: {}", reason);
            flow.fail();
            return (ActionResult::failure(SIGN_UP_FAILED), None);
        }

        flow.advance(SignUpState::Creating);
        let created = self
            .with_provider("sign-up", |provider| async move {
                let session = provider
                    .sign_up_email(&request.email, &request.password, &request.full_name)
                    .await?;
                Ok((session, request))
            })
            .await;

        let (session, request) = match created {
            Ok(created) => created,
            Err(err) => {
                log_failure("회원가입", &err);
                flow.fail();
                return (ActionResult::failure(SIGN_UP_FAILED), None);
            }
        };

        flow.advance(SignUpState::Created);
        info!("✅ 계정 생성 완료: {}", session.user.id);

        flow.advance(SignUpState::Emitting);
        let event = OnboardingEvent::for_created_account(&session, &request);
        let handle = self.dispatcher.publish(event);

        flow.advance(SignUpState::Done);
        (ActionResult::success(session), Some(handle))
    }

    /// 자격 증명과 프로필 필드를 확인합니다. 프로필이 비어 있으면 온보딩 이벤트가
    /// 거부되므로 계정을 만들기 전에 막습니다.
    fn check_sign_up(&self, request: &SignUpRequest) -> Result<(), AppError> {
        self.check_credentials(&request.email, &request.password)?;

        match request.blank_profile_field() {
            Some(field) => Err(AppError::ValidationError(format!("`{}` must not be blank", field))),
            None => Ok(()),
        }
    }

    fn check_credentials(&self, email: &str, password: &str) -> Result<(), AppError> {
        if !email.validate_email() {
            return Err(AppError::ValidationError("invalid email syntax".to_string()));
        }

        if !self.policy.accepts_password(password) {
            return Err(AppError::ValidationError(format!(
                "password must be {}-{} characters",
                self.policy.min_password_length, self.policy.max_password_length
            )));
        }

        Ok(())
    }

    /// 프로바이더 핸들을 반환하거나, 없으면 연결을 확보한 뒤 한 번만 생성합니다.
    async fn provider(&self) -> Result<Arc<dyn CredentialProvider>, AppError> {
        if let Some(provider) = self.provider.get() {
            return Ok(provider);
        }

        let connection = self.connections.acquire().await?;
        let factory = self.factory.clone();

        self.provider
            .get_or_try_init(move || async move { factory.build(connection).await })
            .await
    }

    /// 프로바이더 호출을 제한 시간 안에서 실행합니다.
    async fn with_provider<T, F, Fut>(&self, operation: &str, call: F) -> Result<T, AppError>
    where
        F: FnOnce(Arc<dyn CredentialProvider>) -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let provider = self.provider().await?;

        tokio::time::timeout(self.policy.call_timeout, call(provider))
            .await
            .map_err(|_| {
                AppError::ConnectionError(format!(
                    "{} timed out after {}ms",
                    operation,
                    self.policy.call_timeout.as_millis()
                ))
            })?
    }
}

#[async_trait]
impl<C> AccountGateway for AuthGateway<C>
where
    C: Clone + Send + Sync + 'static,
{
    /// 이벤트 발행은 기다리지 않습니다.
    async fn sign_up(&self, request: SignUpRequest) -> ActionResult<Session> {
        let (result, _handle) = self.sign_up_with_hook(request).await;
        result
    }

    async fn sign_in(&self, email: &str, password: &str) -> ActionResult<Session> {
        // 존재할 수 없는 자격 증명은 프로바이더에 묻지 않고 같은 메시지로 거부
        if self.check_credentials(email, password).is_err() {
            return ActionResult::failure(INVALID_CREDENTIALS);
        }

        let email = email.to_string();
        let password = password.to_string();

        let result = self
            .with_provider("sign-in", |provider| async move {
                provider.sign_in_email(&email, &password).await
            })
            .await;

        match result {
            Ok(session) => {
                info!("✅ 로그인 성공: {}", session.user.id);
                ActionResult::success(session)
            }
            Err(err @ AppError::ProviderError(_)) => {
                debug!("로그인 거부: {}", err);
                ActionResult::failure(INVALID_CREDENTIALS)
            }
            Err(err) => {
                log_failure("로그인", &err);
                ActionResult::failure(SIGN_IN_FAILED)
            }
        }
    }

    async fn sign_out(&self, context: &RequestContext) -> ActionResult<()> {
        let context = context.clone();

        let result = self
            .with_provider("sign-out", |provider| async move {
                provider.sign_out(&context).await
            })
            .await;

        match result {
            Ok(()) => ActionResult::success(()),
            Err(err) => {
                log_failure("로그아웃", &err);
                ActionResult::failure(SIGN_OUT_FAILED)
            }
        }
    }
}

fn log_failure(operation: &str, err: &AppError) {
    match err {
        AppError::ProviderError(_) | AppError::ValidationError(_) => {
            warn!("⚠️ {} 거부: {}", operation, err)
        }
        _ => error!("❌ {} 실패: {}", operation, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EventConfig;
    use crate::db::{ConnectionPolicy, StoreConnector};
    use crate::domain::models::SessionUser;
    use crate::events::EventPublisher;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeConnector {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl StoreConnector<()> for FakeConnector {
        async fn connect(&self, _address: &str) -> Result<(), AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            if self.fail {
                Err(AppError::ConnectionError("connection refused".to_string()))
            } else {
                Ok(())
            }
        }
    }

    /// 이메일당 한 번만 가입을 허용하는 메모리 프로바이더
    #[derive(Default)]
    struct InMemoryProvider {
        accounts: Mutex<HashMap<String, String>>,
        sessions: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CredentialProvider for InMemoryProvider {
        async fn sign_up_email(&self, email: &str, password: &str, name: &str) -> Result<Session, AppError> {
            let mut accounts = self.accounts.lock().unwrap();
            if accounts.contains_key(email) {
                return Err(AppError::ProviderError("user already exists".to_string()));
            }
            accounts.insert(email.to_string(), password.to_string());
            drop(accounts);
            Ok(self.issue(email, name))
        }

        async fn sign_in_email(&self, email: &str, password: &str) -> Result<Session, AppError> {
            let stored = self.accounts.lock().unwrap().get(email).cloned();
            match stored {
                Some(stored) if stored == password => Ok(self.issue(email, "A B")),
                Some(_) => Err(AppError::ProviderError("invalid password".to_string())),
                None => Err(AppError::ProviderError("unknown email".to_string())),
            }
        }

        async fn sign_out(&self, context: &RequestContext) -> Result<(), AppError> {
            let token = context
                .session_token()
                .ok_or_else(|| AppError::ProviderError("no active session".to_string()))?;
            let mut sessions = self.sessions.lock().unwrap();
            let before = sessions.len();
            sessions.retain(|existing| existing != token);
            if sessions.len() < before {
                Ok(())
            } else {
                Err(AppError::ProviderError("session not found".to_string()))
            }
        }
    }

    impl InMemoryProvider {
        fn issue(&self, email: &str, name: &str) -> Session {
            let token = format!("token-{}", uuid::Uuid::new_v4().simple());
            self.sessions.lock().unwrap().push(token.clone());
            Session {
                token,
                user: SessionUser {
                    id: format!("id-{}", email),
                    email: email.to_string(),
                    name: name.to_string(),
                },
                expires_at: chrono::Utc::now() + chrono::Duration::days(7),
            }
        }
    }

    struct FakeFactory {
        builds: AtomicUsize,
        provider: Arc<InMemoryProvider>,
    }

    #[async_trait]
    impl ProviderFactory<()> for FakeFactory {
        async fn build(&self, _connection: ()) -> Result<Arc<dyn CredentialProvider>, AppError> {
            self.builds.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok(self.provider.clone())
        }
    }

    #[derive(Default)]
    struct RecordingPublisher {
        events: Mutex<Vec<serde_json::Value>>,
    }

    #[async_trait]
    impl EventPublisher for RecordingPublisher {
        async fn publish(&self, _name: &str, data: &serde_json::Value) -> Result<(), AppError> {
            self.events.lock().unwrap().push(data.clone());
            Ok(())
        }
    }

    struct Harness<P = RecordingPublisher> {
        gateway: Arc<AuthGateway<()>>,
        connector: Arc<FakeConnector>,
        factory: Arc<FakeFactory>,
        publisher: Arc<P>,
    }

    /// 항상 거부하는 이벤트 플랫폼
    struct RejectingPublisher;

    #[async_trait]
    impl EventPublisher for RejectingPublisher {
        async fn publish(&self, name: &str, _data: &serde_json::Value) -> Result<(), AppError> {
            Err(AppError::DispatchError(format!("{} rejected: 503", name)))
        }
    }

    fn harness(store_fails: bool) -> Harness {
        let publisher = Arc::new(RecordingPublisher::default());
        harness_with_publisher(store_fails, publisher)
    }

    fn harness_with_publisher<P>(store_fails: bool, publisher: Arc<P>) -> Harness<P>
    where
        P: EventPublisher + 'static,
    {
        let connector = Arc::new(FakeConnector {
            calls: AtomicUsize::new(0),
            fail: store_fails,
        });
        let connections = Arc::new(ConnectionCache::new(
            Some("mongodb://fake".to_string()),
            connector.clone(),
            ConnectionPolicy {
                connect_timeout: Duration::from_secs(1),
                retry_backoff: None,
            },
        ));
        let factory = Arc::new(FakeFactory {
            builds: AtomicUsize::new(0),
            provider: Arc::new(InMemoryProvider::default()),
        });
        let dispatcher = Arc::new(EventDispatcher::start(publisher.clone(), &EventConfig::default()));

        let gateway = Arc::new(AuthGateway::new(
            connections,
            factory.clone(),
            dispatcher,
            GatewayPolicy::default(),
        ));

        Harness {
            gateway,
            connector,
            factory,
            publisher,
        }
    }

    fn sign_up_request(email: &str) -> SignUpRequest {
        SignUpRequest {
            email: email.to_string(),
            password: "secret1".to_string(),
            full_name: "A B".to_string(),
            country: "VN".to_string(),
            investment_goals: "Growth".to_string(),
            risk_tolerance: "Medium".to_string(),
            preferred_industry: "Technology".to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_publishes_one_event_with_request_fields() {
        let h = harness(false);

        let (result, handle) = h.gateway.sign_up_with_hook(sign_up_request("a@b.com")).await;

        assert!(result.is_success());
        handle.unwrap().wait().await.unwrap();

        let events = h.publisher.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["email"], "a@b.com");
        assert_eq!(events[0]["name"], "A B");
        assert_eq!(events[0]["preferredIndustry"], "Technology");
    }

    #[tokio::test]
    async fn test_duplicate_sign_up_fails_without_event() {
        let h = harness(false);

        let (_, first) = h.gateway.sign_up_with_hook(sign_up_request("a@b.com")).await;
        first.unwrap().wait().await.unwrap();

        let (second, handle) = h.gateway.sign_up_with_hook(sign_up_request("a@b.com")).await;

        assert_eq!(second.error_message(), Some(SIGN_UP_FAILED));
        assert!(handle.is_none());
        assert_eq!(h.publisher.events.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_store() {
        let h = harness(false);

        let mut short = sign_up_request("a@b.com");
        short.password = "12345".to_string();
        let bad_email = sign_up_request("not-an-email");

        assert_eq!(h.gateway.sign_up(short).await.error_message(), Some(SIGN_UP_FAILED));
        assert_eq!(h.gateway.sign_up(bad_email).await.error_message(), Some(SIGN_UP_FAILED));
        assert_eq!(h.connector.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_blank_profile_field_fails_before_account_creation() {
        let h = harness(false);

        let mut request = sign_up_request("a@b.com");
        request.country = " ".to_string();
        let (result, handle) = h.gateway.sign_up_with_hook(request).await;

        assert_eq!(result.error_message(), Some(SIGN_UP_FAILED));
        assert!(handle.is_none());
        assert_eq!(h.connector.calls.load(Ordering::SeqCst), 0);
        assert!(h.factory.provider.accounts.lock().unwrap().is_empty());

        // 같은 이메일로 올바르게 다시 가입할 수 있음
        let (retry, retry_handle) = h.gateway.sign_up_with_hook(sign_up_request("a@b.com")).await;
        assert!(retry.is_success());
        retry_handle.unwrap().wait().await.unwrap();
        assert_eq!(h.publisher.events.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_publish_failure_keeps_sign_up_successful() {
        let h = harness_with_publisher(false, Arc::new(RejectingPublisher));

        let (result, handle) = h.gateway.sign_up_with_hook(sign_up_request("a@b.com")).await;

        let session = result.value().unwrap();
        assert_eq!(session.user.email, "a@b.com");
        assert!(!session.token.is_empty());

        let dispatched = handle.unwrap().wait().await;
        assert!(matches!(dispatched, Err(AppError::DispatchError(_))));

        // 계정은 그대로 남아 로그인 가능
        assert!(h.gateway.sign_in("a@b.com", "secret1").await.is_success());
        assert!(h.factory.provider.accounts.lock().unwrap().contains_key("a@b.com"));
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_share_one_message() {
        let h = harness(false);
        h.gateway.sign_up(sign_up_request("a@b.com")).await;

        let wrong_password = h.gateway.sign_in("a@b.com", "wrong-pass").await;
        let unknown_email = h.gateway.sign_in("nobody@b.com", "secret1").await;

        assert_eq!(wrong_password.error_message(), Some(INVALID_CREDENTIALS));
        assert_eq!(wrong_password.error_message(), unknown_email.error_message());
    }

    #[tokio::test]
    async fn test_sign_in_then_sign_out() {
        let h = harness(false);
        h.gateway.sign_up(sign_up_request("a@b.com")).await;

        let session = h.gateway.sign_in("a@b.com", "secret1").await.into_value().unwrap();
        let context = RequestContext::with_session_token(session.token);

        assert!(h.gateway.sign_out(&context).await.is_success());
        // 같은 세션으로 다시 로그아웃하면 실패
        assert_eq!(h.gateway.sign_out(&context).await.error_message(), Some(SIGN_OUT_FAILED));
    }

    #[tokio::test]
    async fn test_sign_out_without_session_is_failure() {
        let h = harness(false);

        let result = h.gateway.sign_out(&RequestContext::anonymous()).await;

        assert_eq!(result.error_message(), Some(SIGN_OUT_FAILED));
    }

    #[tokio::test]
    async fn test_store_outage_maps_to_generic_messages() {
        let h = harness(true);

        let sign_up = h.gateway.sign_up(sign_up_request("a@b.com")).await;
        let sign_in = h.gateway.sign_in("a@b.com", "secret1").await;

        assert_eq!(sign_up.error_message(), Some(SIGN_UP_FAILED));
        assert_eq!(sign_in.error_message(), Some(SIGN_IN_FAILED));
        assert!(h.publisher.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_first_requests_build_provider_once() {
        let h = harness(false);

        let callers = (0..10).map(|i| {
            let gateway = h.gateway.clone();
            async move { gateway.sign_in(&format!("user{}@b.com", i), "secret1").await }
        });
        futures_util::future::join_all(callers).await;

        assert_eq!(h.connector.calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.factory.builds.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_emitting_never_transitions_to_failed() {
        assert!(!SignUpState::Emitting.can_advance_to(SignUpState::Failed));
        assert!(SignUpState::Creating.can_advance_to(SignUpState::Failed));
        assert!(SignUpState::Emitting.can_advance_to(SignUpState::Done));
    }
}
