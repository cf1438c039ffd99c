//! # Onboarding Events
//!
//! 계정 생성이 확정된 뒤 외부 이벤트 플랫폼에 `app/user.created` 이벤트를 발행합니다.
//! 이벤트는 비동기 온보딩 작업(환영 메일 등)이 소비합니다.
//!
//! ```text
//! AuthGateway ──publish()──▶ EventDispatcher ──(bounded queue)──▶ worker ──▶ EventPublisher ──▶ 이벤트 플랫폼
//!      │                            │
//!      └── 응답 반환 (기다리지 않음) ◀─┘ DispatchHandle (선택적 대기)
//! ```
//!
//! ## 전달 보장
//!
//! - 디스패처는 재시도하지 않습니다. 전달 보장은 이벤트 플랫폼의 at-least-once에 의존합니다.
//! - 발행 실패는 경고 로그(이벤트 내용 포함)로만 남고, 가입 결과를 바꾸지 않습니다.
//! - 발행 실패 시 보상 작업이나 영속 재시도 큐는 없습니다.

pub mod onboarding;
pub mod publisher;
pub mod dispatcher;

pub use onboarding::{OnboardingEvent, OnboardingPayload, USER_CREATED_EVENT};
pub use publisher::{publisher_from_config, EventPublisher, InngestPublisher, LogOnlyPublisher};
pub use dispatcher::{DispatchHandle, EventDispatcher};
