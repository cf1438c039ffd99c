//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client (Browser, Mobile App, API Client)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리         ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   AccountGateway - 결과 계약 통일                 ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   CredentialProvider / EventDispatcher          ← Infrastructure
//! └─────────────────────────────────────────────┘
//! ```
//!
//! 핸들러는 `web::Data<dyn AccountGateway>`로 게이트웨이를 주입받으므로
//! 테스트에서 가짜 구현으로 교체할 수 있습니다.

pub mod auth;
