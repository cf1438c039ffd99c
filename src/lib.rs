//! 계정 서비스 백엔드
//!
//! 이메일/비밀번호 기반 계정 생명주기(가입, 로그인, 로그아웃)를 제공하는
//! Rust 서비스입니다. 가입이 성공하면 외부 이벤트 플랫폼으로 온보딩
//! 이벤트를 발행하며, 요청 경로는 발행 완료를 기다리지 않습니다.
//!
//! # Features
//!
//! - **단일 연결 시도**: 프로세스당 저장소 연결 시도는 동시에 하나뿐
//! - **인증 게이트웨이**: 자격 증명 공급자 호출을 성공/실패 결과로 정규화
//! - **온보딩 이벤트**: 제한된 큐와 백그라운드 워커를 통한 비동기 발행
//! - **명시적 의존성 주입**: [`core::AppContext`]에서 조립해 서버에 주입
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답, 세션 쿠키
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐      ┌──────────────────┐
//! │   AuthGateway   │ ───▶ │ EventDispatcher  │ → 이벤트 플랫폼
//! └─────────────────┘      └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 사용자, 세션
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ ConnectionCache │ ← MongoDB
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use account_service_backend::core::AppContext;
//! use account_service_backend::domain::dto::SignInRequest;
//!
//! let context = AppContext::from_env()?;
//! let result = context.gateway.sign_in("a@b.com", "secret1").await;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod events;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
