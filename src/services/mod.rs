//! # Service Layer
//!
//! 비즈니스 로직 계층입니다. 핸들러는 [`auth::AccountGateway`] 트레이트에만 의존하며,
//! 구현체는 [`crate::core::AppContext`]에서 조립되어 주입됩니다.

pub mod auth;
