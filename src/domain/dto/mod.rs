//! # Data Transfer Objects
//!
//! HTTP 계층의 요청/응답 계약입니다. 요청 DTO는 `validator`로
//! 형식을 검증하며, 필드 이름은 클라이언트 폼과 같은 camelCase를 사용합니다.

pub mod auth;

pub use auth::*;
