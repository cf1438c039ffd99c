//! # Domain Layer Module
//!
//! 계정 생명주기 서비스의 도메인 계층입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities  - 저장소에 영속되는 객체 (사용자, 세션 레코드)
//! ├── DTOs      - HTTP 요청/응답 계약
//! └── Models    - 서비스 계층에서 주고받는 값 (세션, 요청 컨텍스트)
//! ```
//!
//! 엔티티는 자격 증명 프로바이더 어댑터만 다루며, 게이트웨이와 핸들러는
//! [`models::Session`] 같은 불투명한 세션 값만 받습니다.

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use dto::*;
pub use models::*;
