//! # Domain Models
//!
//! 게이트웨이와 자격 증명 프로바이더 사이에서 주고받는 값입니다.
//!
//! - [`Session`] - 프로바이더가 발급한 불투명한 세션
//! - [`RequestContext`] - 로그아웃 시 현재 세션을 식별하는 요청 정보

pub mod session;
pub mod request_context;

pub use session::{Session, SessionUser};
pub use request_context::RequestContext;
