//! 에러 및 작업 결과 타입 모듈
//!
//! - [`errors`] - 서버 내부 에러 분류 (`AppError`)
//! - [`action_result`] - 클라이언트에게 전달되는 성공/실패 결과

pub mod errors;
pub mod action_result;

pub use errors::{AppError, AppResult, ErrorContext};
pub use action_result::ActionResult;
