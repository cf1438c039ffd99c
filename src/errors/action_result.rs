//! 사용자에게 노출되는 작업 결과 타입
//!
//! 계정 작업(가입, 로그인, 로그아웃)의 결과를 성공 값 또는 고정된
//! 사용자 안전 메시지로 표현합니다. 프로바이더의 원본 에러는 절대
//! 이 타입으로 전달되지 않습니다.
//!
//! JSON 형태:
//!
//! ```json
//! { "success": true, "data": { "token": "...", "user": { ... } } }
//! { "success": false, "error": "Sign up failed." }
//! ```

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// 가입 실패 시 고정 메시지
pub const SIGN_UP_FAILED: &str = "Sign up failed.";

/// 로그인 자격 증명 불일치 시 고정 메시지
///
/// 존재하지 않는 계정과 잘못된 비밀번호를 구분하지 않습니다.
pub const INVALID_CREDENTIALS: &str = "Email or password is incorrect.";

/// 로그인 중 인프라 장애 시 일반 메시지
pub const SIGN_IN_FAILED: &str = "Sign in failed. Please try again.";

/// 로그아웃 실패 시 고정 메시지
pub const SIGN_OUT_FAILED: &str = "Sign out failed.";

/// 성공 값 또는 사용자 안전 실패 메시지
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult<T> {
    Success(T),
    Failure(String),
}

impl<T> ActionResult<T> {
    pub fn success(value: T) -> Self {
        ActionResult::Success(value)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        ActionResult::Failure(message.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ActionResult::Success(_))
    }

    /// 실패 메시지를 반환합니다. 성공이면 `None`.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ActionResult::Success(_) => None,
            ActionResult::Failure(message) => Some(message),
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            ActionResult::Success(value) => Some(value),
            ActionResult::Failure(_) => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            ActionResult::Success(value) => Some(value),
            ActionResult::Failure(_) => None,
        }
    }
}

impl<T: Serialize> Serialize for ActionResult<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ActionResult", 2)?;
        match self {
            ActionResult::Success(value) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", value)?;
            }
            ActionResult::Failure(message) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", message)?;
            }
        }
        state.end()
    }
}
