use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::{Session, SessionUser};

/// 가입/로그인 성공 시 본문으로 반환하는 세션 정보
///
/// 세션 토큰은 본문에 담지 않고 HttpOnly 쿠키로만 전달합니다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: SessionUser,
    pub expires_at: DateTime<Utc>,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            user: session.user.clone(),
            expires_at: session.expires_at,
        }
    }
}
