use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 세션 소유자 정보
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// 자격 증명 프로바이더가 발급한 세션
///
/// `token`은 쿠키로만 전달되며 로그에 남기지 않습니다.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
    pub expires_at: DateTime<Utc>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_output_hides_token() {
        let session = Session {
            token: "super-secret-token".to_string(),
            user: SessionUser {
                id: "1".to_string(),
                email: "a@b.com".to_string(),
                name: "A B".to_string(),
            },
            expires_at: Utc::now(),
        };

        let rendered = format!("{:?}", session);

        assert!(!rendered.contains("super-secret-token"));
        assert!(rendered.contains("a@b.com"));
    }
}
