use std::fmt;

/// 요청에서 추출한 세션 식별 정보
///
/// 세션 쿠키나 `Authorization: Bearer` 헤더가 없으면 익명 컨텍스트입니다.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    session_token: Option<String>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// 빈 토큰은 익명으로 취급합니다.
    pub fn with_session_token(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            session_token: (!token.trim().is_empty()).then_some(token),
        }
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    pub fn has_session(&self) -> bool {
        self.session_token.is_some()
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("has_session", &self.has_session())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_token_is_anonymous() {
        assert!(!RequestContext::with_session_token("  ").has_session());
        assert!(!RequestContext::anonymous().has_session());
        assert_eq!(
            RequestContext::with_session_token("abc").session_token(),
            Some("abc")
        );
    }
}
