//! Account Lifecycle HTTP Handlers
//!
//! 가입, 로그인, 로그아웃 HTTP 엔드포인트입니다. 모든 응답 본문은
//! `{"success": true, "data": ...}` 또는 `{"success": false, "error": "..."}` 형태입니다.
//!
//! # Endpoints
//!
//! - `POST /api/v1/auth/sign-up` - 계정 생성 후 자동 로그인 (세션 쿠키 발급)
//! - `POST /api/v1/auth/sign-in` - 이메일/비밀번호 로그인 (세션 쿠키 발급)
//! - `POST /api/v1/auth/sign-out` - 현재 세션 무효화 (세션 쿠키 삭제)
//!
//! 세션 토큰은 HttpOnly 쿠키로만 전달되며, 로그아웃은 쿠키 또는
//! `Authorization: Bearer <token>` 헤더로 세션을 식별합니다.
//!
//! # 가입 폼 검증
//!
//! 가입 폼의 형식 오류(이메일 형식, 비밀번호 길이, 빈 값 또는 공백뿐인 필드)는
//! 게이트웨이 호출 전에 `AppError::ValidationError`로 400 응답하며, 본문에는
//! 필드별 검증 메시지가 들어갑니다. 폼을 통과한 뒤의 실패만
//! `"Sign up failed."` 고정 메시지를 사용합니다.

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::http::{header, StatusCode};
use actix_web::{post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::config::SessionCookieSettings;
use crate::domain::dto::{SessionResponse, SignInRequest, SignUpRequest};
use crate::domain::models::{RequestContext, Session};
use crate::errors::{ActionResult, AppError};
use crate::services::auth::AccountGateway;

#[post("/sign-up")]
pub async fn sign_up(
    gateway: web::Data<dyn AccountGateway>,
    cookie_settings: web::Data<SessionCookieSettings>,
    payload: web::Json<SignUpRequest>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let result = gateway.sign_up(payload.into_inner()).await;

    Ok(session_response(result, &cookie_settings, StatusCode::BAD_REQUEST))
}

#[post("/sign-in")]
pub async fn sign_in(
    gateway: web::Data<dyn AccountGateway>,
    cookie_settings: web::Data<SessionCookieSettings>,
    payload: web::Json<SignInRequest>,
) -> HttpResponse {
    let result = gateway.sign_in(&payload.email, &payload.password).await;

    session_response(result, &cookie_settings, StatusCode::UNAUTHORIZED)
}

#[post("/sign-out")]
pub async fn sign_out(
    req: HttpRequest,
    gateway: web::Data<dyn AccountGateway>,
    cookie_settings: web::Data<SessionCookieSettings>,
) -> HttpResponse {
    let context = request_context(&req, &cookie_settings);
    let result = gateway.sign_out(&context).await;

    let status = if result.is_success() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };

    // 실패해도 클라이언트 쪽 쿠키는 지움
    HttpResponse::build(status)
        .cookie(removal_cookie(&cookie_settings))
        .json(result)
}

/// 세션 쿠키 또는 Bearer 헤더에서 요청 컨텍스트를 만듭니다.
pub fn request_context(req: &HttpRequest, cookie_settings: &SessionCookieSettings) -> RequestContext {
    if let Some(cookie) = req.cookie(&cookie_settings.name) {
        return RequestContext::with_session_token(cookie.value());
    }

    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(RequestContext::with_session_token)
        .unwrap_or_else(RequestContext::anonymous)
}

fn session_response(
    result: ActionResult<Session>,
    cookie_settings: &SessionCookieSettings,
    failure_status: StatusCode,
) -> HttpResponse {
    match result {
        ActionResult::Success(session) => HttpResponse::Ok()
            .cookie(session_cookie(&session, cookie_settings))
            .json(ActionResult::success(SessionResponse::from(&session))),
        ActionResult::Failure(message) => {
            HttpResponse::build(failure_status).json(ActionResult::<()>::failure(message))
        }
    }
}

fn session_cookie<'c>(session: &Session, settings: &SessionCookieSettings) -> Cookie<'c> {
    Cookie::build(settings.name.clone(), session.token.clone())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure)
        .max_age(CookieDuration::seconds(settings.max_age_secs))
        .finish()
}

fn removal_cookie<'c>(settings: &SessionCookieSettings) -> Cookie<'c> {
    let mut cookie = Cookie::build(settings.name.clone(), "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure)
        .finish();
    cookie.make_removal();
    cookie
}
