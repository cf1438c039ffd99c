//! API 라우트 설정 모듈
//!
//! 계정 생명주기 엔드포인트와 헬스체크 엔드포인트를 등록합니다.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | `/health` | 헬스체크 (저장소 연결 상태 포함) |
//! | POST | `/api/v1/auth/sign-up` | [`handlers::auth::sign_up`] |
//! | POST | `/api/v1/auth/sign-in` | [`handlers::auth::sign_in`] |
//! | POST | `/api/v1/auth/sign-out` | [`handlers::auth::sign_out`] |

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::db::ConnectionCache;
use crate::handlers;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    configure_auth_routes(cfg);
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(handlers::auth::sign_up)
            .service(handlers::auth::sign_in)
            .service(handlers::auth::sign_out)
    );
}

/// 헬스체크
///
/// 저장소 연결은 첫 요청 시 지연 생성됩니다.
///
/// | `features.database` | 의미 |
/// |---------------------|------|
/// | `connected` | 연결 수립됨 |
/// | `connecting` | 연결 시도 진행 중 |
/// | `pending` | 아직 시도 전이거나 마지막 시도 실패 |
/// | `unavailable` | 연결 캐시가 등록되지 않음 |
#[actix_web::get("/health")]
async fn health_check(connections: Option<web::Data<ConnectionCache>>) -> HttpResponse {
    let database = connections
        .map(|cache| database_status(cache.get_ref()))
        .unwrap_or("unavailable");

    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "account_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": database,
            "events": "app/user.created"
        }
    }))
}

fn database_status<C>(cache: &ConnectionCache<C>) -> &'static str
where
    C: Clone + Send + Sync + 'static,
{
    if cache.cached().is_some() {
        "connected"
    } else if cache.is_connecting() {
        "connecting"
    } else {
        "pending"
    }
}
