//! 계정 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동합니다. 설정에서 애플리케이션
//! 컨텍스트를 조립해 서버에 주입하고, 저장소 연결은 첫 요청 전에
//! 한 번 예열합니다. 예열이 실패해도 서버는 시작되며, 이후 요청에서
//! 연결을 다시 시도합니다.

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use env_logger::Env;
use log::{error, info, warn};
use account_service_backend::config::{load_env_file, RateLimitConfig, ServerConfig};
use account_service_backend::core::AppContext;
use account_service_backend::routes::configure_all_routes;
use account_service_backend::utils::display_terminal::print_startup_summary;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화 (RUST_LOG도 .env 파일에서 읽음)
    let profile = load_env_file();
    init_logging();

    info!("🚀 계정 서비스 시작중... (profile: {})", profile);

    let context = AppContext::from_env().map_err(|e| {
        error!("❌ 애플리케이션 컨텍스트 초기화 실패: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    // 저장소 연결 예열 (실패해도 서버는 시작)
    info!("📡 데이터베이스 연결 중...");
    if context.connections.verify_connection().await {
        info!("✅ MongoDB 연결 성공");
    } else {
        warn!("⚠️ MongoDB 연결 예열 실패, 첫 요청에서 다시 시도합니다");
    }

    start_http_server(context).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, Rate Limiting, 로깅, 경로 정규화 미들웨어를 포함하며
/// 게이트웨이, 세션 쿠키 설정, 연결 캐시를 앱 데이터로 등록합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(context: AppContext) -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    // Rate Limiting 설정
    let rate_limit_config = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    let events_target = if context.event_config.event_key.is_some() {
        context.event_config.base_url.clone()
    } else {
        "log only (INNGEST_EVENT_KEY 미설정)".to_string()
    };
    print_startup_summary(
        &bind_address,
        &context.store_config.database_name,
        &events_target,
        !context.provider_config.disable_sign_up,
    );
    info!("📍 Health check: http://{}/health", bind_address);

    let gateway = context.gateway_data();
    let connections = context.connections_data();
    let cookie_settings = web::Data::new(context.cookie_settings());

    HttpServer::new(move || {
        // CORS 설정
        let cors = configure_cors();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())

            // 명시적 의존성 주입
            .app_data(gateway.clone())
            .app_data(connections.clone())
            .app_data(cookie_settings.clone())

            // 라우트 설정
            .configure(configure_all_routes)
    })
        .bind(&bind_address)?
        .workers(4) // 워커 스레드 수
        .run()
        .await
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=debug")
///
/// ```bash
/// RUST_LOG=account_service_backend::events=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// CORS 설정을 구성합니다
///
/// 세션 쿠키를 주고받으므로 자격 증명을 허용합니다.
///
/// # Allowed Origins
///
/// * `http://localhost:3000` - 프론트엔드 개발 서버
/// * `http://localhost:8080` - 자체 서버
/// * `127.0.0.1` 동등한 주소들
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        // Preflight 요청 캐시 시간 (초)
        .max_age(3600)
}
