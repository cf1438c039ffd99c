//! 저장소 연결 점검 도구
//!
//! 서버를 띄우지 않고 `MONGODB_URI`로 한 번 연결을 시도합니다.
//!
//! ```bash
//! cargo run --bin check_store
//! cargo run --bin check_store -- --skip-ping
//! ```
//!
//! 종료 코드: `0` 성공, `1` 설정 누락, `2` 연결 실패

use std::process::ExitCode;

use env_logger::Env;
use log::warn;
use account_service_backend::config::{load_env_file, StoreConfig};
use account_service_backend::db::{check_connectivity, ConnectionCache, ConnectivityOutcome};
use account_service_backend::utils::display_terminal::{print_boxed_title, print_sub_task};

#[actix_web::main]
async fn main() -> ExitCode {
    load_env_file();
    env_logger::init_from_env(Env::default().default_filter_or("warn"));

    let skip_ping = std::env::args().any(|arg| arg == "--skip-ping");
    let config = StoreConfig::from_env();

    print_boxed_title("🔍 STORE CONNECTIVITY CHECK");
    print_sub_task("Database", &config.database_name);

    let cache = ConnectionCache::from_config(&config);
    let report = check_connectivity(&cache).await;

    match &report.outcome {
        ConnectivityOutcome::Connected(database) => {
            println!(
                "✅ connection successful (in {} ms)",
                report.elapsed.as_millis()
            );

            if skip_ping {
                print_sub_task("Ping", "skipped");
            } else {
                // ping 실패는 점검 결과에 영향 없음
                match database.ping().await {
                    Ok(reply) => print_sub_task("Ping", &reply.to_string()),
                    Err(e) => warn!("⚠️ ping 실패: {}", e),
                }
            }
        }
        ConnectivityOutcome::MissingConfiguration(message) => {
            eprintln!("❌ missing configuration: {}", message);
            eprintln!("   MONGODB_URI 환경 변수를 설정하세요");
        }
        ConnectivityOutcome::ConnectionFailed(message) => {
            eprintln!(
                "❌ connection failed after {} ms: {}",
                report.elapsed.as_millis(),
                message
            );
        }
    }

    ExitCode::from(report.exit_code())
}
