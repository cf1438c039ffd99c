//! # Core Module
//!
//! 서비스 전반에서 공유하는 핵심 프리미티브와 애플리케이션 조립 코드입니다.
//!
//! ## 모듈 구성
//!
//! ### [`single_flight`] - 일회성 생성 프리미티브
//! - 동시에 들어온 N개의 최초 호출이 단 한 번의 생성 작업을 공유
//! - 성공 값은 프로세스 수명 동안 캐시, 실패 시 슬롯을 비워 재시도 허용
//!
//! ### [`context`] - 애플리케이션 컨텍스트
//! - 설정에서 연결 캐시, 프로바이더 팩토리, 이벤트 디스패처, 게이트웨이를 조립
//! - 전역 싱글톤 대신 명시적으로 생성하여 핸들러에 주입
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! let context = AppContext::from_env()?;
//!
//! HttpServer::new(move || {
//!     App::new()
//!         .app_data(context.gateway_data())
//!         .configure(configure_all_routes)
//! })
//! ```

pub mod single_flight;
pub mod context;

pub use single_flight::SingleFlight;
pub use context::AppContext;
