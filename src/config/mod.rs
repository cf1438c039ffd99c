//! # Configuration Module
//!
//! 계정 서비스의 설정 관리를 담당하는 모듈입니다.
//! 모든 값은 환경 변수(및 프로필별 `.env` 파일)에서 읽어옵니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, 문서 저장소 연결 설정
//! - [`auth_config`] - 자격 증명 프로바이더, 비밀번호 정책, 세션 설정
//! - [`event_config`] - 온보딩 이벤트 플랫폼 및 디스패치 큐 설정
//!
//! ## 필수 환경 변수
//!
//! ```bash
//! export MONGODB_URI="mongodb://localhost:27017"
//! export BETTER_AUTH_SECRET="your-provider-secret"
//! export BETTER_AUTH_URL="https://app.example.com"
//! export INNGEST_EVENT_KEY="your-event-key"
//! ```
//!
//! `MONGODB_URI`가 없으면 서버는 시작되지만 첫 연결 시도에서
//! `ConfigError`로 실패합니다.

pub mod data_config;
pub mod auth_config;
pub mod event_config;

pub use data_config::*;
pub use auth_config::*;
pub use event_config::*;
