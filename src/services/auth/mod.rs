//! # Authentication Services
//!
//! 계정 생명주기(가입, 로그인, 로그아웃) 서비스 계층입니다.
//!
//! - [`auth_gateway`] - 결과 계약을 통일하는 게이트웨이와 가입 상태 전이
//! - [`provider`] - 자격 증명 프로바이더 및 팩토리 트레이트
//! - [`mongo_provider`] - MongoDB 기반 프로바이더 어댑터 (bcrypt, 세션 다이제스트)

pub mod auth_gateway;
pub mod provider;
pub mod mongo_provider;

pub use auth_gateway::{AccountGateway, AuthGateway, GatewayPolicy, SignUpState};
pub use provider::{CredentialProvider, ProviderFactory};
pub use mongo_provider::{MongoCredentialProvider, MongoProviderFactory};
