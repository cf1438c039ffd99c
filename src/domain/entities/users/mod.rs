//! Users Entity Module
//!
//! 이메일/비밀번호로 가입한 사용자 엔티티를 정의합니다.
//!
//! ```rust,ignore
//! use crate::domain::entities::users::User;
//!
//! let user = User::new_local(
//!     "user@example.com".to_string(),
//!     "Display Name".to_string(),
//!     hashed_password,
//! );
//! ```

pub mod user;

pub use user::User;
