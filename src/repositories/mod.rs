//! # Repository Layer
//!
//! 자격 증명 프로바이더 어댑터가 사용하는 MongoDB 데이터 액세스 계층입니다.
//!
//! | 리포지토리 | 컬렉션 | 인덱스 |
//! |-----------|--------|--------|
//! | [`UserRepository`] | `users` | `email` unique |
//! | [`SessionRepository`] | `sessions` | `token_hash` unique, `expires_at` TTL |
//!
//! 드라이버 에러는 `AppError::ConnectionError`로 변환되며,
//! 이메일 중복만 `AppError::ProviderError`로 구분됩니다.

pub mod users;
pub mod sessions;

pub use users::UserRepository;
pub use sessions::SessionRepository;

use mongodb::error::{Error, ErrorKind, WriteFailure};

const DUPLICATE_KEY_CODE: i32 = 11000;

/// unique 인덱스 위반 여부
pub(crate) fn is_duplicate_key(error: &Error) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY_CODE
    )
}
