//! 영속 엔티티
//!
//! - [`users`] - `users` 컬렉션 (이메일 unique)
//! - [`sessions`] - `sessions` 컬렉션 (토큰 다이제스트 unique, 만료 TTL)

pub mod users;
pub mod sessions;

pub use users::User;
pub use sessions::SessionRecord;
