//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, 정리 유틸리티
//! - [`display_terminal`] - 터미널 출력 포맷팅 함수들
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::string_utils::clean_optional_string;
//! use crate::utils::display_terminal::print_boxed_title;
//!
//! let uri = clean_optional_string(std::env::var("MONGODB_URI").ok());
//! print_boxed_title("Account Service");
//! ```

pub mod string_utils;
pub mod display_terminal;
