//! # ruleval predicates
//!
//! Stateless predicates over JSON values. These are the building blocks the
//! `ruleval` validator dispatches to for its built-in rule types, and they are
//! usable on their own.
//!
//! ## Example
//!
//! ```rust
//! use ruleval_predicates::{is_chinese_mobile_phone, is_integer, is_numeric, to_number};
//! use serde_json::json;
//!
//! assert!(is_numeric(&json!("12.5")));
//! assert!(!to_number(&json!("12.5")).map(is_integer).unwrap_or(false));
//! assert!(is_chinese_mobile_phone(&json!("13812345678")));
//! ```
//!
//! ## Predicates
//!
//! - `is_numeric` / `to_number` / `is_integer` - numeric strings and numbers
//! - `is_chinese_phone`, `is_chinese_mobile_phone`, `is_chinese_landline` - phone formats
//! - `is_chinese_id_card` - resident identity card numbers (18 and legacy 15 digits)
//! - `is_url`, `is_email` - URL and email address formats
//! - `is_chinese_name` - personal names written in Han characters
//!
//! [`stringify`] gives the text a pattern is matched against, and
//! [`run_series`] runs async thunks strictly one after another.

mod format;
mod number;
mod series;
mod text;

pub use format::{
    is_chinese_id_card, is_chinese_landline, is_chinese_mobile_phone, is_chinese_name,
    is_chinese_phone, is_email, is_url,
};
pub use number::{is_integer, is_numeric, to_number};
pub use series::{run_series, Thunk};
pub use text::stringify;
