//! API 模块常量定义
//!
//! 响应头、JSONP 限制和状态占位值。

use actix_web::http::StatusCode;

/// 查询成功时的 Content-Type
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// 错误响应的 Content-Type
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// JSONP callback 名称长度上限（不含）
pub const MAX_CALLBACK_LEN: usize = 2000;

/// JSONP callback 允许的字符
pub const CALLBACK_PATTERN: &str = r"^[a-zA-Z_\$][a-zA-Z0-9_\$]*$";

/// Status recorded until a response is produced; seeing it in logs means a
/// request ended without one.
pub const STATUS_PLACEHOLDER: StatusCode = StatusCode::IM_A_TEAPOT;
