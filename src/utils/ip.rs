//! IP 地址处理工具
//!
//! 从请求中解析出要查询的目标地址：
//! - 路径长度上限检查（先于任何解析）
//! - `self` / `me` / 空地址回退到调用方地址
//! - X-Real-Ip 反向代理头
//! - 连接地址去端口、去 IPv6 方括号

use std::borrow::Cow;
use std::fmt;
use std::net::IpAddr;

use actix_web::HttpRequest;
use actix_web::http::StatusCode;
use actix_web::http::header::HeaderMap;

/// Longest path that can carry an address.
///
/// IPv4 = 255.255.255.255 (slash + 15 characters)
/// IPv6 = ABCD:ABCD:ABCD:ABCD:ABCD:ABCD:ABCD:ABCD (slash + 39 characters)
/// IPv4-mapped IPv6 = ABCD:ABCD:ABCD:ABCD:ABCD:ABCD:192.168.158.190 (slash + 45 characters)
pub const MAX_PATH_LEN: usize = 46;

/// Header set by the reverse proxy in front of the service
pub const REAL_IP_HEADER: &str = "x-real-ip";

/// Path tokens that mean "look up my own address"
const SELF_TOKENS: [&str; 3] = ["", "self", "me"];

/// 目标地址解析失败
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// 路径超过 `MAX_PATH_LEN`
    PathTooLong(usize),
    /// 候选字符串不是合法的 IPv4/IPv6 地址
    Unparseable(String),
}

impl AddressError {
    pub fn status(&self) -> StatusCode {
        match self {
            AddressError::PathTooLong(_) => StatusCode::FORBIDDEN,
            AddressError::Unparseable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressError::PathTooLong(len) => {
                write!(f, "path length {} exceeds {}", len, MAX_PATH_LEN)
            }
            AddressError::Unparseable(candidate) => {
                write!(f, "\"{}\" is not an IP address", candidate)
            }
        }
    }
}

impl std::error::Error for AddressError {}

/// Remove one `[` and one `]`, then drop the trailing `:port` segment.
///
/// Assumes `host:port` input. A string without any `:` comes back empty,
/// and a bare IPv6 address loses its last group.
pub fn defang_ip(raw: &str) -> String {
    let ip = raw.replacen('[', "", 1).replacen(']', "", 1);
    match ip.rfind(':') {
        Some(pos) => ip[..pos].to_string(),
        None => String::new(),
    }
}

/// First `/`-delimited segment of the path
pub fn extract_candidate(path: &str) -> &str {
    path.split('/').nth(1).unwrap_or("")
}

pub fn is_self_token(candidate: &str) -> bool {
    SELF_TOKENS.contains(&candidate)
}

/// Parse an address and normalise IPv4-mapped IPv6 to plain IPv4
pub fn parse_ip(candidate: &str) -> Option<IpAddr> {
    candidate.parse::<IpAddr>().ok().map(|ip| ip.to_canonical())
}

/// 解析目标地址
///
/// `forwarded` 是 X-Real-Ip 的第一个值，`remote` 是连接的原始地址（带端口）。
/// 代理头不单独校验：坏值和用户输入的坏地址一样得到 422。
pub fn resolve_target_address(
    path: &str,
    forwarded: Option<&str>,
    remote: &str,
) -> Result<IpAddr, AddressError> {
    if path.len() > MAX_PATH_LEN {
        return Err(AddressError::PathTooLong(path.len()));
    }

    let mut candidate: Cow<'_, str> = Cow::Borrowed(extract_candidate(path));

    if is_self_token(&candidate) {
        candidate = match forwarded.filter(|f| !f.is_empty()) {
            Some(real_ip) => Cow::Borrowed(real_ip),
            None => Cow::Owned(defang_ip(remote)),
        };
    }

    parse_ip(&candidate).ok_or_else(|| AddressError::Unparseable(candidate.into_owned()))
}

/// 从 HeaderMap 提取 X-Real-Ip（第一个值，非 UTF-8 字节按有损方式转换）
pub fn extract_forwarded_ip_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REAL_IP_HEADER)
        .map(|h| String::from_utf8_lossy(h.as_bytes()).into_owned())
        .filter(|s| !s.is_empty())
}

/// Transport peer address as `host:port`, empty when unknown
pub fn peer_addr_string(req: &HttpRequest) -> String {
    req.peer_addr().map(|a| a.to_string()).unwrap_or_default()
}

/// Percent-decoded request path; falls back to the raw path on invalid UTF-8
pub fn decoded_path(req: &HttpRequest) -> Cow<'_, str> {
    urlencoding::decode(req.path()).unwrap_or(Cow::Borrowed(req.path()))
}
