use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::{debug, trace};

use crate::api::constants::{JSON_CONTENT_TYPE, TEXT_CONTENT_TYPE};
use crate::api::encoding::{EncodeOptions, encode_to_vec};
use crate::api::observer::RequestObserver;
use crate::services::LookupService;
use crate::utils::ip::{
    decoded_path, extract_forwarded_ip_from_headers, peer_addr_string, resolve_target_address,
};

pub struct LookupHandler;

impl LookupHandler {
    /// 所有方法、所有路径都进入这里
    pub async fn handle_lookup(
        req: HttpRequest,
        service: web::Data<Arc<LookupService>>,
    ) -> HttpResponse {
        let mut observer = RequestObserver::begin(&req, service.metrics());
        let response = Self::process_lookup(&req, &service, &mut observer);
        observer.finish(response)
    }

    fn process_lookup(
        req: &HttpRequest,
        service: &LookupService,
        observer: &mut RequestObserver,
    ) -> HttpResponse {
        let path = decoded_path(req);
        let forwarded = extract_forwarded_ip_from_headers(req.headers());
        let remote = peer_addr_string(req);

        let ip = match resolve_target_address(&path, forwarded.as_deref(), &remote) {
            Ok(ip) => ip,
            Err(e) => {
                debug!("Rejected lookup target: {}", e);
                return Self::error_response(e.status());
            }
        };
        observer.set_ip(ip);
        trace!("Resolved lookup target: {}", ip);

        let result = service.lookup(ip);

        let options = EncodeOptions::from_query(req.query_string());
        let (body, written) = encode_to_vec(&result, &options);
        if let Err(e) = written {
            // 已写出的部分照常发送
            debug!("Lookup response truncated: {}", e);
        }

        HttpResponse::Ok()
            .insert_header(("Content-Type", JSON_CONTENT_TYPE))
            .body(body)
    }

    #[inline]
    fn error_response(status: StatusCode) -> HttpResponse {
        let reason = status.canonical_reason().unwrap_or("Error");

        HttpResponse::build(status)
            .insert_header(("Content-Type", TEXT_CONTENT_TYPE))
            .insert_header(("X-Content-Type-Options", "nosniff"))
            .body(format!("{}\n", reason))
    }
}

/// 查询路由：捕获所有剩余路径，不区分方法
pub fn lookup_routes() -> actix_web::Scope {
    web::scope("").route("/{tail:.*}", web::route().to(LookupHandler::handle_lookup))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_bodies() {
        let response = LookupHandler::error_response(StatusCode::FORBIDDEN);
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            response.headers().get("X-Content-Type-Options").unwrap(),
            "nosniff"
        );
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            TEXT_CONTENT_TYPE
        );

        let response = LookupHandler::error_response(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
