//! Per-request instrumentation
//!
//! `RequestObserver` is created when the handler starts and records the
//! request when it goes out of scope, whichever way the handler exits.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use tracing::{error, info};

use super::constants::STATUS_PLACEHOLDER;
use crate::metrics_core::MetricsRecorder;
use crate::utils::ip::{defang_ip, peer_addr_string};

/// Drop guard recording duration, status and a structured log line
pub struct RequestObserver {
    start: Instant,
    method: String,
    url: String,
    remote: String,
    ip: Option<IpAddr>,
    status: StatusCode,
    metrics: Arc<dyn MetricsRecorder>,
}

impl RequestObserver {
    pub fn begin(req: &HttpRequest, metrics: Arc<dyn MetricsRecorder>) -> Self {
        Self {
            start: Instant::now(),
            method: req.method().to_string(),
            url: req.path().to_string(),
            remote: defang_ip(&peer_addr_string(req)),
            ip: None,
            status: STATUS_PLACEHOLDER,
            metrics,
        }
    }

    pub fn set_ip(&mut self, ip: IpAddr) {
        self.ip = Some(ip);
    }

    /// Capture the final status and pass the response through
    pub fn finish(&mut self, response: HttpResponse) -> HttpResponse {
        self.status = response.status();
        response
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl Drop for RequestObserver {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64() * 1000.0;
        self.metrics
            .observe_lookup_duration(self.status.as_str(), duration);

        let ipaddress = self.ip.map(|ip| ip.to_string()).unwrap_or_default();

        if self.status == STATUS_PLACEHOLDER {
            // handler 没有走到任何出口
            error!(
                duration,
                ipaddress = %ipaddress,
                method = %self.method,
                remote = %self.remote,
                url = %self.url,
                status = self.status.as_u16(),
                "Request finished without a response status"
            );
        } else {
            info!(
                duration,
                ipaddress = %ipaddress,
                method = %self.method,
                remote = %self.remote,
                url = %self.url,
                status = self.status.as_u16(),
                "Lookup request"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorded {
        observations: Mutex<Vec<(String, f64)>>,
    }

    impl MetricsRecorder for Recorded {
        fn observe_lookup_duration(&self, status: &str, duration_ms: f64) {
            self.observations
                .lock()
                .unwrap()
                .push((status.to_string(), duration_ms));
        }
    }

    #[test]
    fn test_records_final_status_on_drop() {
        let metrics = Arc::new(Recorded::default());
        let req = TestRequest::default()
            .uri("/8.8.8.8")
            .peer_addr("198.51.100.7:5000".parse().unwrap())
            .to_http_request();

        {
            let mut observer = RequestObserver::begin(&req, metrics.clone());
            assert_eq!(observer.remote, "198.51.100.7");
            observer.set_ip("8.8.8.8".parse().unwrap());
            let response = observer.finish(HttpResponse::Ok().finish());
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(observer.status(), StatusCode::OK);
        }

        let observations = metrics.observations.lock().unwrap();
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].0, "200");
        assert!(observations[0].1 >= 0.0);
    }

    #[test]
    fn test_placeholder_status_when_never_finished() {
        let metrics = Arc::new(Recorded::default());
        let req = TestRequest::default().to_http_request();

        drop(RequestObserver::begin(&req, metrics.clone()));

        let observations = metrics.observations.lock().unwrap();
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].0, "418");
    }
}
