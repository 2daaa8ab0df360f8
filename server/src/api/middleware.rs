//! HTTP middleware (CORS, fallback handler)

use axum::extract::Request;
use axum::http::{HeaderValue, Method, header};
use axum::response::IntoResponse;
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::types::ApiError;
use crate::core::config::is_all_interfaces;

/// Loopback names the console may be opened under
const LOOPBACK_HOSTS: [&str; 2] = ["localhost", "127.0.0.1"];

/// Browser origins allowed to call the API
#[derive(Debug, Clone)]
pub struct AllowedOrigins {
    origins: Vec<String>,
}

impl AllowedOrigins {
    /// Build the origin list for a server bound to `host:port`.
    ///
    /// A loopback or wildcard bind accepts both loopback spellings; a wildcard
    /// bind additionally accepts every non-loopback IPv4 address of this machine.
    pub fn new(host: &str, port: u16) -> Self {
        let wildcard = is_all_interfaces(host);
        let hosts: Vec<String> = if wildcard || LOOPBACK_HOSTS.contains(&host) {
            LOOPBACK_HOSTS.iter().map(|h| h.to_string()).collect()
        } else {
            vec![host.to_string()]
        };

        let mut origins: Vec<String> = hosts
            .iter()
            .map(|h| format!("http://{}:{}", h, port))
            .collect();

        if wildcard && let Ok(interfaces) = local_ip_address::list_afinet_netifas() {
            origins.extend(
                interfaces
                    .into_iter()
                    .filter(|(_, ip)| ip.is_ipv4() && !ip.is_loopback())
                    .map(|(_, ip)| format!("http://{}:{}", ip, port)),
            );
        }

        origins.dedup();
        Self { origins }
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        self.origins.iter().any(|o| o == origin)
    }

    fn header_values(&self) -> Vec<HeaderValue> {
        self.origins.iter().filter_map(|o| o.parse().ok()).collect()
    }
}

/// CORS layer for the console API (read and codec calls only)
pub fn cors(allowed: &AllowedOrigins) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed.header_values()))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
}

/// Fallback for unknown routes
pub async fn handle_404(req: Request) -> impl IntoResponse {
    tracing::debug!(method = %req.method(), uri = %req.uri(), "[404] No route");
    ApiError::not_found(
        "NOT_FOUND",
        format!("No route for {} {}", req.method(), req.uri().path()),
    )
}
