use std::net::SocketAddr;

use axum::http::HeaderMap;

/// Resolve the client origin used as the rate-limit key.
///
/// Only trust proxy headers when explicitly configured: honoring
/// `X-Forwarded-For` from an untrusted peer lets a caller mint fresh
/// origins per request and walk straight past per-origin limiting.
/// Deployments behind a reverse proxy must set `trust_proxy` AND ensure
/// the proxy strips client-supplied forwarding headers.
pub fn client_origin(headers: &HeaderMap, peer: Option<SocketAddr>, trust_proxy: bool) -> String {
    if trust_proxy {
        // X-Forwarded-For may carry a chain: "client, proxy1, proxy2".
        // The leftmost entry is the original client when the proxy is
        // trusted to have set it.
        if let Some(forwarded) = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.split(',').next().unwrap_or(s).trim().to_owned())
            .filter(|s| !s.is_empty())
        {
            return forwarded;
        }
        if let Some(real_ip) = headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            return real_ip.to_owned();
        }
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_owned())
}
