// src/utils/ip.rs

use std::{convert::Infallible, net::SocketAddr};

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{HeaderMap, request::Parts},
};

/// Best-effort client address of a respondent.
///
/// Prefers the first `X-Forwarded-For` hop, then `X-Real-IP`, then the peer
/// address when the server was started with connect info.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RespondentIp(pub Option<String>);

impl<S> FromRequestParts<S> for RespondentIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let from_headers = forwarded_ip(&parts.headers);
        let peer = || {
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        };
        Ok(RespondentIp(from_headers.or_else(peer)))
    }
}

fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };
    header("x-forwarded-for").or_else(|| header("x-real-ip"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Request};

    async fn extract(req: Request<()>) -> RespondentIp {
        let (mut parts, _) = req.into_parts();
        RespondentIp::from_request_parts(&mut parts, &())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn first_forwarded_hop_wins() {
        let req = Request::builder()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .header("x-real-ip", "198.51.100.2")
            .body(())
            .unwrap();
        assert_eq!(extract(req).await, RespondentIp(Some("203.0.113.7".to_string())));
    }

    #[tokio::test]
    async fn falls_back_to_real_ip_then_peer() {
        let req = Request::builder()
            .header("x-real-ip", "198.51.100.2")
            .body(())
            .unwrap();
        assert_eq!(extract(req).await, RespondentIp(Some("198.51.100.2".to_string())));

        let mut req = Request::builder().body(()).unwrap();
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 9], 4000))));
        assert_eq!(extract(req).await, RespondentIp(Some("192.0.2.9".to_string())));
    }

    #[tokio::test]
    async fn unknown_without_headers_or_peer() {
        let mut req = Request::builder().body(()).unwrap();
        req.headers_mut()
            .insert("x-forwarded-for", HeaderValue::from_static(" "));
        assert_eq!(extract(req).await, RespondentIp(None));
    }
}
