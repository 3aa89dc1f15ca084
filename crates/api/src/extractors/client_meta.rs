//! Requester metadata extractor for audit entries.

use axum::{async_trait, extract::FromRequestParts, http::header, http::request::Parts};
use std::convert::Infallible;

/// Client IP and user agent, taken from request headers.
///
/// The IP comes from `X-Forwarded-For` (first hop) or `X-Real-IP`; behind
/// no proxy both may be absent. Extraction never fails, audit entries
/// simply carry nulls.
#[derive(Debug, Clone, Default)]
pub struct ClientMeta {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientMeta
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ip = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .or_else(|| {
                parts
                    .headers
                    .get("x-real-ip")
                    .and_then(|v| v.to_str().ok())
                    .map(|s| s.to_string())
            });

        let user_agent = parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        Ok(ClientMeta { ip, user_agent })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(req: Request<()>) -> ClientMeta {
        let (mut parts, _) = req.into_parts();
        ClientMeta::from_request_parts(&mut parts, &())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_forwarded_for_first_hop_wins() {
        let req = Request::builder()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .header("x-real-ip", "10.0.0.2")
            .body(())
            .unwrap();
        let meta = extract(req).await;
        assert_eq!(meta.ip.as_deref(), Some("203.0.113.7"));
    }

    #[tokio::test]
    async fn test_real_ip_fallback() {
        let req = Request::builder()
            .header("x-real-ip", "10.0.0.2")
            .body(())
            .unwrap();
        let meta = extract(req).await;
        assert_eq!(meta.ip.as_deref(), Some("10.0.0.2"));
    }

    #[tokio::test]
    async fn test_no_headers_yields_nulls() {
        let req = Request::builder().body(()).unwrap();
        let meta = extract(req).await;
        assert!(meta.ip.is_none());
        assert!(meta.user_agent.is_none());
    }

    #[tokio::test]
    async fn test_user_agent_captured() {
        let req = Request::builder()
            .header("user-agent", "curl/8.5.0")
            .body(())
            .unwrap();
        let meta = extract(req).await;
        assert_eq!(meta.user_agent.as_deref(), Some("curl/8.5.0"));
    }
}
