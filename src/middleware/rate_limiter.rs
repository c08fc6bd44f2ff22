use std::sync::Arc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use std::time::{Duration, Instant};
use axum::{
    middleware::Next,
    response::{IntoResponse, Response},
    extract::{Request, State},
    http::StatusCode,
};
use crate::utils::api_response::ResponseBuilder;
use crate::config::AppState;

/// Sliding-window request counter keyed by client identifier.
pub struct RateLimiter {
    requests: Arc<RwLock<HashMap<String, Vec<Instant>>>>,
    max_requests: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
            max_requests,
            window,
        }
    }

    pub async fn check_rate_limit(&self, identifier: &str) -> bool {
        let mut requests = self.requests.write().await;
        let now = Instant::now();
        let cutoff = now.checked_sub(self.window).unwrap_or(now);

        // Drop idle clients so the map does not grow without bound
        requests.retain(|_, hits| hits.last().is_some_and(|t| *t > cutoff));

        let entry = requests.entry(identifier.to_string()).or_default();
        entry.retain(|&timestamp| timestamp > cutoff);

        if entry.len() >= self.max_requests {
            return false;
        }

        entry.push(now);
        true
    }
}

pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    // First hop of X-Forwarded-For, "unknown" when absent
    let identifier = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.split(',').next().unwrap_or(s).trim())
        .unwrap_or("unknown")
        .to_string();

    if !state.rate_limiter.check_rate_limit(&identifier).await {
        tracing::warn!(client = %identifier, "rate limit exceeded");
        return ResponseBuilder::error::<()>(
            StatusCode::TOO_MANY_REQUESTS,
            "RATE_LIMIT_EXCEEDED",
            "Too many requests. Please try again later.",
        ).into_response();
    }

    next.run(request).await
}
