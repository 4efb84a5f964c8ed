//! `Host` header filtering driven by the `allowed_hosts` setting.
//!
//! The setting is a `;`-separated list. `*` allows any host, `*.example.com`
//! allows every subdomain of `example.com` (but not `example.com` itself),
//! anything else must match exactly. Matching ignores case and the port.

use std::sync::Arc;

use axum::extract::Request;
use axum::extract::State;
use axum::http::header::HOST;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedHosts {
    any: bool,
    exact: Vec<String>,
    suffixes: Vec<String>,
}

impl AllowedHosts {
    pub fn parse(value: &str) -> Self {
        let mut hosts = Self::default();
        for entry in value.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            let entry = entry.to_ascii_lowercase();
            if entry == "*" {
                hosts.any = true;
            } else if let Some(domain) = entry.strip_prefix('*') {
                hosts.suffixes.push(domain.to_string());
            } else {
                hosts.exact.push(entry);
            }
        }
        if hosts.exact.is_empty() && hosts.suffixes.is_empty() {
            hosts.any = true;
        }
        hosts
    }

    /// Whether a request carrying `host` may be served. Requests without a
    /// `Host` header are allowed.
    pub fn allows(&self, host: Option<&str>) -> bool {
        if self.any {
            return true;
        }
        let Some(host) = host.map(strip_port).filter(|h| !h.is_empty()) else {
            return true;
        };
        let host = host.to_ascii_lowercase();

        self.exact.iter().any(|allowed| *allowed == host)
            || self
                .suffixes
                .iter()
                .any(|suffix| host.len() > suffix.len() && host.ends_with(suffix.as_str()))
    }
}

fn strip_port(host: &str) -> &str {
    let host = host.trim();
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    match host.rsplit_once(':') {
        Some((name, port)) if !name.contains(':') && port.bytes().all(|b| b.is_ascii_digit()) => {
            name
        }
        _ => host,
    }
}

pub(crate) async fn filter_hosts(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let allowed = match request.headers().get(HOST) {
        None => state.allowed_hosts.allows(None),
        Some(value) => value
            .to_str()
            .is_ok_and(|host| state.allowed_hosts.allows(Some(host))),
    };
    if !allowed {
        tracing::warn!("Rejected request with disallowed Host {:?}", request.headers().get(HOST));
        return ApiError::InvalidHost.into_response();
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn wildcard_allows_everything() {
        let hosts = AllowedHosts::parse("*");
        assert!(hosts.allows(Some("anything.test:1234")));
        assert!(AllowedHosts::parse("").allows(Some("anything.test")));
        assert!(AllowedHosts::parse("example.com;*").allows(Some("other.test")));
    }

    #[test]
    fn exact_hosts_ignore_case_and_port() {
        let hosts = AllowedHosts::parse("localhost; Example.com");
        assert!(hosts.allows(Some("localhost:5000")));
        assert!(hosts.allows(Some("EXAMPLE.com")));
        assert!(!hosts.allows(Some("evil.test")));
        assert!(!hosts.allows(Some("www.example.com")));
    }

    #[test]
    fn subdomain_patterns() {
        let hosts = AllowedHosts::parse("*.example.com");
        assert!(hosts.allows(Some("api.example.com")));
        assert!(hosts.allows(Some("a.b.example.com:8080")));
        assert!(!hosts.allows(Some("example.com")));
        assert!(!hosts.allows(Some("badexample.com")));
    }

    #[test]
    fn missing_host_is_allowed() {
        let hosts = AllowedHosts::parse("example.com");
        assert!(hosts.allows(None));
        assert!(hosts.allows(Some("")));
    }

    #[test]
    fn ports_are_stripped() {
        assert_eq!(strip_port("example.com:80"), "example.com");
        assert_eq!(strip_port("[::1]:5000"), "[::1]");
        assert_eq!(strip_port("[::1]"), "[::1]");
        assert_eq!(strip_port("example.com"), "example.com");
        assert_eq!(strip_port("::1"), "::1");
    }
}
