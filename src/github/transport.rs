//! Ways of delivering one GraphQL request to GitHub.

use crate::error::{RadarError, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::process::Command;
use tracing::debug;

pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";
const USER_AGENT: &str = concat!("activity-radar/", env!("CARGO_PKG_VERSION"));

/// Executes a GraphQL query and returns the raw response body.
#[async_trait]
pub trait GraphQlTransport: Send + Sync {
    async fn execute(&self, query: &str, variables: &Value) -> Result<String>;
}

/// Direct HTTPS POST against the GraphQL endpoint.
pub struct HttpTransport {
    client: reqwest::Client,
    token: String,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(token: String, endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            endpoint,
        }
    }

    /// Replace the default HTTP client (timeouts, proxies)
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl GraphQlTransport for HttpTransport {
    async fn execute(&self, query: &str, variables: &Value) -> Result<String> {
        let body = json!({
            "query": query,
            "variables": variables,
        });

        debug!("POST {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| RadarError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RadarError::Transport(format!("failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(RadarError::Remote(format!(
                "HTTP {}: {}",
                status,
                error_detail(&text)
            )));
        }

        Ok(text)
    }
}

/// Delegates to `gh api graphql`, passing the token through `GH_TOKEN`.
pub struct GhCliTransport {
    token: String,
    program: String,
}

impl GhCliTransport {
    pub fn new(token: String) -> Self {
        Self {
            token,
            program: "gh".to_string(),
        }
    }

    /// Use a different executable in place of `gh`
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn arguments(query: &str, variables: &Value) -> Vec<String> {
        let mut args = vec![
            "api".to_string(),
            "graphql".to_string(),
            "-f".to_string(),
            format!("query={}", query),
        ];
        if let Some(map) = variables.as_object() {
            for (key, value) in map {
                let rendered = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                args.push("-f".to_string());
                args.push(format!("{}={}", key, rendered));
            }
        }
        args
    }
}

#[async_trait]
impl GraphQlTransport for GhCliTransport {
    async fn execute(&self, query: &str, variables: &Value) -> Result<String> {
        debug!("Running {} api graphql", self.program);
        let output = Command::new(&self.program)
            .args(Self::arguments(query, variables))
            .env("GH_TOKEN", &self.token)
            .output()
            .await
            .map_err(|e| RadarError::Transport(format!("could not run {}: {}", self.program, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(RadarError::Transport(detail));
        }

        Ok(stdout)
    }
}

/// Prefer GitHub's `message` field over the raw body
fn error_detail(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a local port and return its URL
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 4096];
            while !request_complete(&request) {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
            }

            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}/graphql", addr)
    }

    fn local_transport(token: &str, url: String) -> HttpTransport {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        HttpTransport::new(token.to_string(), url).with_client(client)
    }

    /// Headers received and the whole body announced by Content-Length
    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                line.to_ascii_lowercase()
                    .strip_prefix("content-length:")
                    .and_then(|v| v.trim().parse::<usize>().ok())
            })
            .unwrap_or(0);
        request.len() >= header_end + 4 + content_length
    }

    #[tokio::test]
    async fn test_http_transport_returns_body_on_success() {
        let url = serve_once("HTTP/1.1 200 OK", r#"{"data":{"viewer":{"login":"octocat"}}}"#).await;
        let transport = local_transport("token", url);

        let body = transport.execute("query { viewer { login } }", &json!({})).await.unwrap();
        assert_eq!(body, r#"{"data":{"viewer":{"login":"octocat"}}}"#);
    }

    #[tokio::test]
    async fn test_http_transport_error_status_is_remote_error() {
        let url = serve_once("HTTP/1.1 401 Unauthorized", r#"{"message":"Bad credentials"}"#).await;
        let transport = local_transport("bad-token", url);

        match transport.execute("query { viewer { login } }", &json!({})).await {
            Err(RadarError::Remote(msg)) => {
                assert!(msg.contains("401"));
                assert!(msg.contains("Bad credentials"));
            }
            other => panic!("expected remote error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_http_transport_unreachable_endpoint_is_transport_error() {
        let transport = local_transport("token", "http://127.0.0.1:1/graphql".to_string());
        let result = transport.execute("query { viewer { login } }", &json!({})).await;

        assert!(matches!(result, Err(RadarError::Transport(_))));
    }

    #[test]
    fn test_gh_arguments_carry_query_and_variables() {
        let vars = json!({"login": "octocat", "prsQuery": "author:octocat is:pr"});
        let args = GhCliTransport::arguments("query { viewer { login } }", &vars);

        assert_eq!(&args[..3], &["api", "graphql", "-f"]);
        assert_eq!(args[3], "query=query { viewer { login } }");
        assert!(args.contains(&"login=octocat".to_string()));
        assert!(args.contains(&"prsQuery=author:octocat is:pr".to_string()));
        assert_eq!(args.iter().filter(|a| *a == "-f").count(), 3);
    }

    #[test]
    fn test_error_detail_prefers_message() {
        assert_eq!(
            error_detail(r#"{"message": "Bad credentials", "documentation_url": "x"}"#),
            "Bad credentials"
        );
        assert_eq!(error_detail("  upstream timeout \n"), "upstream timeout");
    }

    #[tokio::test]
    async fn test_gh_transport_reports_missing_program() {
        let transport = GhCliTransport::new("token".to_string())
            .with_program("activity-radar-no-such-binary");
        let result = transport.execute("query { viewer { login } }", &json!({})).await;

        assert!(matches!(result, Err(RadarError::Transport(_))));
    }
}
