use crate::{Error, Result};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};

const PROTOCOL_VERSION: &str = "2025-03-26";
const SESSION_HEADER: &str = "Mcp-Session-Id";

/// One callable tool advertised by the tool-serving endpoint. The
/// schema arrives from the server and is kept opaque; discovery is the
/// only interaction the session performs.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub input_schema: Value,
}

#[derive(Deserialize)]
struct ToolsListResult {
    tools: Vec<ToolDescriptor>,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

/// Client for the MCP streamable-HTTP endpoint. `connect` performs the
/// initialize handshake; `tools` fetches the advertised tool list.
pub struct ToolRegistry {
    client: reqwest::Client,
    url: String,
    session_id: Option<String>,
    next_id: u64,
}

impl ToolRegistry {
    pub async fn connect(url: &str) -> Result<Self> {
        let mut registry = Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
            session_id: None,
            next_id: 1,
        };

        registry
            .request(
                "initialize",
                json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": {},
                    "clientInfo": {
                        "name": env!("CARGO_PKG_NAME"),
                        "version": env!("CARGO_PKG_VERSION"),
                    },
                }),
            )
            .await?;

        registry.notify("notifications/initialized").await?;

        info!(url = %registry.url, "connected to tool endpoint");

        Ok(registry)
    }

    pub async fn tools(&mut self) -> Result<Vec<ToolDescriptor>> {
        let result = self.request("tools/list", json!({})).await?;
        let listing: ToolsListResult = serde_json::from_value(result)?;

        debug!(count = listing.tools.len(), "discovered tools");

        Ok(listing.tools)
    }

    async fn post(&self, body: Value) -> Result<reqwest::Response> {
        let mut request = self
            .client
            .post(&self.url)
            .header("Accept", "application/json, text/event-stream")
            .json(&body);

        if let Some(session_id) = &self.session_id {
            request = request.header(SESSION_HEADER, session_id);
        }

        Ok(request.send().await?.error_for_status()?)
    }

    async fn request(&mut self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id;
        self.next_id += 1;

        let response = self
            .post(json!({
                "jsonrpc": "2.0",
                "id": id,
                "method": method,
                "params": params,
            }))
            .await?;

        if let Some(session_id) = response
            .headers()
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
        {
            self.session_id = Some(session_id.to_string());
        }

        let content_type = response
            .headers()
            .get("Content-Type")
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = response.text().await?;
        let message = decode_body(&content_type, &body)?;

        let parsed: RpcResponse = serde_json::from_value(message)?;
        if let Some(error) = parsed.error {
            return Err(Error::ToolRegistryError(format!(
                "{} failed: {}",
                method, error
            )));
        }

        parsed.result.ok_or(Error::ToolRegistryError(format!(
            "{} returned no result",
            method
        )))
    }

    async fn notify(&mut self, method: &str) -> Result<()> {
        self.post(json!({
            "jsonrpc": "2.0",
            "method": method,
        }))
        .await?;
        Ok(())
    }
}

// A streamable-HTTP endpoint may answer a POST with plain JSON or with
// a one-event SSE stream wrapping the JSON message.
fn decode_body(content_type: &str, body: &str) -> Result<Value> {
    if content_type.starts_with("text/event-stream") {
        let data = body
            .lines()
            .find_map(|line| line.strip_prefix("data:"))
            .ok_or(Error::ToolRegistryError(
                "event stream contained no data".to_string(),
            ))?;
        return Ok(serde_json::from_str(data.trim())?);
    }

    Ok(serde_json::from_str(body)?)
}
