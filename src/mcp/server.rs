//! Stdio JSON-RPC server exposing the `search_file` tool.
//!
//! Reads one request per line from stdin and writes one response per line to
//! stdout. All logging goes to stderr; stdout carries only the protocol.

use anyhow::Result;
use serde::Deserialize;
use serde_json::{json, Value};
use std::io::{self, BufRead, Write};

use crate::core::format::{format_error, format_matches};
use crate::core::search;

use super::protocol::*;

pub const SEARCH_FILE_TOOL_NAME: &str = "search_file";

/// Arguments for a `search_file` call. Validation failures here are protocol
/// errors (-32602) and never reach the searcher.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct SearchFileArgs {
    keyword: String,
    file_path: String,
    #[serde(default)]
    case_sensitive: bool,
}

pub struct McpServer;

impl McpServer {
    pub fn new() -> Self {
        Self
    }

    /// Run the server until stdin closes. Blocking, one request at a time.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        tracing::info!("file-search-mcp server running on stdio");

        for line in stdin.lock().lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }

            let request: JsonRpcRequest = match serde_json::from_str(&line) {
                Ok(req) => req,
                Err(e) => {
                    tracing::warn!(error = %e, "dropping unparseable request line");
                    let response = JsonRpcResponse::error(
                        None,
                        error_codes::PARSE_ERROR,
                        format!("Parse error: {}", e),
                    );
                    self.write_response(&mut stdout, &response)?;
                    continue;
                }
            };

            if let Some(response) = self.handle_request(request) {
                self.write_response(&mut stdout, &response)?;
            }
        }

        Ok(())
    }

    fn write_response(&self, stdout: &mut io::Stdout, response: &JsonRpcResponse) -> Result<()> {
        let json = serde_json::to_string(response)?;
        writeln!(stdout, "{}", json)?;
        stdout.flush()?;
        Ok(())
    }

    /// Dispatch one request. Returns `None` for notifications, which get no
    /// response line.
    fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        tracing::debug!(method = %request.method, "handling request");

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id),
            "initialized" | "notifications/initialized" => {
                return None;
            }
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params),
            _ => {
                if request.is_notification() {
                    return None;
                }
                JsonRpcResponse::error(
                    request.id,
                    error_codes::METHOD_NOT_FOUND,
                    format!("Method not found: {}", request.method),
                )
            }
        };

        Some(response)
    }

    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: "file-search-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        JsonRpcResponse::success(id, serde_json::to_value(result).unwrap())
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let tools = vec![ToolDefinition {
            name: SEARCH_FILE_TOOL_NAME.to_string(),
            description:
                "Search for a keyword in a specified file and return matching lines with line numbers"
                    .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "keyword": {
                        "type": "string",
                        "description": "The keyword to search for in the file"
                    },
                    "filePath": {
                        "type": "string",
                        "description": "Path to the file to search in"
                    },
                    "caseSensitive": {
                        "type": "boolean",
                        "description": "Whether the search should be case-sensitive (default: false)",
                        "default": false
                    }
                },
                "required": ["keyword", "filePath"]
            }),
        }];

        JsonRpcResponse::success(id, serde_json::to_value(ToolsListResult { tools }).unwrap())
    }

    fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params = match params {
            Some(p) => p,
            None => {
                return JsonRpcResponse::error(id, error_codes::INVALID_PARAMS, "Missing params");
            }
        };

        let call: ToolCallParams = match serde_json::from_value(params) {
            Ok(c) => c,
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid params: {}", e),
                );
            }
        };

        if call.name != SEARCH_FILE_TOOL_NAME {
            return JsonRpcResponse::error(
                id,
                error_codes::INVALID_PARAMS,
                format!("Unknown tool: {}", call.name),
            );
        }

        let args: SearchFileArgs =
            match serde_json::from_value(call.arguments.unwrap_or_else(|| json!({}))) {
                Ok(a) => a,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        error_codes::INVALID_PARAMS,
                        format!("Invalid arguments for {}: {}", SEARCH_FILE_TOOL_NAME, e),
                    );
                }
            };

        if args.keyword.is_empty() {
            return JsonRpcResponse::error(
                id,
                error_codes::INVALID_PARAMS,
                "Invalid arguments for search_file: keyword must not be empty",
            );
        }

        let result = self.execute_search_file(&args);
        JsonRpcResponse::success(id, serde_json::to_value(result).unwrap())
    }

    /// Run one search and fold either outcome into the tool result envelope.
    /// Search failures become `isError` text results, never protocol faults.
    fn execute_search_file(&self, args: &SearchFileArgs) -> ToolCallResult {
        let formatted = match search::search(&args.file_path, &args.keyword, args.case_sensitive) {
            Ok(matches) => {
                tracing::debug!(
                    path = %args.file_path,
                    matches = matches.len(),
                    "search completed"
                );
                format_matches(&args.keyword, &args.file_path, &matches)
            }
            Err(e) => {
                tracing::debug!(path = %args.file_path, error = %e, "search failed");
                format_error(&e)
            }
        };

        ToolCallResult::text(formatted.text, formatted.is_error)
    }
}

impl Default for McpServer {
    fn default() -> Self {
        Self::new()
    }
}
