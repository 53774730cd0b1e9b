//! Converter MCP Server
//!
//! Line-delimited JSON-RPC over stdin/stdout. Logs go to stderr.
//!
//! Tools:
//! - list_categories: Categories with their base unit and highlight colour
//! - list_units: Unit display names for a category
//! - unit_symbol: Symbol of a unit display name
//! - convert: Convert a value between two units of a category

mod config;
mod display;
mod protocol;

use std::io::{self, BufRead, Write};

use converter_core::{list_units, symbol_of, ConversionRequest, UnitCategory};
use serde_json::{json, Value as JsonValue};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use config::{ServerConfig, MAX_DECIMALS};
use display::{category_color, default_selection, format_info, format_result, parse_value};
use protocol::{McpError, McpRequest, McpResponse};

const PROTOCOL_VERSION: &str = "2025-11-25";
const SERVER_NAME: &str = "converter";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let config = ServerConfig::from_env();
    info!(version = SERVER_VERSION, protocol = PROTOCOL_VERSION, "Converter MCP Server started");
    info!(result_decimals = config.result_decimals, "Configuration loaded");

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = serve(&config, stdin.lock(), stdout.lock()) {
        warn!(error = %e, "I/O error, stopping");
    }

    info!("Server shutting down");
}

/// Answer requests line by line until EOF
fn serve<R: BufRead, W: Write>(config: &ServerConfig, mut reader: R, mut writer: W) -> io::Result<()> {
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            info!("Client disconnected (EOF)");
            return Ok(());
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let message: JsonValue = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "Error parsing request");
                write_response(&mut writer, &McpResponse::error(None, McpError::parse_error(e)))?;
                continue;
            }
        };

        let request = match parse_request(message) {
            Ok(r) => r,
            Err((id, e)) => {
                warn!(reason = %e.message, "Invalid request");
                write_response(&mut writer, &McpResponse::error(id, e))?;
                continue;
            }
        };

        debug!(method = %request.method, "Processing");
        let response = handle_request(config, &request);

        if request.is_notification() {
            debug!(method = %request.method, "Notification processed (no response)");
            continue;
        }

        write_response(&mut writer, &response)?;
    }
}

/// Check that well-formed JSON is a JSON-RPC 2.0 request
fn parse_request(message: JsonValue) -> Result<McpRequest, (Option<JsonValue>, McpError)> {
    let id = message.get("id").cloned();
    let request: McpRequest = serde_json::from_value(message)
        .map_err(|e| (id.clone(), McpError::invalid_request(e)))?;

    if request.jsonrpc != protocol::JSONRPC_VERSION {
        let e = McpError::invalid_request(format!("unsupported jsonrpc version '{}'", request.jsonrpc));
        return Err((id, e));
    }
    Ok(request)
}

fn write_response<W: Write>(writer: &mut W, response: &McpResponse) -> io::Result<()> {
    serde_json::to_writer(&mut *writer, response)?;
    writeln!(writer)?;
    writer.flush()
}

fn handle_request(config: &ServerConfig, request: &McpRequest) -> McpResponse {
    let result = match request.method.as_str() {
        // Lifecycle
        "initialize" => handle_initialize(&request.params),
        "initialized" | "notifications/initialized" => Ok(json!({})),
        "ping" => Ok(json!({})),

        // Tools
        "tools/list" => handle_tools_list(),
        "tools/call" => handle_tool_call(config, &request.params),

        _ => Err(McpError::method_not_found(&request.method)),
    };

    if let Err(e) = &result {
        warn!(method = %request.method, code = e.code, reason = %e.message, "Request rejected");
    }

    McpResponse::from_result(request.id.clone(), result)
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params.as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Use client's protocol version for compatibility
    let client_protocol = params.as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!(client = client_info, protocol = client_protocol, "Client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Length, mass and temperature unit conversion"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": "Units are named by display name, e.g. \"Meters (m)\". Use list_units to discover the names for a category before calling convert."
    }))
}

fn handle_tools_list() -> Result<JsonValue, McpError> {
    let categories: Vec<&str> = UnitCategory::ALL.iter().map(|c| c.label()).collect();

    Ok(json!({
        "tools": [
            {
                "name": "list_categories",
                "description": "List unit categories with their base unit and display colour.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            },
            {
                "name": "list_units",
                "description": "List unit display names for a category. Unknown categories return an empty list.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Category label",
                            "enum": categories
                        }
                    },
                    "required": ["category"]
                }
            },
            {
                "name": "unit_symbol",
                "description": "Extract the symbol from a unit display name, e.g. \"Meters (m)\" -> \"m\".",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "name": {
                            "type": "string",
                            "description": "Unit display name"
                        }
                    },
                    "required": ["name"]
                }
            },
            {
                "name": "convert",
                "description": "Convert a value between two units of the same category.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "value": {
                            "type": ["number", "string"],
                            "description": "Value to convert. Strings accept ',' or '.' as decimal separator"
                        },
                        "from_unit": {
                            "type": "string",
                            "description": "Source unit display name"
                        },
                        "to_unit": {
                            "type": "string",
                            "description": "Target unit display name"
                        },
                        "category": {
                            "type": "string",
                            "description": "Category label",
                            "enum": categories
                        },
                        "decimals": {
                            "type": "integer",
                            "description": "Decimals in the formatted result",
                            "minimum": 0,
                            "maximum": MAX_DECIMALS
                        }
                    },
                    "required": ["value", "from_unit", "to_unit", "category"]
                }
            }
        ]
    }))
}

fn handle_tool_call(config: &ServerConfig, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let params = params.as_ref().ok_or_else(|| McpError::invalid_params("Missing params"))?;

    let name = params.get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

    let args = params.get("arguments").cloned().unwrap_or(json!({}));

    match name {
        "list_categories" => tool_list_categories(),
        "list_units" => tool_list_units(args),
        "unit_symbol" => tool_unit_symbol(args),
        "convert" => tool_convert(config, args),
        _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))
            .with_data(json!({ "available": ["list_categories", "list_units", "unit_symbol", "convert"] }))),
    }
}

fn required_str<'a>(args: &'a JsonValue, field: &str) -> Result<&'a str, McpError> {
    args.get(field)
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params(format!("Missing {} argument", field)))
}

/// Tool-level failure: reported inside a successful response
fn tool_error(code: &str, message: String) -> JsonValue {
    json!({
        "content": [{ "type": "text", "text": message }],
        "error": { "code": code, "message": message },
        "isError": true
    })
}

fn tool_list_categories() -> Result<JsonValue, McpError> {
    let data: Vec<JsonValue> = UnitCategory::ALL.iter().map(|c| json!({
        "name": c.label(),
        "base_unit": c.base_unit(),
        "color": category_color(*c),
        "linear": c.is_linear()
    })).collect();

    let text = UnitCategory::ALL.iter().map(|c| c.label()).collect::<Vec<_>>().join(", ");

    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "data": data
    }))
}

fn tool_list_units(args: JsonValue) -> Result<JsonValue, McpError> {
    let category = required_str(&args, "category")?;
    let units = list_units(category);

    let data: Vec<JsonValue> = units.iter()
        .map(|u| json!({ "name": u, "symbol": symbol_of(u) }))
        .collect();

    let selection = default_selection(&units)
        .map(|(from, to)| json!({ "from_unit": from, "to_unit": to }));

    Ok(json!({
        "content": [{ "type": "text", "text": units.join("\n") }],
        "data": data,
        "default_selection": selection
    }))
}

fn tool_unit_symbol(args: JsonValue) -> Result<JsonValue, McpError> {
    let name = required_str(&args, "name")?;
    let symbol = symbol_of(name);

    Ok(json!({
        "content": [{ "type": "text", "text": symbol }],
        "symbol": symbol
    }))
}

fn tool_convert(config: &ServerConfig, args: JsonValue) -> Result<JsonValue, McpError> {
    let from_unit = required_str(&args, "from_unit")?;
    let to_unit = required_str(&args, "to_unit")?;
    let category_label = required_str(&args, "category")?;

    let decimals = match args.get("decimals") {
        None | Some(JsonValue::Null) => config.result_decimals,
        Some(v) => v.as_u64()
            .filter(|n| *n <= MAX_DECIMALS as u64)
            .map(|n| n as usize)
            .ok_or_else(|| McpError::invalid_params(
                format!("decimals must be an integer between 0 and {}", MAX_DECIMALS)))?,
    };

    let value = match args.get("value") {
        Some(JsonValue::Number(n)) => n.as_f64(),
        Some(JsonValue::String(s)) => match parse_value(s) {
            Ok(v) => Some(v),
            Err(e) => return Ok(tool_error("INVALID_INPUT", e.to_string())),
        },
        _ => None,
    };
    let value = value.ok_or_else(|| McpError::invalid_params("Missing value argument"))?;

    let category: UnitCategory = match category_label.parse() {
        Ok(c) => c,
        Err(e) => return Ok(tool_error(e.code(), e.to_string())),
    };

    let outcome = match ConversionRequest::new(value, from_unit, to_unit, category).execute() {
        Ok(o) => o,
        Err(e) => return Ok(tool_error(e.code(), format!("Conversion error: {}", e))),
    };

    let text = format_result(outcome.input, &outcome.from_symbol, outcome.result, &outcome.to_symbol, decimals);

    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "info": format_info(category, &outcome.from_symbol, &outcome.to_symbol),
        "color": category_color(category),
        "result": outcome,
        "isError": false
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(raw: JsonValue) -> McpRequest {
        serde_json::from_value(raw).unwrap()
    }

    fn call_tool(name: &str, arguments: JsonValue) -> JsonValue {
        let req = request(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        }));
        let response = handle_request(&ServerConfig::default(), &req);
        assert!(response.error.is_none(), "unexpected error: {:?}", response.error);
        response.result.unwrap()
    }

    #[test]
    fn test_initialize_echoes_protocol() {
        let req = request(json!({
            "jsonrpc": "2.0",
            "id": 0,
            "method": "initialize",
            "params": { "protocolVersion": "2024-11-05", "clientInfo": { "name": "test" } }
        }));
        let result = handle_request(&ServerConfig::default(), &req).result.unwrap();

        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
    }

    #[test]
    fn test_unknown_method() {
        let req = request(json!({ "jsonrpc": "2.0", "id": 3, "method": "resources/list" }));
        let response = handle_request(&ServerConfig::default(), &req);

        assert_eq!(response.error.unwrap().code, protocol::METHOD_NOT_FOUND);
        assert_eq!(response.id, Some(json!(3)));
    }

    #[test]
    fn test_tools_list_names() {
        let req = request(json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" }));
        let result = handle_request(&ServerConfig::default(), &req).result.unwrap();

        let names: Vec<&str> = result["tools"].as_array().unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["list_categories", "list_units", "unit_symbol", "convert"]);
    }

    #[test]
    fn test_list_units_tool() {
        let result = call_tool("list_units", json!({ "category": "Temperature" }));

        assert_eq!(result["data"][0]["name"], "Celsius (°C)");
        assert_eq!(result["data"][2]["symbol"], "K");
        assert_eq!(result["default_selection"]["from_unit"], "Celsius (°C)");
        assert_eq!(result["default_selection"]["to_unit"], "Fahrenheit (°F)");
    }

    #[test]
    fn test_list_units_unknown_category_is_empty() {
        let result = call_tool("list_units", json!({ "category": "Volume" }));

        assert_eq!(result["data"], json!([]));
        assert!(result["default_selection"].is_null());
    }

    #[test]
    fn test_unit_symbol_tool() {
        assert_eq!(call_tool("unit_symbol", json!({ "name": "Centimeters (cm)" }))["symbol"], "cm");
        assert_eq!(call_tool("unit_symbol", json!({ "name": "NoParens" }))["symbol"], "");
    }

    #[test]
    fn test_convert_tool_number() {
        let result = call_tool("convert", json!({
            "value": 1,
            "from_unit": "Kilometers (km)",
            "to_unit": "Meters (m)",
            "category": "Length"
        }));

        assert_eq!(result["content"][0]["text"], "1.00 km = 1000.0000 m");
        assert_eq!(result["info"], "Conversion: Length (km → m)");
        assert_eq!(result["color"], "green");
        assert_eq!(result["isError"], false);
    }

    #[test]
    fn test_convert_tool_comma_string() {
        let result = call_tool("convert", json!({
            "value": "36,6",
            "from_unit": "Celsius (°C)",
            "to_unit": "Fahrenheit (°F)",
            "category": "Temperature",
            "decimals": 1
        }));

        assert_eq!(result["content"][0]["text"], "36.60 °C = 97.9 °F");
        assert_eq!(result["color"], "red");
    }

    #[test]
    fn test_convert_tool_unknown_unit() {
        let result = call_tool("convert", json!({
            "value": 1,
            "from_unit": "Grams (g)",
            "to_unit": "Meters (m)",
            "category": "Length"
        }));

        assert_eq!(result["isError"], true);
        assert_eq!(result["error"]["code"], "UNKNOWN_UNIT");
    }

    #[test]
    fn test_convert_tool_unknown_category() {
        let result = call_tool("convert", json!({
            "value": 1,
            "from_unit": "Grams (g)",
            "to_unit": "Kilograms (kg)",
            "category": "Weight"
        }));

        assert_eq!(result["isError"], true);
        assert_eq!(result["error"]["code"], "UNKNOWN_CATEGORY");
    }

    #[test]
    fn test_convert_tool_bad_input() {
        let result = call_tool("convert", json!({
            "value": "12abc",
            "from_unit": "Grams (g)",
            "to_unit": "Kilograms (kg)",
            "category": "Mass"
        }));

        assert_eq!(result["isError"], true);
        assert_eq!(result["error"]["code"], "INVALID_INPUT");
    }

    #[test]
    fn test_unknown_tool() {
        let req = request(json!({
            "jsonrpc": "2.0",
            "id": 4,
            "method": "tools/call",
            "params": { "name": "eval", "arguments": {} }
        }));
        let error = handle_request(&ServerConfig::default(), &req).error.unwrap();

        assert_eq!(error.code, protocol::INVALID_PARAMS);
        assert_eq!(error.data.unwrap()["available"][3], "convert");
    }

    #[test]
    fn test_convert_tool_decimals_out_of_range() {
        for decimals in [json!(16), json!(u64::MAX), json!(4_294_967_298u64), json!(-1)] {
            let req = request(json!({
                "jsonrpc": "2.0",
                "id": 5,
                "method": "tools/call",
                "params": { "name": "convert", "arguments": {
                    "value": 1,
                    "from_unit": "Meters (m)",
                    "to_unit": "Kilometers (km)",
                    "category": "Length",
                    "decimals": decimals
                } }
            }));
            let response = handle_request(&ServerConfig::default(), &req);

            assert_eq!(response.error.unwrap().code, protocol::INVALID_PARAMS);
        }
    }

    #[test]
    fn test_parse_request_invalid() {
        let (id, error) = parse_request(json!({ "jsonrpc": "2.0", "id": 8 })).unwrap_err();
        assert_eq!(id, Some(json!(8)));
        assert_eq!(error.code, protocol::INVALID_REQUEST);

        let (id, error) = parse_request(json!({ "jsonrpc": "1.0", "id": 9, "method": "ping" })).unwrap_err();
        assert_eq!(id, Some(json!(9)));
        assert_eq!(error.code, protocol::INVALID_REQUEST);

        let (id, error) = parse_request(json!([1, 2, 3])).unwrap_err();
        assert_eq!(id, None);
        assert_eq!(error.code, protocol::INVALID_REQUEST);

        assert!(parse_request(json!({ "jsonrpc": "2.0", "id": 1, "method": "ping" })).is_ok());
    }

    #[test]
    fn test_convert_tool_missing_argument() {
        let req = request(json!({
            "jsonrpc": "2.0",
            "id": 9,
            "method": "tools/call",
            "params": { "name": "convert", "arguments": { "value": 1 } }
        }));
        let response = handle_request(&ServerConfig::default(), &req);

        assert_eq!(response.error.unwrap().code, protocol::INVALID_PARAMS);
    }

    #[test]
    fn test_serve_session() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#, "\n",
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#, "\n",
            "not json\n",
            r#"{"jsonrpc":"2.0","id":3,"params":{}}"#, "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"unit_symbol","arguments":{"name":"Tons (t)"}}}"#, "\n",
        );
        let mut output = Vec::new();
        serve(&ServerConfig::default(), input.as_bytes(), &mut output).unwrap();

        let lines: Vec<JsonValue> = String::from_utf8(output).unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        // ping, parse error, invalid request, tool call; the notification gets no answer
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0]["id"], 1);
        assert_eq!(lines[1]["error"]["code"], protocol::PARSE_ERROR);
        assert_eq!(lines[2]["error"]["code"], protocol::INVALID_REQUEST);
        assert_eq!(lines[2]["id"], 3);
        assert_eq!(lines[3]["result"]["symbol"], "t");
    }
}
