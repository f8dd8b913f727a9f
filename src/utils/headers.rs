use reqwest::header::HeaderMap;
use serde_json::Value;

// 生成 headers_map，非 ASCII 的值记为空串
pub fn headers_to_json(headers: &HeaderMap) -> serde_json::Map<String, Value> {
    headers.iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_str().unwrap_or("").to_string())))
        .collect()
}
