use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::time::SystemTime;

use serde_json::Value;

use crate::error::Rejection;
use crate::request::RequestRecord;
use crate::response::Response;
use crate::utils::{format_datetime, headers_to_json};

/// Where completed requests are dumped when debugging is on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DebugTarget {
    Console,
    File(String),
}

impl DebugTarget {
    /// `"console"` or empty → console, a directory → `<dir>/debug.log`,
    /// anything else is used as the file path.
    pub fn parse(target: Option<&str>) -> Self {
        match target {
            Some(t) if t.eq_ignore_ascii_case("console") || t.is_empty() => DebugTarget::Console,
            Some(t) => {
                let path = Path::new(t);
                if path.is_dir() { DebugTarget::File(path.join("debug.log").to_string_lossy().to_string()) }
                else { DebugTarget::File(t.to_string()) }
            }
            None => DebugTarget::Console,
        }
    }
}

/// How a request ended, for the dump.
pub enum Settlement<'a> {
    Resolved(&'a Response),
    Rejected(&'a Rejection),
}

pub fn debug_log(target: &DebugTarget, record: &RequestRecord, settlement: Settlement<'_>) {
    let mut msg = format!(
        "\n==== [{}] ====\nMethod: {}\nResource: {}\nRequest Time: {} -> {}\n",
        record.deferred.id(),
        record.method(),
        record.resource,
        format_datetime(record.requested_at),
        format_datetime(SystemTime::now()),
    );
    if let Some(init) = &record.init {
        if let Some(body) = &init.body { msg.push_str(&format!("Request Body: {}\n", body)); }
    }

    match settlement {
        Settlement::Resolved(res) => {
            let response = serde_json::json!({
                "headers": Value::Object(headers_to_json(&res.headers)),
                "text": res.text(),
                "json": res.json_value(),
            });
            msg.push_str(&format!("Status: {} {}\nResponse: {}\n", res.status.as_u16(), res.status_text, response));
        }
        Settlement::Rejected(rejection) => {
            msg.push_str(&format!("Rejected: {:?}\n", rejection));
        }
    }

    match target {
        DebugTarget::Console => println!("{}", msg),
        DebugTarget::File(path) => { let _ = OpenOptions::new().create(true).append(true).open(path).map(|mut f| writeln!(f, "{}", msg)); }
    }
}
