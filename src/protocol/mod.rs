use std::collections::HashMap;

use log::{debug, warn};
use serde_json::{json, Value};

use crate::db::ConnectorFactory;
use crate::services::source::AddOutcome;
use crate::services::{fieldset, source};

mod command;
use command::Command;

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload(req: &Value) -> &Value {
    static EMPTY: Value = Value::Null;
    req.get("payload").unwrap_or(&EMPTY)
}

fn ok(id: Value, payload: Value) -> String {
    json!({
        "id": id,
        "status": "ok",
        "payload": payload
    })
    .to_string()
}

fn err(id: Value, message: impl Into<String>) -> String {
    let message = message.into();
    warn!("request {id} failed: {message}");
    json!({
        "id": id,
        "status": "error",
        "message": message
    })
    .to_string()
}

/// Payload fields as a fieldset: strings copied, `null` dropped, other
/// scalars kept as their JSON text.
fn fieldset_from_payload(payload: &Value) -> Result<HashMap<String, String>, String> {
    if payload.is_null() {
        return Ok(HashMap::new());
    }

    let obj = payload
        .as_object()
        .ok_or_else(|| "payload must be an object".to_string())?;

    let mut out: HashMap<String, String> = HashMap::with_capacity(obj.len());
    for (k, v) in obj {
        match v {
            Value::Null => {}
            Value::String(s) => {
                out.insert(k.clone(), s.clone());
            }
            other => {
                out.insert(k.clone(), other.to_string());
            }
        }
    }

    Ok(out)
}

pub fn invalid_json() -> String {
    json!({
        "status": "error",
        "message": "invalid json"
    })
    .to_string()
}

pub fn handle(input: &str, factory: &dyn ConnectorFactory) -> String {
    let req: Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(_) => return invalid_json(),
    };

    let id = get_id(&req);
    let cmd_str = get_cmd(&req);
    let payload = get_payload(&req);

    debug!("dispatching {cmd_str:?} (id {id})");

    match Command::from(cmd_str) {
        Command::Ping => ok(id, json!({ "message": "locale-core alive" })),

        Command::FieldsetInit => {
            let input = match fieldset_from_payload(payload) {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };
            match fieldset::init_fieldset(&input) {
                Ok(record) => ok(id, json!({ "record": record })),
                Err(e) => err(id, e.to_string()),
            }
        }

        Command::SourceExists => {
            let wanted = match payload.get("source").and_then(|v| v.as_str()) {
                Some(s) => s,
                None => return err(id, "payload.source is required"),
            };
            match source::source_exists(wanted, factory) {
                Ok(exists) => ok(id, json!({ "exists": exists })),
                Err(e) => err(id, e.to_string()),
            }
        }

        Command::SourceAdd => {
            let input = match fieldset_from_payload(payload) {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };
            match source::add_source(&input, factory) {
                Ok(AddOutcome::Created { lid }) => ok(id, json!({ "created": true, "lid": lid })),
                Ok(AddOutcome::AlreadyExists) => ok(id, json!({ "created": false })),
                Err(e) => err(id, e.to_string()),
            }
        }

        Command::Unknown => err(id, "unknown command"),
    }
}
