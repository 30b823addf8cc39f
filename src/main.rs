#![windows_subsystem = "windows"]
use std::io::{self, BufRead, Write};

use log::{error, info};

mod config;
mod db;
mod error;
mod model;
mod protocol;
mod services;

use services::locale_store::{connector::JsonStoreFactory, store::LocaleStore};

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config::DEFAULT_LOG_FILTER),
    )
    .init();

    let cfg = config::Config::from_env();
    info!("locale store at {}", cfg.store_path.display());

    let factory = JsonStoreFactory::new(LocaleStore::new(cfg.store_path));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    serve(stdin.lock(), &mut stdout, &factory);
}

fn serve(input: impl BufRead, output: &mut impl Write, factory: &JsonStoreFactory) {
    for line in input.split(b'\n') {
        let bytes = match line {
            Ok(b) => b,
            Err(e) => {
                error!("failed to read request: {e}");
                break;
            }
        };

        let response = match String::from_utf8(bytes) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => answer(&line, factory),
            Err(_) => protocol::invalid_json(),
        };

        if writeln!(output, "{response}").is_err() {
            break;
        }

        let _ = output.flush();
    }
}

fn answer(line: &str, factory: &JsonStoreFactory) -> String {
    match std::panic::catch_unwind(|| protocol::handle(line, factory)) {
        Ok(resp) => resp,
        Err(_) => {
            error!("panic while handling request");
            serde_json::json!({
                "status": "error",
                "message": "internal core error"
            })
            .to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::TempDir;

    fn run(input: &[u8]) -> Vec<Value> {
        let dir = TempDir::new().expect("temp dir");
        let factory = JsonStoreFactory::new(LocaleStore::new(
            dir.path().join(services::locale_store::store::STORE_FILE),
        ));

        let mut out: Vec<u8> = Vec::new();
        serve(input, &mut out, &factory);

        String::from_utf8(out)
            .expect("utf-8 output")
            .lines()
            .map(|l| serde_json::from_str(l).expect("json reply"))
            .collect()
    }

    #[test]
    fn every_non_blank_line_gets_a_reply() {
        let replies = run(b"{\"id\": 1, \"cmd\": \"ping\"}\n\n   \n{\"id\": 2, \"cmd\": \"ping\"}\n");
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0]["id"], 1);
        assert_eq!(replies[1]["id"], 2);
    }

    #[test]
    fn invalid_utf8_line_is_answered_as_invalid_json() {
        let replies = run(b"\xff\xfe\n{\"id\": 7, \"cmd\": \"ping\"}\n");
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0]["status"], "error");
        assert_eq!(replies[0]["message"], "invalid json");
        assert_eq!(replies[1]["status"], "ok");
    }
}
