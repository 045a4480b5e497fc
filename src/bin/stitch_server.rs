use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use via_stitching::server::{error_codes, handle_request, Request, Response, ServerState};
use via_stitching::settings::DEFAULT_SETTINGS_FILE;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));
    log::info!("[Server] Starting via stitching server (settings: {})", settings_path.display());

    let mut state = ServerState::new(settings_path);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                log::error!("[Server] Error reading stdin: {}", e);
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => {
                let is_close = request.method == "Close";
                let response = handle_request(&mut state, request);
                if is_close {
                    writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
                    stdout.flush()?;
                    log::info!("[Server] Shutting down");
                    break;
                }
                response
            }
            Err(e) => {
                log::warn!("[Server] Failed to parse request: {}", e);
                Response::error(None, error_codes::PARSE_ERROR, format!("Parse error: {}", e))
            }
        };

        writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
        stdout.flush()?;
    }

    Ok(())
}
