//! # chatgate - request checker
//!
//! Reads a chat completion request body, parses and validates it, and
//! reports whether an engine would accept it.
//!
//! Exit status: 0 accepted, 1 rejected or unparseable, 2 configuration or
//! I/O failure.

use std::io::Read;
use std::process::ExitCode;

use chatgate::{
    config::{Command, Config},
    validation::{UNSUPPORTED_FIELDS, UNSUPPORTED_FIELDS_VERSION},
    ChatCompletionRequest, GateError,
};
use serde_json::json;
use tracing::{debug, info};

fn main() -> ExitCode {
    let config = Config::parse_args();

    match &config.command {
        Command::UnsupportedFields => {
            print_unsupported_fields(&config);
            ExitCode::SUCCESS
        }
        Command::Check { input } => match check(input) {
            Ok(request) => {
                info!(input = %input, "Request accepted");
                if config.json_output() {
                    println!(
                        "{}",
                        json!({
                            "ok": true,
                            "messages": request.messages.len(),
                            "stream": request.is_streaming(),
                        })
                    );
                } else {
                    println!(
                        "ok: {} message(s), stream={}",
                        request.messages.len(),
                        request.is_streaming()
                    );
                }
                ExitCode::SUCCESS
            }
            Err(err) => {
                if config.json_output() {
                    println!("{}", json!(err.to_error_response()));
                } else {
                    eprintln!("error: {}", err);
                }
                match err {
                    GateError::Io(_) => ExitCode::from(2),
                    _ => ExitCode::from(1),
                }
            }
        },
    }
}

/// Read, parse and validate one request.
fn check(input: &str) -> Result<ChatCompletionRequest, GateError> {
    let body = read_input(input)?;
    debug!(input = %input, bytes = body.len(), "Read request body");

    let request = ChatCompletionRequest::from_slice(&body)?;
    request.validate()?;
    Ok(request)
}

/// Raw bytes, so that bad UTF-8 surfaces as a parse error, not an I/O one.
fn read_input(input: &str) -> Result<Vec<u8>, GateError> {
    if input == "-" {
        let mut body = Vec::new();
        std::io::stdin().read_to_end(&mut body)?;
        Ok(body)
    } else {
        Ok(std::fs::read(input)?)
    }
}

fn print_unsupported_fields(config: &Config) {
    if config.json_output() {
        println!(
            "{}",
            json!({
                "version": UNSUPPORTED_FIELDS_VERSION,
                "fields": UNSUPPORTED_FIELDS,
            })
        );
    } else {
        for field in UNSUPPORTED_FIELDS {
            println!("{}", field);
        }
    }
}
