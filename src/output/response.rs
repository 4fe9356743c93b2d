//! CLI response formatting and output.
//!
//! Provides the JSON envelope, plain-text notices, and exit code mapping.

use fix_opacity::error::Hint;
use fix_opacity::{Error, ErrorCode, Result};
use serde::Serialize;
use std::io::{self, Write};

use crate::commands::fix::EXIT_FILES_FAILED;

#[derive(Debug, Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CliError>,
}

#[derive(Debug, Serialize)]
pub struct CliError {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<Hint>>,
}

impl<T: Serialize> CliResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Report that still carries data but did not fully succeed.
    pub fn partial(data: T) -> Self {
        Self {
            success: false,
            data: Some(data),
            error: None,
        }
    }

    fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            Error::internal_json(e.to_string(), Some("serialize response".to_string()))
        })
    }
}

impl CliResponse<()> {
    pub fn from_error(err: &Error) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(CliError {
                code: err.code.as_str().to_string(),
                message: err.message.clone(),
                details: err.details.clone(),
                hints: if err.hints.is_empty() {
                    None
                } else {
                    Some(err.hints.clone())
                },
            }),
        }
    }
}

/// Write one line, treating a closed pipe as success.
fn write_line<W: Write>(out: &mut W, line: &str) -> Result<()> {
    match writeln!(out, "{}", line) {
        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => Err(Error::internal_io(
            e.to_string(),
            Some("write stdout".to_string()),
        )),
        _ => Ok(()),
    }
}

fn write_stdout(line: &str) -> Result<()> {
    write_line(&mut io::stdout().lock(), line)
}

fn print_response<T: Serialize>(response: &CliResponse<T>) -> Result<()> {
    write_stdout(&response.to_json()?)
}

/// Per-file notice. A failed stdout write is reported on stderr but does not
/// abort the rewrite.
pub fn print_line(line: &str) {
    if let Err(err) = write_stdout(line) {
        eprintln!("Warning: could not print notice: {}", err);
    }
}

pub fn map_cmd_result_to_json<T: Serialize>(
    result: Result<(T, i32)>,
) -> (Result<serde_json::Value>, i32) {
    match result {
        Ok((data, exit_code)) => match serde_json::to_value(data) {
            Ok(value) => (Ok(value), exit_code),
            Err(err) => (
                Err(Error::internal_json(
                    err.to_string(),
                    Some("serialize response".to_string()),
                )),
                1,
            ),
        },
        Err(err) => {
            let exit_code = exit_code_for_error(err.code);
            (Err(err), exit_code)
        }
    }
}

pub fn exit_code_for_error(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::ConfigInvalidJson | ErrorCode::ConfigInvalidValue => 2,

        ErrorCode::RewriteFilesFailed => EXIT_FILES_FAILED,

        ErrorCode::InternalIoError
        | ErrorCode::InternalJsonError
        | ErrorCode::InternalUnexpected => 1,
    }
}

pub fn print_json_result(result: Result<serde_json::Value>, exit_code: i32) -> Result<()> {
    match result {
        Ok(data) if exit_code == 0 => print_response(&CliResponse::success(data)),
        Ok(data) => print_response(&CliResponse::partial(data)),
        Err(err) => print_response(&CliResponse::<()>::from_error(&err)),
    }
}

/// Plain-text error for the default output mode.
pub fn print_error(err: &Error) {
    eprintln!("Error: {}", err);
    if let Some(files) = err.details.get("files").and_then(|f| f.as_array()) {
        for file in files.iter().filter_map(|f| f.as_str()) {
            eprintln!("  {}", file);
        }
    }
    for hint in &err.hints {
        eprintln!("hint: {}", hint.message);
    }
}
