//! Token dump rendering.

use std::io::Write;

use serde::Serialize;
use serde_json::Value;
use usc_lex::{Token, TokenValue};

use crate::config::OutputFormat;
use crate::error::Result;
use crate::session::{FileReport, SourceMap};

/// One token as it appears in the JSON dump.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenRecord<'a> {
    /// Display name of the source file.
    pub file: &'a str,
    /// Token kind spelling (`var`, `+=`, `ident`, ...).
    pub kind: &'static str,
    /// Literal payload, `null` for keywords and symbols.
    pub value: Value,
    /// 1-based line.
    pub line: u32,
    /// 1-based column.
    pub column: u32,
}

impl<'a> TokenRecord<'a> {
    /// Builds the record for `token` from file `file`.
    pub fn new(file: &'a str, token: &Token) -> Self {
        let value = if token.kind.is_literal() {
            literal_value(&token.value)
        } else {
            Value::Null
        };
        Self {
            file,
            kind: token.kind.as_str(),
            value,
            line: token.line(),
            column: token.column(),
        }
    }
}

fn literal_value(value: &TokenValue) -> Value {
    match value {
        TokenValue::None => Value::Null,
        TokenValue::Ident { name, .. } => Value::from(name.as_str()),
        TokenValue::Int(n) => Value::from(*n),
        TokenValue::Float(x) => Value::from(*x),
        TokenValue::Char(b) => Value::from((*b as char).to_string()),
        TokenValue::Str(s) => Value::from(s.as_str()),
    }
}

/// Formats one token as `file:line:column kind value`.
///
/// Keywords and symbols have no value part.
pub fn format_token(file: &str, token: &Token) -> String {
    if token.kind.is_literal() {
        format!(
            "{}:{}:{} {} {}",
            file,
            token.line(),
            token.column(),
            token.kind,
            token.value
        )
    } else {
        format!("{}:{}:{} {}", file, token.line(), token.column(), token.kind)
    }
}

/// Writes the tokens of every report to `out` in `format`.
pub fn write_tokens<W: Write>(
    out: &mut W,
    format: OutputFormat,
    sources: &SourceMap,
    reports: &[FileReport],
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for report in reports {
                let file = sources.name(report.file_id);
                for token in &report.tokens {
                    writeln!(out, "{}", format_token(file, token))?;
                }
            }
        },
        OutputFormat::Json => {
            let records: Vec<TokenRecord<'_>> = reports
                .iter()
                .flat_map(|report| {
                    let file = sources.name(report.file_id);
                    report.tokens.iter().map(move |t| TokenRecord::new(file, t))
                })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &records)?;
            writeln!(out)?;
        },
    }
    Ok(())
}
