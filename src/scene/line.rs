//! Parsing of a single script command line into a structured call.
//!
//! A command line is one `name(arg, arg, ...)` invocation. Arguments are kept as raw text and only
//! interpreted (number, bool, string literal) by whoever consumes them, so parsing never needs to
//! know which command it is looking at.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    pub offset: usize,
    pub message: String,
}

impl LineError {
    pub(crate) fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line error at byte {}: {}", self.offset, self.message)
    }
}

impl std::error::Error for LineError {}

/// One positional argument, as written in the script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Arg(String);

impl Arg {
    /// Wrap raw argument text. Surrounding whitespace is dropped.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.len() == raw.len() {
            Self(raw)
        } else {
            Self(trimmed.to_owned())
        }
    }

    /// The argument text exactly as it appeared (trimmed).
    pub fn raw(&self) -> &str {
        &self.0
    }

    /// Numeric value of the argument, if it is a finite number literal.
    pub fn as_f64(&self) -> Option<f64> {
        self.0.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// `true`/`false` literals.
    pub fn as_bool(&self) -> Option<bool> {
        match self.0.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    /// The contents of a quoted string literal, or the raw text when unquoted.
    pub fn as_str(&self) -> &str {
        let s = self.0.as_str();
        let bytes = s.as_bytes();
        if bytes.len() >= 2 {
            let first = bytes[0];
            if matches!(first, b'"' | b'\'' | b'`') && bytes[bytes.len() - 1] == first {
                return &s[1..s.len() - 1];
            }
        }
        s
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A parsed command invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandCall {
    pub name: String,
    pub args: Vec<Arg>,
}

impl CommandCall {
    pub fn new(name: impl Into<String>, args: impl IntoIterator<Item = Arg>) -> Self {
        Self {
            name: name.into(),
            args: args.into_iter().collect(),
        }
    }

    pub fn arg(&self, index: usize) -> Option<&Arg> {
        self.args.get(index)
    }
}

impl fmt::Display for CommandCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, a) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{a}")?;
        }
        f.write_str(")")
    }
}

/// Parse one command line.
///
/// Returns `Ok(None)` for blank lines and `//` comments. A trailing `;` and a leading `await` or
/// `yield` keyword are accepted and ignored.
pub fn parse_line(text: &str) -> Result<Option<CommandCall>, LineError> {
    let lead = text.len() - text.trim_start().len();
    let mut body = text.trim();
    while let Some(rest) = body.strip_suffix(';') {
        body = rest.trim_end();
    }
    if body.is_empty() || body.starts_with("//") {
        return Ok(None);
    }

    let mut base = lead;
    for kw in ["await", "yield"] {
        if let Some(rest) = body.strip_prefix(kw)
            && rest.starts_with(char::is_whitespace)
        {
            let trimmed = rest.trim_start();
            base += body.len() - trimmed.len();
            body = trimmed;
            break;
        }
    }

    let bytes = body.as_bytes();
    let mut i = 0usize;

    let is_ident_start = |b: u8| b.is_ascii_alphabetic() || b == b'_' || b == b'$';
    let is_ident_cont = |b: u8| b.is_ascii_alphanumeric() || b == b'_' || b == b'$';

    if !bytes.first().copied().is_some_and(is_ident_start) {
        return Err(LineError::new(base, "expected command name"));
    }
    while i < bytes.len() && is_ident_cont(bytes[i]) {
        i += 1;
    }
    let name = &body[..i];

    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    if i >= bytes.len() || bytes[i] != b'(' {
        return Err(LineError::new(base + i, "expected '(' after command name"));
    }
    i += 1;

    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut arg_start = i;
    let mut quote: Option<u8> = None;
    let mut close = None;

    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == b'\\' {
                i += 2;
                continue;
            }
            if b == q {
                quote = None;
            }
            i += 1;
            continue;
        }

        match b {
            b'"' | b'\'' | b'`' => quote = Some(b),
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' if depth > 0 => depth -= 1,
            b')' => {
                close = Some(i);
                break;
            }
            b']' | b'}' => {
                return Err(LineError::new(base + i, "unbalanced bracket"));
            }
            b',' if depth == 0 => {
                let raw = body[arg_start..i].trim();
                if raw.is_empty() {
                    return Err(LineError::new(base + arg_start, "empty argument"));
                }
                args.push(Arg::new(raw));
                arg_start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    if quote.is_some() {
        return Err(LineError::new(base + body.len(), "unterminated string literal"));
    }
    let Some(close) = close else {
        return Err(LineError::new(base + body.len(), "expected ')'"));
    };

    // A trailing comma (`f(a, b,)`) leaves an empty final slot, which is dropped.
    let last = body[arg_start..close].trim();
    if !last.is_empty() {
        args.push(Arg::new(last));
    }

    let rest = body[close + 1..].trim();
    if !rest.is_empty() {
        return Err(LineError::new(
            base + close + 1,
            format!("unexpected trailing input '{rest}'"),
        ));
    }

    Ok(Some(CommandCall::new(name, args)))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/line.rs"]
mod tests;
