//! Command-line word splitting.
//!
//! A raw command string is tokenized into an argument vector with POSIX
//! shell rules (whitespace delimits words, single/double quotes and
//! backslash escapes are honored) and then handed directly to process
//! creation. No shell is ever invoked, so pipes, redirection, globbing,
//! and variable expansion are deliberately unsupported; the literal
//! tokens are the whole contract, which closes off shell injection.

use crate::error::{Result, SandboxError};

/// Split a raw command line into an argument vector.
///
/// Returns [`SandboxError::Parse`] when quoting is unterminated, or when
/// the input is empty or tokenizes to zero words. A command that parses
/// to nothing is always an error here, never a silent no-op.
pub fn parse(raw: &str) -> Result<Vec<String>> {
    if raw.trim().is_empty() {
        return Err(SandboxError::Parse("empty command".into()));
    }

    let args = shlex::split(raw)
        .ok_or_else(|| SandboxError::Parse(format!("unterminated quoting in: {raw}")))?;

    if args.is_empty() {
        return Err(SandboxError::Parse("empty command".into()));
    }

    Ok(args)
}
