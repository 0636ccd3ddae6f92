//! Module header and port list recovery.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::error::StructureError;
use crate::module::MODULE_HEADER;

/// The outermost port-list parentheses: the first `(` not directly after `#`,
/// through the last `)` of the header.
static PORT_LIST: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)[^#]\s*\((.*)\)").unwrap());

/// A module's declaration header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Header {
    /// The module name.
    pub module_name: String,
    /// The header text, `module` through the closing `;`.
    pub text: String,
    /// Port identifiers in declaration order.
    pub ports: Vec<String>,
}

/// Reads the header of a module body and recovers its port identifiers.
///
/// Fails with [`StructureError::MissingHeader`] when the body has no header.
pub fn read_header(body: &str) -> Result<Header, StructureError> {
    let caps = MODULE_HEADER
        .captures(body)
        .ok_or_else(|| StructureError::missing_header(body))?;
    let text = &caps[0];
    Ok(Header {
        module_name: caps[1].to_string(),
        text: text.to_string(),
        ports: port_names(text),
    })
}

/// Splits the header's port list on commas and keeps each declaration's identifier.
///
/// Direction, net type, and signedness keywords always precede the identifier,
/// so only the trailing position matters: the token after the last `]` when a
/// range is present, else the last token.
pub fn port_names(header: &str) -> Vec<String> {
    let Some(caps) = PORT_LIST.captures(header) else {
        return Vec::new();
    };
    caps[1]
        .split(',')
        .filter_map(|decl| port_name(decl.trim()))
        .map(str::to_string)
        .collect()
}

fn port_name(decl: &str) -> Option<&str> {
    match decl.rfind(']') {
        Some(idx) => decl[idx + 1..].split_whitespace().next(),
        None => decl.split_whitespace().last(),
    }
}
