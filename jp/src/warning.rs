// SPDX-License-Identifier: Apache-2.0

/// Recoverable conditions noticed while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// An object key appeared more than once; the later value was kept.
    DuplicateKey {
        key: String,
        line: usize,
        column: usize,
    },
}

impl core::fmt::Display for Warning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Warning::DuplicateKey { key, line, column } => write!(
                f,
                "duplicate object key '{key}' at line {line}, col {column}"
            ),
        }
    }
}
