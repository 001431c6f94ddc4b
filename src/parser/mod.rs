//! Text format for networks and their output sets
//!
//! A network is written as its comparator list, `[(0,1);(2,3);(0,2)]`. Wires
//! may be numbered from 0 or from 1: a list containing a literal `(0,` is
//! read as 0-indexed, anything else as 1-indexed. An output set is written as
//! its integer values, `{0,1,3,7}`.
//!
//! Network files list one network per line, each optionally followed by a
//! line with its output set.

use std::fmt;

use crate::error::{Result, SearchError};
use crate::network::Network;
use crate::output::OutputSet;

/// Parse error with location information
#[derive(Debug, Clone)]
pub struct ParseError {
    pub line_number: usize,
    pub message: String,
    pub line_content: String,
}

impl ParseError {
    pub fn new(
        line_number: usize,
        message: impl Into<String>,
        line_content: impl Into<String>,
    ) -> Self {
        Self {
            line_number,
            message: message.into(),
            line_content: line_content.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: {}\n  | {}",
            self.line_number, self.message, self.line_content
        )
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for SearchError {
    fn from(err: ParseError) -> Self {
        SearchError::Parse {
            what: "network file",
            reason: err.to_string(),
        }
    }
}

/// Result of classifying a single line
#[derive(Debug)]
pub enum LineResult {
    Network(Network),
    Outputs(OutputSet),
    /// Blank line or `#` comment
    Skip,
}

/// Every maximal run of decimal digits, in order.
fn numbers(text: &str) -> Result<Vec<u64>> {
    let mut out = Vec::new();
    let mut current: Option<u64> = None;
    for ch in text.chars() {
        if let Some(d) = ch.to_digit(10) {
            let value = current
                .unwrap_or(0)
                .checked_mul(10)
                .and_then(|v| v.checked_add(d as u64))
                .ok_or_else(|| SearchError::Parse {
                    what: "number",
                    reason: format!("value too large in '{text}'"),
                })?;
            current = Some(value);
        } else if let Some(value) = current.take() {
            out.push(value);
        }
    }
    out.extend(current);
    Ok(out)
}

/// Parse a comparator list, auto-detecting the wire numbering.
pub fn parse_network(wires: usize, text: &str) -> Result<Network> {
    let tokens = numbers(text)?;
    if tokens.len() % 2 != 0 {
        return Err(SearchError::Parse {
            what: "network",
            reason: format!("odd number of wire indices in '{text}'"),
        });
    }
    let offset = if text.contains("(0,") { 0 } else { 1 };
    let mut net = Network::new(wires)?;
    for pair in tokens.chunks_exact(2) {
        let wire = |raw: u64| {
            (raw as usize).checked_sub(offset).ok_or_else(|| SearchError::Parse {
                what: "network",
                reason: format!("wire {raw} in a 1-indexed list"),
            })
        };
        net.add_comparator(wire(pair[0])?, wire(pair[1])?)?;
    }
    Ok(net)
}

/// Parse `{v1,v2,...}` into a finalized output set.
pub fn parse_outputs(wires: usize, text: &str) -> Result<OutputSet> {
    let inner = match (text.find('{'), text.rfind('}')) {
        (Some(open), Some(close)) if open < close => &text[open + 1..close],
        _ => {
            return Err(SearchError::Parse {
                what: "output set",
                reason: format!("expected '{{...}}', found '{text}'"),
            });
        }
    };
    let values = numbers(inner)?
        .into_iter()
        .map(|v| {
            u32::try_from(v).map_err(|_| SearchError::Parse {
                what: "output value",
                reason: format!("{v} out of range"),
            })
        })
        .collect::<Result<Vec<u32>>>()?;
    OutputSet::from_values(wires, values)
}

/// Classify and parse one line of a network file.
pub fn parse_line(wires: usize, line: &str) -> Result<LineResult> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(LineResult::Skip);
    }
    match line.chars().next() {
        Some('[') => parse_network(wires, line).map(LineResult::Network),
        Some('{') => parse_outputs(wires, line).map(LineResult::Outputs),
        _ => Err(SearchError::Parse {
            what: "line",
            reason: "expected '[' or '{'".to_string(),
        }),
    }
}

/// Parse a whole network file, attaching each output line to the network above it.
pub fn parse_network_list(wires: usize, source: &str) -> std::result::Result<Vec<Network>, ParseError> {
    let mut networks: Vec<Network> = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let line_number = idx + 1;
        let parsed = parse_line(wires, raw)
            .map_err(|e| ParseError::new(line_number, e.to_string(), raw))?;
        match parsed {
            LineResult::Network(net) => networks.push(net),
            LineResult::Outputs(outputs) => {
                let Some(last) = networks.pop() else {
                    return Err(ParseError::new(
                        line_number,
                        "output set without a network",
                        raw,
                    ));
                };
                networks.push(last.with_outputs(outputs));
            }
            LineResult::Skip => {}
        }
    }
    Ok(networks)
}
