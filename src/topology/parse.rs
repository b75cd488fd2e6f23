//! Plain-text inputs for the CLI and tests.
//!
//! Edge list: first line `N`, then N-1 lines `u v`.
//! Values: N integers (whitespace separated) for nodes 1..=N.
//! Operations: `update <node> <value>` or `query <node>`, one per line.
//! Blank lines and `#` comments are skipped everywhere.

use thiserror::Error;

use super::{NodeId, Topology, TopologyError};
use crate::context::Operation;

/// Error type returned by the text parsers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Malformed line.
    #[error("line {line}: {message}")]
    Syntax {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// Parsed fine but does not describe a tree.
    #[error("malformed topology: {0}")]
    Topology(#[from] TopologyError),
}

impl ParseError {
    fn syntax(line: usize, message: impl Into<String>) -> Self {
        ParseError::Syntax {
            line,
            message: message.into(),
        }
    }
}

/// Non-empty, non-comment lines with their 1-based line numbers.
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().filter_map(|(idx, raw)| {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            None
        } else {
            Some((idx + 1, line))
        }
    })
}

fn parse_field<T: std::str::FromStr>(line: usize, field: Option<&str>, what: &str) -> Result<T, ParseError> {
    let raw = field.ok_or_else(|| ParseError::syntax(line, format!("missing {what}")))?;
    raw.parse()
        .map_err(|_| ParseError::syntax(line, format!("invalid {what} '{raw}'")))
}

/// Parse an edge-list document into a [`Topology`].
pub fn parse_edge_list(text: &str) -> Result<Topology, ParseError> {
    let mut lines = content_lines(text);
    let (header_line, header) = lines
        .next()
        .ok_or_else(|| ParseError::syntax(1, "missing node count"))?;
    let node_count: usize = parse_field(header_line, Some(header), "node count")?;

    let mut edges: Vec<(NodeId, NodeId)> = Vec::with_capacity(node_count.saturating_sub(1));
    for (line_no, line) in lines {
        let mut fields = line.split_whitespace();
        let u = parse_field(line_no, fields.next(), "edge endpoint")?;
        let v = parse_field(line_no, fields.next(), "edge endpoint")?;
        if fields.next().is_some() {
            return Err(ParseError::syntax(line_no, "expected exactly two endpoints"));
        }
        edges.push((u, v));
    }

    Ok(Topology::from_edges(node_count, &edges)?)
}

/// Parse exactly `expected` node values.
pub fn parse_values(text: &str, expected: usize) -> Result<Vec<i32>, ParseError> {
    let mut values = Vec::with_capacity(expected);
    let mut last_line = 1;
    for (line_no, line) in content_lines(text) {
        last_line = line_no;
        for field in line.split_whitespace() {
            values.push(parse_field(line_no, Some(field), "value")?);
        }
    }

    if values.len() != expected {
        return Err(ParseError::syntax(
            last_line,
            format!("expected {expected} values, found {}", values.len()),
        ));
    }
    Ok(values)
}

/// Parse an operation script.
pub fn parse_operations(text: &str) -> Result<Vec<Operation>, ParseError> {
    let mut ops = Vec::new();
    for (line_no, line) in content_lines(text) {
        let mut fields = line.split_whitespace();
        let op = match fields.next() {
            Some("update") => Operation::Update {
                node: parse_field(line_no, fields.next(), "node")?,
                value: parse_field(line_no, fields.next(), "value")?,
            },
            Some("query") => Operation::Query {
                node: parse_field(line_no, fields.next(), "node")?,
            },
            Some(other) => {
                return Err(ParseError::syntax(line_no, format!("unknown operation '{other}'")))
            }
            None => continue,
        };
        if fields.next().is_some() {
            return Err(ParseError::syntax(line_no, "trailing fields"));
        }
        ops.push(op);
    }
    Ok(ops)
}
