//! Reader for the whitespace-separated edge-list format.
//!
//! The first token is the number of vertices. It is followed by
//! `source sink weight` triples until a source of `-1` or the end of input.
//! Tokens may be split across lines freely.

use std::fmt::Debug;
use std::fs;
use std::str::FromStr;

use num_traits::{Float, NumCast, Zero};

use crate::graph::directed::DirectedGraph;
use crate::graph::path::VertexId;
use crate::{Error, FormatError, Result};

const END_OF_EDGES: i64 = -1;

/// Parses a graph from its textual edge-list form
pub fn parse_graph<W>(input: &str) -> Result<DirectedGraph<W>>
where
    W: Float + Zero + Debug + Copy,
{
    let mut tokens = input
        .lines()
        .enumerate()
        .flat_map(|(i, line)| line.split_whitespace().map(move |token| (i + 1, token)));

    let (line, token) = tokens.next().ok_or(FormatError::MissingVertexCount)?;
    let declared: usize = parse_token(line, token)?;

    let mut edges = Vec::new();
    while let Some((line, token)) = tokens.next() {
        let source: i64 = parse_token(line, token)?;
        if source == END_OF_EDGES {
            break;
        }
        let source = vertex_id(line, token, source)?;

        let (sink_line, sink_token) = tokens.next().ok_or(FormatError::IncompleteEdge { line })?;
        let sink: i64 = parse_token(sink_line, sink_token)?;
        let sink = vertex_id(sink_line, sink_token, sink)?;

        let (weight_line, weight_token) =
            tokens.next().ok_or(FormatError::IncompleteEdge { line: sink_line })?;
        let weight: f64 = parse_token(weight_line, weight_token)?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(FormatError::InvalidWeight { line: weight_line, weight }.into());
        }
        let weight = <W as NumCast>::from(weight)
            .ok_or(FormatError::InvalidWeight { line: weight_line, weight })?;

        edges.push((source, sink, weight));
    }

    DirectedGraph::from_edges(declared, edges)
}

/// Reads and parses a graph file
pub fn load_graph<W, P>(path: P) -> Result<DirectedGraph<W>>
where
    W: Float + Zero + Debug + Copy,
    P: AsRef<std::path::Path>,
{
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    log::debug!("loading graph from {}", path.display());
    parse_graph(&contents)
}

impl<W> FromStr for DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_graph(s)
    }
}

fn parse_token<T: FromStr>(line: usize, token: &str) -> Result<T> {
    token.parse().map_err(|_| {
        FormatError::InvalidToken {
            line,
            token: token.to_string(),
        }
        .into()
    })
}

fn vertex_id(line: usize, token: &str, value: i64) -> Result<VertexId> {
    VertexId::try_from(value).map_err(|_| {
        FormatError::InvalidToken {
            line,
            token: token.to_string(),
        }
        .into()
    })
}
