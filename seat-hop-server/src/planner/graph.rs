//! Overlap graph over route positions.
//!
//! A ticket for stations i..j can be boarded at any of i..j-1, so every
//! bookable segment contributes an edge p → j for each such p. Edges refer
//! back to their segment by index so a walk through the graph can be turned
//! into real bookings.

use crate::domain::Segment;

/// Directed edge to position `to`, travelled on `segments[segment]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapEdge {
    pub to: usize,
    pub segment: usize,
}

/// Adjacency over positions `0..n` of one route.
#[derive(Debug)]
pub struct OverlapGraph<'a> {
    segments: &'a [Segment],
    /// Outgoing edges per position, farthest target first.
    adjacency: Vec<Vec<OverlapEdge>>,
}

impl<'a> OverlapGraph<'a> {
    /// Build the graph for a route of `n` positions.
    ///
    /// At most one edge is kept per (p, q). When several segments offer
    /// the same hop, the one that actually starts at p wins; otherwise the
    /// first segment in the given order does. Segments that don't fit
    /// inside `0..n` are ignored.
    pub fn build(n: usize, segments: &'a [Segment]) -> Self {
        let mut adjacency: Vec<Vec<OverlapEdge>> = vec![Vec::new(); n];

        for (index, segment) in segments.iter().enumerate() {
            let (start, end) = (segment.span.start(), segment.span.end());
            if end >= n {
                continue;
            }

            for (p, edges) in adjacency.iter_mut().enumerate().take(end).skip(start) {
                match edges.iter_mut().find(|e| e.to == end) {
                    Some(existing) if p == start => existing.segment = index,
                    Some(_) => {}
                    None => edges.push(OverlapEdge {
                        to: end,
                        segment: index,
                    }),
                }
            }
        }

        for edges in &mut adjacency {
            edges.sort_by(|a, b| b.to.cmp(&a.to));
        }

        Self {
            segments,
            adjacency,
        }
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Outgoing edges from `position`, farthest first.
    pub fn edges_from(&self, position: usize) -> &[OverlapEdge] {
        self.adjacency
            .get(position)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The edge p → q, if any.
    pub fn edge(&self, from: usize, to: usize) -> Option<&OverlapEdge> {
        self.edges_from(from).iter().find(|e| e.to == to)
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// The segment behind an edge's back-reference.
    pub fn segment(&self, index: usize) -> Option<&'a Segment> {
        self.segments.get(index)
    }
}
