//! Enumeration of every booking path across the overlap graph.

use tracing::{debug, warn};

use crate::domain::{Path, Segment};

use super::graph::OverlapGraph;

/// DFS frame: where we are, what we've seen, and which segments got us here.
#[derive(Clone)]
struct Frame {
    position: usize,
    visited: Vec<bool>,
    trail: Vec<usize>,
}

/// Enumerate every simple path from position 0 to the last position.
///
/// Depth-first with an explicit stack; each branch carries its own copy of
/// the visited set. Farthest targets are explored first, so the earliest
/// paths found tend to be the shortest. Stops after `max_paths` paths.
///
/// Positions that cannot reach the last one are never entered, so every
/// branch ends in a path and the work is bounded by `max_paths` times the
/// route length.
pub fn enumerate_paths(graph: &OverlapGraph<'_>, max_paths: usize) -> Vec<Path> {
    let n = graph.len();
    let mut paths = Vec::new();
    if n < 2 {
        return paths;
    }
    let target = n - 1;

    let live = reaches_target(graph);
    if !live[0] {
        debug!(stations = n, "destination unreachable");
        return paths;
    }

    let mut visited = vec![false; n];
    visited[0] = true;
    let mut stack = vec![Frame {
        position: 0,
        visited,
        trail: Vec::new(),
    }];

    while let Some(frame) = stack.pop() {
        if frame.position == target {
            if let Some(path) = resolve(graph, &frame.trail) {
                paths.push(path);
                if paths.len() >= max_paths {
                    warn!(max_paths, "path enumeration truncated");
                    break;
                }
            }
            continue;
        }

        // Pushed nearest first so the farthest is popped first.
        for edge in graph.edges_from(frame.position).iter().rev() {
            if !live[edge.to] || frame.visited.get(edge.to).copied().unwrap_or(true) {
                continue;
            }
            let mut next = frame.clone();
            next.position = edge.to;
            next.visited[edge.to] = true;
            next.trail.push(edge.segment);
            stack.push(next);
        }
    }

    debug!(paths = paths.len(), "enumerated paths");
    paths
}

/// Which positions have some walk to the last position.
///
/// Edges only point forward, so one backward sweep settles every position.
fn reaches_target(graph: &OverlapGraph<'_>) -> Vec<bool> {
    let n = graph.len();
    let mut live = vec![false; n];
    if let Some(last) = live.last_mut() {
        *last = true;
    }
    for position in (0..n.saturating_sub(1)).rev() {
        live[position] = graph
            .edges_from(position)
            .iter()
            .any(|edge| live.get(edge.to).copied().unwrap_or(false));
    }
    live
}

/// Turn the segment indices of one walk into bookings.
///
/// Consecutive hops on the same segment are one booking. Returns `None`
/// when nothing resolves.
fn resolve(graph: &OverlapGraph<'_>, trail: &[usize]) -> Option<Path> {
    let mut indices = trail.to_vec();
    indices.dedup();

    let segments: Vec<Segment> = indices
        .iter()
        .filter_map(|&index| graph.segment(index))
        .cloned()
        .collect();

    Path::new(segments)
}
