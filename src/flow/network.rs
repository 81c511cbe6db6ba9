//! Dinic max-flow over an adjacency-list flow network
//!
//! Edges are stored in a flat arena with forward and residual edges paired
//! at consecutive indices, so the reverse of edge `e` is always `e ^ 1`.
//! Augmenting replaces capacities in place; after `max_flow` the network
//! holds the residual graph, which `min_cut` walks to recover the
//! source side of a minimum cut.

use bitvec::vec::BitVec;
use std::collections::VecDeque;

use crate::io::error::{Result, invalid_parameter};

#[derive(Debug, Clone)]
struct Edge {
    from: usize,
    to: usize,
    capacity: i64,
}

/// A directed flow network with integer capacities
#[derive(Debug, Clone, Default)]
pub struct FlowNetwork {
    adjacency: Vec<Vec<usize>>,
    edges: Vec<Edge>,
}

impl FlowNetwork {
    /// Create a network with `node_count` nodes and no edges
    pub fn new(node_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
            edges: Vec::new(),
        }
    }

    /// Number of nodes in the network
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Add a directed edge with the given capacity
    ///
    /// A residual edge with zero capacity is added alongside it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AlgorithmError::InvalidParameter`] when an endpoint
    /// is out of range or the capacity is negative.
    pub fn add_edge(&mut self, from: usize, to: usize, capacity: i64) -> Result<()> {
        let node_count = self.node_count();
        if from >= node_count || to >= node_count {
            return Err(invalid_parameter(
                "edge",
                &format!("{from} -> {to}"),
                &format!("endpoint exceeds node count {node_count}"),
            ));
        }
        if capacity < 0 {
            return Err(invalid_parameter(
                "capacity",
                &capacity,
                &"capacity must be nonnegative",
            ));
        }

        let forward = self.edges.len();
        self.edges.push(Edge { from, to, capacity });
        self.edges.push(Edge {
            from: to,
            to: from,
            capacity: 0,
        });
        if let Some(list) = self.adjacency.get_mut(from) {
            list.push(forward);
        }
        if let Some(list) = self.adjacency.get_mut(to) {
            list.push(forward + 1);
        }
        Ok(())
    }

    /// Compute the maximum flow from `source` to `sink`
    ///
    /// Capacities are consumed: after this call the network holds the
    /// residual graph, and a second call returns zero.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AlgorithmError::InvalidParameter`] when `source` or
    /// `sink` is out of range or they coincide.
    pub fn max_flow(&mut self, source: usize, sink: usize) -> Result<i64> {
        let node_count = self.node_count();
        if source >= node_count || sink >= node_count {
            return Err(invalid_parameter(
                "terminals",
                &format!("source {source}, sink {sink}"),
                &format!("terminal exceeds node count {node_count}"),
            ));
        }
        if source == sink {
            return Err(invalid_parameter(
                "terminals",
                &source,
                &"source and sink must differ",
            ));
        }

        let mut total = 0;
        loop {
            let levels = self.level_graph(source);
            if levels.get(sink).copied().flatten().is_none() {
                break;
            }
            let mut cursor = vec![0usize; node_count];
            total += self.blocking_flow(source, sink, &levels, &mut cursor);
        }
        Ok(total)
    }

    /// Compute the max-flow value and the source side of a minimum cut
    ///
    /// The returned bitset marks the nodes reachable from `source` in the
    /// residual graph; by max-flow/min-cut duality the edges leaving that
    /// set form a minimum cut whose capacity equals the flow value.
    ///
    /// # Errors
    ///
    /// Propagates the terminal validation errors of [`Self::max_flow`].
    pub fn min_cut(&mut self, source: usize, sink: usize) -> Result<(i64, BitVec)> {
        let flow = self.max_flow(source, sink)?;

        let mut reachable: BitVec = BitVec::repeat(false, self.node_count());
        let mut queue = VecDeque::from([source]);
        if let Some(mut bit) = reachable.get_mut(source) {
            *bit = true;
        }
        while let Some(node) = queue.pop_front() {
            for &edge_id in self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[]) {
                let (to, capacity) = self.edge_target(edge_id);
                if capacity > 0 && !reachable.get(to).is_some_and(|bit| *bit) {
                    if let Some(mut bit) = reachable.get_mut(to) {
                        *bit = true;
                    }
                    queue.push_back(to);
                }
            }
        }

        Ok((flow, reachable))
    }

    // Breadth-first levels over positive-capacity edges.
    fn level_graph(&self, source: usize) -> Vec<Option<u32>> {
        let mut levels: Vec<Option<u32>> = vec![None; self.node_count()];
        if let Some(level) = levels.get_mut(source) {
            *level = Some(0);
        }
        let mut queue = VecDeque::from([source]);
        while let Some(node) = queue.pop_front() {
            let Some(node_level) = levels.get(node).copied().flatten() else {
                continue;
            };
            for &edge_id in self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[]) {
                let (to, capacity) = self.edge_target(edge_id);
                if capacity > 0 {
                    if let Some(level) = levels.get_mut(to) {
                        if level.is_none() {
                            *level = Some(node_level + 1);
                            queue.push_back(to);
                        }
                    }
                }
            }
        }
        levels
    }

    // Iterative blocking flow along the level graph. The cursor array
    // remembers, per node, how many outgoing edges have been ruled out for
    // this phase, so the search never rescans a dead edge.
    fn blocking_flow(
        &mut self,
        source: usize,
        sink: usize,
        levels: &[Option<u32>],
        cursor: &mut [usize],
    ) -> i64 {
        let mut total = 0;
        let mut path: Vec<usize> = Vec::new();
        let mut node = source;

        loop {
            if node == sink {
                let bottleneck = path
                    .iter()
                    .map(|&edge_id| self.edge_target(edge_id).1)
                    .min()
                    .unwrap_or(0);
                for &edge_id in &path {
                    if let Some(edge) = self.edges.get_mut(edge_id) {
                        edge.capacity -= bottleneck;
                    }
                    if let Some(edge) = self.edges.get_mut(edge_id ^ 1) {
                        edge.capacity += bottleneck;
                    }
                }
                total += bottleneck;
                path.clear();
                node = source;
                continue;
            }

            let mut advanced = false;
            while let Some(&edge_id) = self
                .adjacency
                .get(node)
                .and_then(|list| list.get(cursor.get(node).copied().unwrap_or(usize::MAX)))
            {
                let (to, capacity) = self.edge_target(edge_id);
                let one_level_down = match (
                    levels.get(node).copied().flatten(),
                    levels.get(to).copied().flatten(),
                ) {
                    (Some(here), Some(there)) => there == here + 1,
                    _ => false,
                };
                if capacity > 0 && one_level_down {
                    path.push(edge_id);
                    node = to;
                    advanced = true;
                    break;
                }
                if let Some(position) = cursor.get_mut(node) {
                    *position += 1;
                }
            }

            if !advanced {
                let Some(edge_id) = path.pop() else {
                    break;
                };
                node = self.edges.get(edge_id).map_or(source, |edge| edge.from);
                if let Some(position) = cursor.get_mut(node) {
                    *position += 1;
                }
            }
        }

        total
    }

    fn edge_target(&self, edge_id: usize) -> (usize, i64) {
        self.edges
            .get(edge_id)
            .map_or((0, 0), |edge| (edge.to, edge.capacity))
    }
}
