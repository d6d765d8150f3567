//! Minimum cost flow with node demands.
//!
//! Demands are turned into a max-flow problem between an extra source that feeds
//! every supplying node and an extra sink fed by every demanding node. Successive
//! shortest paths then push the required amount, always along the cheapest
//! residual path. Dijkstra runs on reduced costs so the potentials have to stay
//! valid after every augmentation, which is why unreached nodes get the distance
//! of the sink.
//!
//! All edge costs must be non-negative. Iteration follows insertion order and
//! equal distances are resolved towards the smaller node index, so the result
//! only depends on the order in which the graph was built.

use alloc::collections::BinaryHeap;
use core::cmp::Reverse;

use crate::error::FlowError;

pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(usize);

#[derive(Debug, Clone, Copy)]
struct Edge {
    from: NodeId,
    to: NodeId,
    capacity: i64,
    cost: i64,
}

#[derive(Debug, Clone, Copy)]
struct Arc {
    to: NodeId,
    residual: i64,
    cost: i64,
}

/// A min cost flow problem. Build it, then call [`MinCostFlow::solve`].
#[derive(Debug, Clone, Default)]
pub struct MinCostFlow {
    demands: Vec<i64>,
    edges: Vec<Edge>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSolution {
    cost: i64,
    flows: Vec<i64>,
}

impl FlowSolution {
    #[must_use]
    pub const fn cost(&self) -> i64 {
        self.cost
    }

    #[must_use]
    pub fn flow(&self, edge: EdgeId) -> i64 {
        self.flows[edge.0]
    }
}

impl MinCostFlow {
    #[must_use]
    pub fn new(node_count: usize) -> Self {
        Self {
            demands: vec![0; node_count],
            edges: Vec::new(),
        }
    }

    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.demands.len()
    }

    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Positive demand consumes flow, negative demand supplies it.
    pub fn set_demand(&mut self, node: NodeId, demand: i64) {
        self.demands[node] = demand;
    }

    pub fn add_edge(&mut self, from: NodeId, to: NodeId, capacity: i64, cost: i64) -> EdgeId {
        debug_assert!(from < self.node_count() && to < self.node_count());
        debug_assert!(capacity >= 0, "negative capacity");
        debug_assert!(cost >= 0, "negative cost");
        self.edges.push(Edge {
            from,
            to,
            capacity,
            cost,
        });
        EdgeId(self.edges.len() - 1)
    }

    pub fn solve(&self) -> Result<FlowSolution, FlowError> {
        let balance: i64 = self.demands.iter().sum();
        if balance != 0 {
            return Err(FlowError::Unbalanced(balance));
        }

        let mut network = Residual::new(self.node_count() + 2);
        // forward arc of edge i is 2 * i, its reverse 2 * i + 1
        for edge in &self.edges {
            network.add_arc(edge.from, edge.to, edge.capacity, edge.cost);
        }
        let source = self.node_count();
        let sink = source + 1;
        let mut required = 0;
        for (node, &demand) in self.demands.iter().enumerate() {
            if demand < 0 {
                network.add_arc(source, node, -demand, 0);
            } else if demand > 0 {
                network.add_arc(node, sink, demand, 0);
                required += demand;
            }
        }

        let routed = network.augment(source, sink, required);
        if routed < required {
            return Err(FlowError::Infeasible { routed, required });
        }

        let flows: Vec<i64> = (0..self.edges.len())
            .map(|index| network.arcs[2 * index + 1].residual)
            .collect();
        let cost = self
            .edges
            .iter()
            .zip(&flows)
            .map(|(edge, flow)| edge.cost * flow)
            .sum();
        Ok(FlowSolution { cost, flows })
    }
}

struct Residual {
    arcs: Vec<Arc>,
    adjacency: Vec<Vec<usize>>,
}

impl Residual {
    fn new(node_count: usize) -> Self {
        Self {
            arcs: Vec::new(),
            adjacency: vec![Vec::new(); node_count],
        }
    }

    fn add_arc(&mut self, from: NodeId, to: NodeId, capacity: i64, cost: i64) {
        self.adjacency[from].push(self.arcs.len());
        self.arcs.push(Arc {
            to,
            residual: capacity,
            cost,
        });
        self.adjacency[to].push(self.arcs.len());
        self.arcs.push(Arc {
            to: from,
            residual: 0,
            cost: -cost,
        });
    }

    /// Pushes up to `limit` units from `source` to `sink`, returns how much got through.
    fn augment(&mut self, source: NodeId, sink: NodeId, limit: i64) -> i64 {
        let node_count = self.adjacency.len();
        let mut potential = vec![0_i64; node_count];
        let mut routed = 0;

        while routed < limit {
            let (distance, parent) = self.shortest_paths(source, &potential);
            let Some(sink_distance) = distance[sink] else {
                break;
            };
            for (node, reached) in distance.iter().enumerate() {
                potential[node] += reached.map_or(sink_distance, |d| d.min(sink_distance));
            }

            let mut amount = limit - routed;
            let mut node = sink;
            while let Some(arc) = parent[node] {
                amount = amount.min(self.arcs[arc].residual);
                node = self.arcs[arc ^ 1].to;
            }
            let mut node = sink;
            while let Some(arc) = parent[node] {
                self.arcs[arc].residual -= amount;
                self.arcs[arc ^ 1].residual += amount;
                node = self.arcs[arc ^ 1].to;
            }
            routed += amount;
        }
        routed
    }

    fn shortest_paths(
        &self,
        source: NodeId,
        potential: &[i64],
    ) -> (Vec<Option<i64>>, Vec<Option<usize>>) {
        let node_count = self.adjacency.len();
        let mut distance: Vec<Option<i64>> = vec![None; node_count];
        let mut parent: Vec<Option<usize>> = vec![None; node_count];
        let mut done = vec![false; node_count];
        let mut heap = BinaryHeap::new();

        distance[source] = Some(0);
        heap.push(Reverse((0_i64, source)));
        while let Some(Reverse((dist, node))) = heap.pop() {
            if done[node] {
                continue;
            }
            done[node] = true;
            for &arc_index in &self.adjacency[node] {
                let arc = self.arcs[arc_index];
                if arc.residual <= 0 || done[arc.to] {
                    continue;
                }
                let reduced = arc.cost + potential[node] - potential[arc.to];
                debug_assert!(reduced >= 0, "potentials lost feasibility");
                let candidate = dist + reduced;
                if distance[arc.to].is_none_or(|current| candidate < current) {
                    distance[arc.to] = Some(candidate);
                    parent[arc.to] = Some(arc_index);
                    heap.push(Reverse((candidate, arc.to)));
                }
            }
        }
        (distance, parent)
    }
}
