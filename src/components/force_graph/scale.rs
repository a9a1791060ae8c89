//! Degree-based node sizing.
//!
//! Radius is derived, never stored: weighted degree over the transformed link
//! set, mapped through a square-root scale so visual area (not radius) tracks
//! degree.

use std::collections::HashMap;

use super::types::{GraphData, NodeType};

/// Weight each incident link endpoint contributes to a node's degree.
pub const LINK_WEIGHT: f64 = 1.5;

/// Rendered radius bounds, in world units.
pub const RADIUS_RANGE: (f64, f64) = (10.0, 56.0);

/// Square-root interpolation from a degree extent onto a radius range.
#[derive(Clone, Copy, Debug)]
pub struct SqrtScale {
	domain: (f64, f64),
	range: (f64, f64),
}

impl SqrtScale {
	pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
		Self { domain, range }
	}

	pub fn map(&self, v: f64) -> f64 {
		let (d0, d1) = (self.domain.0.max(0.0).sqrt(), self.domain.1.max(0.0).sqrt());
		if d1 <= d0 {
			return self.range.0;
		}
		let t = (v.max(0.0).sqrt() - d0) / (d1 - d0);
		self.range.0 + t * (self.range.1 - self.range.0)
	}
}

/// Weighted degree per node id: every incident link endpoint counts
/// [`LINK_WEIGHT`], regardless of direction or relation kind.
pub fn weighted_degrees(g: &GraphData) -> HashMap<String, f64> {
	let mut degree: HashMap<String, f64> = g.nodes.iter().map(|n| (n.id.clone(), 0.0)).collect();
	for l in &g.links {
		for end in [&l.source, &l.target] {
			*degree.entry(end.clone()).or_insert(0.0) += LINK_WEIGHT;
		}
	}
	degree
}

fn type_boost(kind: NodeType) -> f64 {
	match kind {
		NodeType::Primordial | NodeType::Titan | NodeType::Olympian => 1.0,
		NodeType::Other | NodeType::Union => 0.0,
	}
}

/// Per-node radii for the whole graph, in node order.
pub fn node_radii(g: &GraphData) -> Vec<f64> {
	let degree = weighted_degrees(g);
	let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
	for &d in degree.values() {
		lo = lo.min(d);
		hi = hi.max(d);
	}
	if !lo.is_finite() {
		(lo, hi) = (0.0, 0.0);
	}
	let scale = SqrtScale::new((lo, hi), RADIUS_RANGE);

	g.nodes
		.iter()
		.map(|n| {
			let d = degree.get(&n.id).copied().unwrap_or(0.0);
			scale.map(d + type_boost(n.kind))
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphLink, GraphNode};

	fn graph(link_counts: &[usize]) -> GraphData {
		// Node i gets link_counts[i] self-distinct links to a shared hub.
		let mut nodes: Vec<GraphNode> = (0..link_counts.len())
			.map(|i| GraphNode {
				id: format!("n{i}"),
				label: String::new(),
				kind: NodeType::Other,
				generation: 0.0,
				img: None,
				is_union: false,
			})
			.collect();
		nodes.push(GraphNode {
			id: "hub".into(),
			label: String::new(),
			kind: NodeType::Other,
			generation: 0.0,
			img: None,
			is_union: false,
		});
		let links = link_counts
			.iter()
			.enumerate()
			.flat_map(|(i, &c)| {
				(0..c).map(move |_| GraphLink {
					source: format!("n{i}"),
					target: "hub".into(),
					relation: "ally".into(),
				})
			})
			.collect();
		GraphData { nodes, links }
	}

	#[test]
	fn radius_is_monotonic_in_weighted_degree() {
		let g = graph(&[1, 2, 5, 9]);
		let radii = node_radii(&g);
		for w in radii.windows(2) {
			assert!(w[0] <= w[1], "radii not monotonic: {radii:?}");
		}
	}

	#[test]
	fn radii_stay_inside_the_range() {
		let g = graph(&[0, 1, 30]);
		for r in node_radii(&g) {
			assert!((RADIUS_RANGE.0..=RADIUS_RANGE.1).contains(&r));
		}
	}

	#[test]
	fn degenerate_extent_maps_to_range_start() {
		let scale = SqrtScale::new((3.0, 3.0), RADIUS_RANGE);
		assert_eq!(scale.map(3.0), RADIUS_RANGE.0);

		// An edgeless graph sizes every node at the minimum.
		let g = graph(&[0, 0]);
		assert!(node_radii(&g).iter().all(|&r| r == RADIUS_RANGE.0));
	}

	#[test]
	fn each_endpoint_counts_the_fixed_weight() {
		let g = graph(&[2]);
		let deg = weighted_degrees(&g);
		assert_eq!(deg["n0"], 2.0 * LINK_WEIGHT);
		assert_eq!(deg["hub"], 2.0 * LINK_WEIGHT);
	}

	#[test]
	fn sqrt_scale_midpoint_tracks_area_not_radius() {
		let scale = SqrtScale::new((0.0, 4.0), (0.0, 10.0));
		// sqrt(1)/sqrt(4) = 0.5 of the range.
		assert!((scale.map(1.0) - 5.0).abs() < 1e-9);
	}
}
