use std::collections::HashMap;
use std::f64::consts::PI;

use web_sys::HtmlImageElement;

use super::scale;
use super::sim::{SimLink, SimNode, Simulation};
use super::types::GraphData;

/// Minimum pointer hit radius so sparse nodes stay clickable.
pub const HIT_RADIUS_MIN: f64 = 12.0;

/// Seconds the layout is left to settle before the one-shot zoom-to-fit.
const FIT_DELAY: f64 = 0.7;
const FIT_DURATION: f64 = 0.5;
const FIT_PADDING: f64 = 50.0;

/// Alpha target while a node is being dragged.
const DRAG_ALPHA_TARGET: f64 = 0.3;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub moved: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug)]
struct FitAnim {
	from: ViewTransform,
	to: ViewTransform,
	t: f64,
}

/// An edge with endpoints resolved to arena indices. Links whose endpoints
/// did not resolve are dropped at construction, so the renderer never
/// re-checks them.
#[derive(Clone, Debug)]
pub struct ResolvedEdge {
	pub source: usize,
	pub target: usize,
	pub relation: String,
}

pub struct GraphState {
	pub sim: Simulation,
	/// Transformed graph; node order matches the simulation arena.
	pub graph: GraphData,
	pub edges: Vec<ResolvedEdge>,
	pub radii: Vec<f64>,
	pub images: Vec<Option<HtmlImageElement>>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	fit_elapsed: f64,
	fit_done: bool,
	fit_anim: Option<FitAnim>,
}

impl GraphState {
	/// Builds session state from an already-transformed graph. The transform
	/// pass has fully completed by the time this runs; layout and rendering
	/// never observe a partial dataset.
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let radii = scale::node_radii(data);

		let id_to_idx: HashMap<&str, usize> = data
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.as_str(), i))
			.collect();

		let count = data.nodes.len().max(1) as f64;
		let sim_nodes: Vec<SimNode> = data
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| {
				let angle = (i as f64) * 2.0 * PI / count;
				SimNode {
					x: width / 2.0 + 100.0 * angle.cos(),
					y: height / 2.0 + 100.0 * angle.sin(),
					vx: 0.0,
					vy: 0.0,
					fixed: None,
					radius: radii[i],
					generation: n.generation,
				}
			})
			.collect();

		let mut edges = Vec::new();
		let mut sim_links = Vec::new();
		for l in &data.links {
			match (id_to_idx.get(l.source.as_str()), id_to_idx.get(l.target.as_str())) {
				(Some(&s), Some(&t)) => {
					edges.push(ResolvedEdge {
						source: s,
						target: t,
						relation: l.relation.clone(),
					});
					sim_links.push(SimLink { source: s, target: t });
				}
				_ => {
					log::warn!(
						"dropping link with unresolved endpoint: {} -> {} ({})",
						l.source,
						l.target,
						l.relation
					);
				}
			}
		}

		let images = data
			.nodes
			.iter()
			.map(|n| {
				n.img.as_deref().and_then(|src| {
					let img = HtmlImageElement::new().ok()?;
					img.set_src(src);
					Some(img)
				})
			})
			.collect();

		Self {
			sim: Simulation::new(sim_nodes, sim_links, (width / 2.0, height / 2.0)),
			graph: data.clone(),
			edges,
			radii,
			images,
			transform: ViewTransform {
				x: 0.0,
				y: 0.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			width,
			height,
			fit_elapsed: 0.0,
			fit_done: false,
			fit_anim: None,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		for (i, n) in self.sim.nodes.iter().enumerate() {
			let (dx, dy) = (n.x - gx, n.y - gy);
			if (dx * dx + dy * dy).sqrt() < n.radius.max(HIT_RADIUS_MIN) {
				found = Some(i);
			}
		}
		found
	}

	pub fn begin_drag(&mut self, idx: usize, sx: f64, sy: f64) {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.drag = DragState {
			active: true,
			node_idx: Some(idx),
			start_x: sx,
			start_y: sy,
			moved: 0.0,
		};
		self.cancel_fit_animation();
		self.sim.set_alpha_target(DRAG_ALPHA_TARGET);
		self.sim.pin(idx, gx, gy);
	}

	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		if let Some(idx) = self.drag.node_idx {
			self.drag.moved +=
				(sx - self.drag.start_x).abs() + (sy - self.drag.start_y).abs();
			let (gx, gy) = self.screen_to_graph(sx, sy);
			self.sim.pin(idx, gx, gy);
		}
	}

	/// Releases the dragged node back to the simulation.
	pub fn end_drag(&mut self) {
		if let Some(idx) = self.drag.node_idx {
			self.sim.unpin(idx);
		}
		self.sim.set_alpha_target(0.0);
		self.drag = DragState::default();
	}

	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		self.cancel_fit_animation();
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn cancel_fit_animation(&mut self) {
		self.fit_anim = None;
	}

	/// One animation-frame tick: advance the simulation and the one-shot
	/// zoom-to-fit schedule. Never blocks; settled ticks are cheap.
	pub fn tick(&mut self, dt: f64) {
		self.sim.step();

		self.fit_elapsed += dt;
		if !self.fit_done && self.fit_elapsed >= FIT_DELAY {
			self.fit_done = true;
			if let Some(to) = self.fit_transform() {
				self.fit_anim = Some(FitAnim {
					from: self.transform.clone(),
					to,
					t: 0.0,
				});
			}
		}

		if let Some(anim) = &mut self.fit_anim {
			anim.t = (anim.t + dt / FIT_DURATION).min(1.0);
			let e = ease_out_cubic(anim.t);
			self.transform = ViewTransform {
				x: anim.from.x + (anim.to.x - anim.from.x) * e,
				y: anim.from.y + (anim.to.y - anim.from.y) * e,
				k: anim.from.k + (anim.to.k - anim.from.k) * e,
			};
			if anim.t >= 1.0 {
				self.fit_anim = None;
			}
		}
	}

	/// Bounding box of the rendered content (positions padded by radius).
	pub fn content_bounds(&self) -> Option<(f64, f64, f64, f64)> {
		let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
		let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
		for n in &self.sim.nodes {
			min_x = min_x.min(n.x - n.radius);
			min_y = min_y.min(n.y - n.radius);
			max_x = max_x.max(n.x + n.radius);
			max_y = max_y.max(n.y + n.radius);
		}
		min_x.is_finite().then_some((min_x, min_y, max_x, max_y))
	}

	fn fit_transform(&self) -> Option<ViewTransform> {
		fit_transform(self.content_bounds()?, self.width, self.height)
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.sim.set_center((width / 2.0, height / 2.0));
	}
}

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

/// View transform that centers `bounds` in a `width`×`height` viewport with
/// fixed padding. Degenerate bounds yield `None` and the fit is skipped.
pub fn fit_transform(
	bounds: (f64, f64, f64, f64),
	width: f64,
	height: f64,
) -> Option<ViewTransform> {
	let (min_x, min_y, max_x, max_y) = bounds;
	let bw = (max_x - min_x) + FIT_PADDING * 2.0;
	let bh = (max_y - min_y) + FIT_PADDING * 2.0;
	if bw <= 0.0 || bh <= 0.0 || width <= 0.0 || height <= 0.0 {
		return None;
	}
	let k = (width / bw).min(height / bh);
	Some(ViewTransform {
		x: width / 2.0 - k * (min_x + (max_x - min_x) / 2.0),
		y: height / 2.0 - k * (min_y + (max_y - min_y) / 2.0),
		k,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::transform::build_union_graph;
	use crate::components::force_graph::types::{GraphLink, GraphNode, NodeType};

	fn graph() -> GraphData {
		let node = |id: &str| GraphNode {
			id: id.into(),
			label: id.into(),
			kind: NodeType::Other,
			generation: 0.0,
			img: None,
			is_union: false,
		};
		build_union_graph(GraphData {
			nodes: vec![node("A"), node("B"), node("C")],
			links: vec![
				GraphLink {
					source: "A".into(),
					target: "C".into(),
					relation: "parent".into(),
				},
				GraphLink {
					source: "B".into(),
					target: "C".into(),
					relation: "parent".into(),
				},
				GraphLink {
					source: "A".into(),
					target: "ghost".into(),
					relation: "ally".into(),
				},
			],
		})
	}

	#[test]
	fn unresolved_endpoints_are_dropped_at_the_boundary() {
		let state = GraphState::new(&graph(), 800.0, 600.0);
		// A->ghost is gone; the three rerouted family edges remain.
		assert_eq!(state.edges.len(), 3);
		assert!(
			state
				.edges
				.iter()
				.all(|e| e.source < state.graph.nodes.len() && e.target < state.graph.nodes.len())
		);
	}

	#[test]
	fn arena_order_matches_graph_order() {
		let state = GraphState::new(&graph(), 800.0, 600.0);
		assert_eq!(state.sim.nodes.len(), state.graph.nodes.len());
		assert_eq!(state.radii.len(), state.graph.nodes.len());
	}

	#[test]
	fn fit_centers_and_scales_with_padding() {
		let t = fit_transform((0.0, 0.0, 100.0, 100.0), 400.0, 400.0).unwrap();
		// 100 of content + 2*50 padding fills the 400px viewport.
		assert!((t.k - 2.0).abs() < 1e-9);
		assert!((t.x - (200.0 - 2.0 * 50.0)).abs() < 1e-9);
		assert!((t.y - t.x).abs() < 1e-9);
	}

	#[test]
	fn fit_skips_degenerate_viewport() {
		assert!(fit_transform((0.0, 0.0, 10.0, 10.0), 0.0, 400.0).is_none());
	}

	#[test]
	fn empty_graph_has_no_bounds() {
		let state = GraphState::new(&GraphData::default(), 800.0, 600.0);
		assert!(state.content_bounds().is_none());
	}

	#[test]
	fn drag_pins_then_release_returns_control() {
		let mut state = GraphState::new(&graph(), 800.0, 600.0);
		state.begin_drag(0, 10.0, 10.0);
		state.drag_to(40.0, 10.0);
		let (gx, gy) = state.screen_to_graph(40.0, 10.0);
		assert_eq!(state.sim.nodes[0].fixed, Some((gx, gy)));
		assert!(state.drag.moved > 0.0);

		state.end_drag();
		assert!(state.sim.nodes[0].fixed.is_none());
		assert!(!state.drag.active);
	}
}
