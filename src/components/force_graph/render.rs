use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::GraphState;
use super::style::relation_styles;

const BACKGROUND: &str = "#FAF6EC";
const HALO_COLOR: &str = "#F3EEE3";
const HALO_EXTRA_WIDTH: f64 = 3.0;
const NODE_STROKE: &str = "#333";
const UNION_HALF_SIZE: f64 = 10.0;
/// Endpoint clearance past the target radius: room for the arrowhead on
/// directed edges, a smaller gap otherwise.
const DIRECTED_PAD: f64 = 10.0;
const UNDIRECTED_PAD: f64 = 6.0;
const ARROW_SIZE: f64 = 8.0;

/// Fraction of an edge to keep so its endpoint stops at `pad` short of the
/// target center. Clamped so the segment never extends behind its source.
pub fn shorten_ratio(dist: f64, pad: f64) -> f64 {
	if dist <= 0.0 {
		return 0.0;
	}
	((dist - pad) / dist).max(0.0)
}

/// Draws the whole scene from the current simulation positions. Pure with
/// respect to `state`; called once per animation frame.
pub fn render(state: &GraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

struct EdgeGeometry {
	x1: f64,
	y1: f64,
	x2: f64,
	y2: f64,
	ux: f64,
	uy: f64,
	directed: bool,
}

fn edge_geometry(state: &GraphState, edge_idx: usize) -> Option<EdgeGeometry> {
	let edge = &state.edges[edge_idx];
	let s = &state.sim.nodes[edge.source];
	let t = &state.sim.nodes[edge.target];
	let (dx, dy) = (t.x - s.x, t.y - s.y);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return None;
	}
	let directed = relation_styles().is_directed(&edge.relation);
	let pad = t.radius + if directed { DIRECTED_PAD } else { UNDIRECTED_PAD };
	let ratio = shorten_ratio(dist, pad);
	Some(EdgeGeometry {
		x1: s.x,
		y1: s.y,
		x2: s.x + dx * ratio,
		y2: s.y + dy * ratio,
		ux: dx / dist,
		uy: dy / dist,
		directed,
	})
}

fn draw_edges(state: &GraphState, ctx: &CanvasRenderingContext2d) {
	let styles = relation_styles();
	ctx.set_line_cap("round");

	// Halo pass first so every underlay sits beneath every colored edge.
	for i in 0..state.edges.len() {
		let Some(geo) = edge_geometry(state, i) else {
			continue;
		};
		let style = styles.style_for(&state.edges[i].relation);
		ctx.set_stroke_style_str(HALO_COLOR);
		ctx.set_line_width(style.width + HALO_EXTRA_WIDTH);
		ctx.set_global_alpha(0.65);
		ctx.begin_path();
		ctx.move_to(geo.x1, geo.y1);
		ctx.line_to(geo.x2, geo.y2);
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);

	for i in 0..state.edges.len() {
		let Some(geo) = edge_geometry(state, i) else {
			continue;
		};
		let style = styles.style_for(&state.edges[i].relation);

		ctx.set_stroke_style_str(style.color);
		ctx.set_line_width(style.width);
		ctx.set_global_alpha(0.95);
		let dash = js_sys::Array::new();
		if let Some(pattern) = style.dash {
			for &seg in pattern {
				dash.push(&JsValue::from_f64(seg));
			}
		}
		let _ = ctx.set_line_dash(&dash);
		ctx.begin_path();
		ctx.move_to(geo.x1, geo.y1);
		ctx.line_to(geo.x2, geo.y2);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		if geo.directed {
			// Constant apparent size regardless of zoom.
			let size = ARROW_SIZE / state.transform.k.max(0.1);
			let (tip_x, tip_y) = (geo.x2, geo.y2);
			let (back_x, back_y) = (tip_x - geo.ux * size, tip_y - geo.uy * size);
			let (px, py) = (-geo.uy * size * 0.5, geo.ux * size * 0.5);
			ctx.set_fill_style_str(style.color);
			ctx.begin_path();
			ctx.move_to(tip_x, tip_y);
			ctx.line_to(back_x + px, back_y + py);
			ctx.line_to(back_x - px, back_y - py);
			ctx.close_path();
			ctx.fill();
		}
	}
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &GraphState, ctx: &CanvasRenderingContext2d) {
	for (i, meta) in state.graph.nodes.iter().enumerate() {
		let n = &state.sim.nodes[i];

		if meta.is_union {
			// Structural marker, not an entity: a small rotated square.
			ctx.save();
			let _ = ctx.translate(n.x, n.y);
			let _ = ctx.rotate(PI / 4.0);
			ctx.set_fill_style_str(HALO_COLOR);
			ctx.fill_rect(
				-UNION_HALF_SIZE,
				-UNION_HALF_SIZE,
				UNION_HALF_SIZE * 2.0,
				UNION_HALF_SIZE * 2.0,
			);
			ctx.set_stroke_style_str(NODE_STROKE);
			ctx.set_line_width(1.5);
			ctx.stroke_rect(
				-UNION_HALF_SIZE,
				-UNION_HALF_SIZE,
				UNION_HALF_SIZE * 2.0,
				UNION_HALF_SIZE * 2.0,
			);
			ctx.restore();
			continue;
		}

		let r = n.radius;
		ctx.begin_path();
		let _ = ctx.arc(n.x, n.y, r, 0.0, 2.0 * PI);
		ctx.set_fill_style_str("#fff");
		ctx.fill();

		let portrait = state.images[i].as_ref().filter(|img| img.complete());
		if let Some(img) = portrait {
			ctx.save();
			ctx.begin_path();
			let _ = ctx.arc(n.x, n.y, r, 0.0, 2.0 * PI);
			ctx.clip();
			let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
				img,
				n.x - r,
				n.y - r,
				r * 2.0,
				r * 2.0,
			);
			ctx.restore();
		}

		ctx.begin_path();
		let _ = ctx.arc(n.x, n.y, r, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(NODE_STROKE);
		ctx.set_line_width(1.5);
		ctx.stroke();
		ctx.begin_path();
		let _ = ctx.arc(n.x, n.y, r, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str("rgba(0, 0, 0, 0.15)");
		ctx.set_line_width(1.0);
		ctx.stroke();

		if !meta.label.is_empty() {
			ctx.set_fill_style_str("#2F2117");
			ctx.set_font("12px serif");
			let _ = ctx.fill_text(&meta.label, n.x + r + 6.0, n.y + 4.0);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn shortening_never_goes_negative() {
		// Target radius larger than the whole edge.
		assert_eq!(shorten_ratio(10.0, 66.0), 0.0);
		assert_eq!(shorten_ratio(0.0, 5.0), 0.0);
	}

	#[test]
	fn shortening_trims_exactly_the_pad() {
		let ratio = shorten_ratio(100.0, 30.0);
		assert!((ratio - 0.7).abs() < 1e-9);
	}

	#[test]
	fn zero_pad_keeps_the_full_edge() {
		assert_eq!(shorten_ratio(42.0, 0.0), 1.0);
	}
}
