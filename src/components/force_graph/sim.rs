//! Iterative force layout.
//!
//! A self-contained simulation over an arena of node records, free of any
//! rendering concern so ticks are reproducible and testable on the native
//! host. Forces per tick, in order: link attraction, pairwise charge
//! repulsion, viewport centering, a soft generation spring on the vertical
//! axis, and pairwise collision separation. Energy follows the usual alpha
//! schedule: it decays toward `alpha_target` and the simulation reports
//! itself settled once it drops below `ALPHA_MIN` with no warm target.

pub const LINK_DISTANCE: f64 = 90.0;
pub const CHARGE_STRENGTH: f64 = -320.0;
pub const GENERATION_SCALE: f64 = 120.0;
pub const GENERATION_STRENGTH: f64 = 0.35;
pub const COLLIDE_MARGIN: f64 = 20.0;

const ALPHA_MIN: f64 = 0.001;
const VELOCITY_DECAY: f64 = 0.6;

#[derive(Clone, Debug)]
pub struct SimNode {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Pinned position while dragged; overrides force-driven movement.
	pub fixed: Option<(f64, f64)>,
	pub radius: f64,
	pub generation: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct SimLink {
	pub source: usize,
	pub target: usize,
}

#[derive(Clone, Debug)]
pub struct Simulation {
	pub nodes: Vec<SimNode>,
	links: Vec<SimLink>,
	degree: Vec<usize>,
	center: (f64, f64),
	alpha: f64,
	alpha_decay: f64,
	alpha_target: f64,
}

impl Simulation {
	pub fn new(nodes: Vec<SimNode>, links: Vec<SimLink>, center: (f64, f64)) -> Self {
		let mut degree = vec![0usize; nodes.len()];
		let links: Vec<SimLink> = links
			.into_iter()
			.filter(|l| l.source < nodes.len() && l.target < nodes.len())
			.collect();
		for l in &links {
			degree[l.source] += 1;
			degree[l.target] += 1;
		}
		Self {
			nodes,
			links,
			degree,
			center,
			alpha: 1.0,
			// ~300 ticks from 1.0 down to ALPHA_MIN.
			alpha_decay: 1.0 - ALPHA_MIN.powf(1.0 / 300.0),
			alpha_target: 0.0,
		}
	}

	pub fn set_center(&mut self, center: (f64, f64)) {
		self.center = center;
	}

	/// Warm target used while a drag is active; 0.0 lets the layout settle.
	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
		if target > 0.0 {
			self.alpha = self.alpha.max(target);
		}
	}

	pub fn is_settled(&self) -> bool {
		self.alpha < ALPHA_MIN && self.alpha_target < ALPHA_MIN
	}

	pub fn pin(&mut self, idx: usize, x: f64, y: f64) {
		if let Some(n) = self.nodes.get_mut(idx) {
			n.fixed = Some((x, y));
		}
	}

	pub fn unpin(&mut self, idx: usize) {
		if let Some(n) = self.nodes.get_mut(idx) {
			n.fixed = None;
		}
	}

	/// Advances one tick. Returns false when the layout has settled; the tick
	/// is then a no-op and callers may skip downstream work.
	pub fn step(&mut self) -> bool {
		if self.is_settled() {
			return false;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;

		self.apply_links();
		self.apply_charge();
		self.apply_center();
		self.apply_generation();
		self.integrate();
		self.apply_collide();
		true
	}

	fn apply_links(&mut self) {
		for l in &self.links {
			let (s, t) = (l.source, l.target);
			let (sx, sy, svx, svy) = {
				let n = &self.nodes[s];
				(n.x, n.y, n.vx, n.vy)
			};
			let (tx, ty, tvx, tvy) = {
				let n = &self.nodes[t];
				(n.x, n.y, n.vx, n.vy)
			};
			let mut dx = tx + tvx - sx - svx;
			let mut dy = ty + tvy - sy - svy;
			if dx == 0.0 && dy == 0.0 {
				(dx, dy) = jiggle(s + t);
			}
			let dist = (dx * dx + dy * dy).sqrt();
			let (ds, dt) = (self.degree[s].max(1), self.degree[t].max(1));
			let strength = 1.0 / ds.min(dt) as f64;
			let push = (dist - LINK_DISTANCE) / dist * self.alpha * strength;
			let bias = ds as f64 / (ds + dt) as f64;

			let n = &mut self.nodes[t];
			n.vx -= dx * push * bias;
			n.vy -= dy * push * bias;
			let n = &mut self.nodes[s];
			n.vx += dx * push * (1.0 - bias);
			n.vy += dy * push * (1.0 - bias);
		}
	}

	fn apply_charge(&mut self) {
		for i in 0..self.nodes.len() {
			for j in (i + 1)..self.nodes.len() {
				let mut dx = self.nodes[j].x - self.nodes[i].x;
				let mut dy = self.nodes[j].y - self.nodes[i].y;
				if dx == 0.0 && dy == 0.0 {
					(dx, dy) = jiggle(i + j);
				}
				let l2 = dx * dx + dy * dy;
				// Negative strength repels: push j along +d and i along -d.
				let w = CHARGE_STRENGTH * self.alpha / l2;
				self.nodes[j].vx -= dx * w;
				self.nodes[j].vy -= dy * w;
				self.nodes[i].vx += dx * w;
				self.nodes[i].vy += dy * w;
			}
		}
	}

	fn apply_center(&mut self) {
		if self.nodes.is_empty() {
			return;
		}
		let n = self.nodes.len() as f64;
		let (mut mx, mut my) = (0.0, 0.0);
		for node in &self.nodes {
			mx += node.x;
			my += node.y;
		}
		let (sx, sy) = (self.center.0 - mx / n, self.center.1 - my / n);
		for node in &mut self.nodes {
			node.x += sx;
			node.y += sy;
		}
	}

	fn apply_generation(&mut self) {
		for node in &mut self.nodes {
			let target = node.generation * GENERATION_SCALE;
			node.vy += (target - node.y) * GENERATION_STRENGTH * self.alpha;
		}
	}

	fn integrate(&mut self) {
		for node in &mut self.nodes {
			if let Some((fx, fy)) = node.fixed {
				node.x = fx;
				node.y = fy;
				node.vx = 0.0;
				node.vy = 0.0;
			} else {
				node.vx *= VELOCITY_DECAY;
				node.vy *= VELOCITY_DECAY;
				node.x += node.vx;
				node.y += node.vy;
			}
		}
	}

	/// Positional minimum-separation pass: overlapping pairs are pushed apart
	/// to `r_i + r_j + margin`. Pinned nodes stay put and act as obstacles.
	fn apply_collide(&mut self) {
		for i in 0..self.nodes.len() {
			for j in (i + 1)..self.nodes.len() {
				let min_dist = self.nodes[i].radius + self.nodes[j].radius + COLLIDE_MARGIN;
				let mut dx = self.nodes[j].x - self.nodes[i].x;
				let mut dy = self.nodes[j].y - self.nodes[i].y;
				if dx == 0.0 && dy == 0.0 {
					(dx, dy) = jiggle(i + j);
				}
				let dist = (dx * dx + dy * dy).sqrt();
				if dist >= min_dist {
					continue;
				}
				let overlap = min_dist - dist;
				let (ux, uy) = (dx / dist, dy / dist);
				match (self.nodes[i].fixed.is_some(), self.nodes[j].fixed.is_some()) {
					(true, true) => {}
					(true, false) => {
						self.nodes[j].x += ux * overlap;
						self.nodes[j].y += uy * overlap;
					}
					(false, true) => {
						self.nodes[i].x -= ux * overlap;
						self.nodes[i].y -= uy * overlap;
					}
					(false, false) => {
						let half = overlap / 2.0;
						self.nodes[j].x += ux * half;
						self.nodes[j].y += uy * half;
						self.nodes[i].x -= ux * half;
						self.nodes[i].y -= uy * half;
					}
				}
			}
		}
	}
}

/// Deterministic sub-pixel offset for coincident points.
fn jiggle(seed: usize) -> (f64, f64) {
	let s = (seed % 7) as f64 - 3.0;
	(1e-6 * (s + 0.5), 1e-6 * (0.5 - s))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sim_node(x: f64, y: f64, generation: f64) -> SimNode {
		SimNode {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			fixed: None,
			radius: 10.0,
			generation,
		}
	}

	fn chain(n: usize) -> Simulation {
		let nodes = (0..n)
			.map(|i| sim_node(50.0 + 30.0 * i as f64, 40.0 + 11.0 * (i % 3) as f64, i as f64))
			.collect();
		let links = (1..n)
			.map(|i| SimLink {
				source: i - 1,
				target: i,
			})
			.collect();
		Simulation::new(nodes, links, (400.0, 300.0))
	}

	fn run(sim: &mut Simulation, ticks: usize) {
		for _ in 0..ticks {
			sim.step();
		}
	}

	#[test]
	fn identical_runs_produce_identical_positions() {
		let (mut a, mut b) = (chain(8), chain(8));
		run(&mut a, 200);
		run(&mut b, 200);
		for (na, nb) in a.nodes.iter().zip(&b.nodes) {
			assert_eq!((na.x, na.y), (nb.x, nb.y));
		}
	}

	#[test]
	fn simulation_settles_and_reports_it() {
		let mut sim = chain(5);
		run(&mut sim, 400);
		assert!(sim.is_settled());
		let frozen: Vec<_> = sim.nodes.iter().map(|n| (n.x, n.y)).collect();
		assert!(!sim.step());
		for (n, &(x, y)) in sim.nodes.iter().zip(&frozen) {
			assert_eq!((n.x, n.y), (x, y));
		}
	}

	#[test]
	fn warm_target_keeps_the_simulation_live() {
		let mut sim = chain(5);
		run(&mut sim, 400);
		assert!(sim.is_settled());
		sim.set_alpha_target(0.3);
		assert!(!sim.is_settled());
		assert!(sim.step());
	}

	#[test]
	fn pinned_node_stays_exactly_where_pinned() {
		let mut sim = chain(6);
		sim.pin(2, 123.0, 45.0);
		run(&mut sim, 100);
		let n = &sim.nodes[2];
		assert_eq!((n.x, n.y), (123.0, 45.0));

		sim.unpin(2);
		sim.set_alpha_target(0.3);
		run(&mut sim, 50);
		let n = &sim.nodes[2];
		assert!((n.x, n.y) != (123.0, 45.0));
	}

	#[test]
	fn overlapping_nodes_separate_to_their_radii() {
		let mut nodes = vec![sim_node(100.0, 100.0, 0.0), sim_node(101.0, 100.0, 0.0)];
		nodes[0].radius = 20.0;
		nodes[1].radius = 30.0;
		let mut sim = Simulation::new(nodes, vec![], (100.0, 100.0));
		run(&mut sim, 300);

		let (a, b) = (&sim.nodes[0], &sim.nodes[1]);
		let dist = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
		assert!(
			dist >= 20.0 + 30.0 + COLLIDE_MARGIN - 1e-6,
			"nodes still overlap: {dist}"
		);
	}

	#[test]
	fn generations_order_vertically_at_rest() {
		let mut sim = chain(4);
		run(&mut sim, 400);
		for w in sim.nodes.windows(2) {
			assert!(
				w[0].y < w[1].y,
				"generation bias did not order rows: {} vs {}",
				w[0].y,
				w[1].y
			);
		}
	}

	#[test]
	fn out_of_range_links_are_dropped() {
		let sim = Simulation::new(
			vec![sim_node(0.0, 0.0, 0.0)],
			vec![SimLink {
				source: 0,
				target: 9,
			}],
			(0.0, 0.0),
		);
		assert_eq!(sim.degree, vec![0]);
	}
}
