use serde::Deserialize;

/// Broad class of an entity, used only for a small sizing boost and styling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeType {
	Primordial,
	Titan,
	Olympian,
	#[default]
	Other,
	Union,
}

impl NodeType {
	fn parse(s: &str) -> Self {
		match s {
			"primordial" => Self::Primordial,
			"titan" => Self::Titan,
			"olympian" => Self::Olympian,
			"union" => Self::Union,
			_ => Self::Other,
		}
	}
}

#[derive(Clone, Debug)]
pub struct GraphNode {
	pub id: String,
	pub label: String,
	pub kind: NodeType,
	/// Vertical rank hint; union nodes sit at the mean of their parents'.
	pub generation: f64,
	pub img: Option<String>,
	pub is_union: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	pub relation: String,
}

#[derive(Clone, Debug, Default)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

/// Wire format of `data/relations.json`. Every field beyond the ids is
/// optional; missing or malformed values default rather than fail.
#[derive(Clone, Debug, Deserialize)]
pub struct RawDataset {
	#[serde(default)]
	pub nodes: Vec<RawNode>,
	#[serde(default)]
	pub links: Vec<RawLink>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawNode {
	pub id: String,
	#[serde(default)]
	pub label: String,
	#[serde(default, rename = "type")]
	pub kind: Option<String>,
	#[serde(default)]
	pub generation: f64,
	#[serde(default)]
	pub img: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawLink {
	pub source: String,
	pub target: String,
	pub relation: String,
}

impl From<RawDataset> for GraphData {
	fn from(raw: RawDataset) -> Self {
		let nodes = raw
			.nodes
			.into_iter()
			.map(|n| GraphNode {
				id: n.id,
				label: n.label,
				kind: n.kind.as_deref().map(NodeType::parse).unwrap_or_default(),
				generation: n.generation,
				img: n.img,
				is_union: false,
			})
			.collect();
		let links = raw
			.links
			.into_iter()
			.map(|l| GraphLink {
				source: l.source,
				target: l.target,
				relation: l.relation,
			})
			.collect();
		Self { nodes, links }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sparse_json_defaults_instead_of_failing() {
		let raw: RawDataset = serde_json::from_str(
			r#"{
				"nodes": [
					{"id": "zeus", "label": "Zeus", "type": "olympian", "generation": 2},
					{"id": "chaos"},
					{"id": "styx", "type": "river-spirit"}
				],
				"links": [{"source": "chaos", "target": "zeus", "relation": "ancestor"}]
			}"#,
		)
		.unwrap();
		let g: GraphData = raw.into();

		assert_eq!(g.nodes[0].kind, NodeType::Olympian);
		assert_eq!(g.nodes[1].label, "");
		assert_eq!(g.nodes[1].generation, 0.0);
		assert_eq!(g.nodes[1].kind, NodeType::Other);
		// Unknown type strings degrade to Other.
		assert_eq!(g.nodes[2].kind, NodeType::Other);
		assert_eq!(g.links.len(), 1);
	}

	#[test]
	fn missing_sections_default_to_empty() {
		let raw: RawDataset = serde_json::from_str("{}").unwrap();
		let g: GraphData = raw.into();
		assert!(g.nodes.is_empty() && g.links.is_empty());
	}
}
