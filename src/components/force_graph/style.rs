use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Visual style for one relation kind. All fields borrow from the static
/// tables below; the registry never changes after startup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelationStyle {
	pub color: &'static str,
	pub width: f64,
	pub dash: Option<&'static [f64]>,
	pub label: &'static str,
}

/// Neutral style for relation kinds nobody registered. Unknown kinds render
/// dashed grey instead of failing.
pub const FALLBACK_STYLE: RelationStyle = RelationStyle {
	color: "#777",
	width: 2.4,
	dash: Some(&[4.0, 4.0]),
	label: "",
};

// High-contrast "oil painting" palette.
#[rustfmt::skip]
const STYLE_TABLE: &[(&str, RelationStyle)] = &[
	// Lineage (earths)
	("parent",      RelationStyle { color: "#6B3F2A", width: 4.2, dash: None,                  label: "Parent → child" }),
	("child",       RelationStyle { color: "#C08A4D", width: 2.8, dash: None,                  label: "Child (inverse, avoid storing)" }),
	("ancestor",    RelationStyle { color: "#2F2117", width: 3.0, dash: Some(&[1.0, 6.0]),     label: "Ancestor (abstract)" }),
	("sibling",     RelationStyle { color: "#2F6B4F", width: 2.6, dash: Some(&[6.0, 3.0]),     label: "Siblings" }),
	("twin",        RelationStyle { color: "#6D8F74", width: 2.4, dash: Some(&[2.0, 3.0]),     label: "Twins" }),
	// Romance & marriage (reds/purples)
	("spouse",      RelationStyle { color: "#8B1E2D", width: 3.2, dash: Some(&[10.0, 4.0]),    label: "Spouse" }),
	("consort",     RelationStyle { color: "#B04A2F", width: 2.8, dash: Some(&[8.0, 4.0]),     label: "Consort" }),
	("lover",       RelationStyle { color: "#B0476B", width: 2.6, dash: Some(&[3.0, 4.0]),     label: "Lovers" }),
	("affair",      RelationStyle { color: "#6E3B5E", width: 2.6, dash: Some(&[2.0, 6.0]),     label: "Affair" }),
	("rape",        RelationStyle { color: "#4A0F16", width: 5.2, dash: Some(&[14.0, 6.0]),    label: "Non-consensual union" }),
	("union",       RelationStyle { color: "#2F6B4F", width: 2.6, dash: Some(&[2.0, 6.0]),     label: "Union (parents → union)" }),
	// Creation & origin (blues)
	("raised",      RelationStyle { color: "#1F4E79", width: 3.0, dash: None,                  label: "Raised" }),
	("born_from",   RelationStyle { color: "#4E7FA6", width: 2.8, dash: Some(&[4.0, 3.0]),     label: "Born from" }),
	("fashioned",   RelationStyle { color: "#2F3E4E", width: 2.8, dash: Some(&[1.0, 4.0]),     label: "Fashioned / crafted" }),
	// Conflict & power (darks/steel)
	("overthrew",   RelationStyle { color: "#7A2E1A", width: 4.8, dash: None,                  label: "Overthrew" }),
	("killed",      RelationStyle { color: "#1E1414", width: 6.0, dash: None,                  label: "Killed" }),
	("punished",    RelationStyle { color: "#2B2E6B", width: 4.0, dash: Some(&[10.0, 5.0]),    label: "Punished" }),
	("enemy",       RelationStyle { color: "#5A5A5A", width: 3.2, dash: Some(&[3.0, 3.0]),     label: "Enemies" }),
	("ally",        RelationStyle { color: "#3C7F77", width: 2.8, dash: None,                  label: "Allies" }),
	// Favor & guidance (golds)
	("mentor",      RelationStyle { color: "#9C7A2F", width: 2.8, dash: None,                  label: "Mentor" }),
	("patron",      RelationStyle { color: "#C2A13B", width: 3.0, dash: None,                  label: "Patron" }),
	("blessed",     RelationStyle { color: "#E0C36A", width: 2.8, dash: Some(&[2.0, 3.0]),     label: "Blessed" }),
	("cursed",      RelationStyle { color: "#3F2C4D", width: 4.2, dash: Some(&[6.0, 3.0]),     label: "Cursed" }),
	// Mythic events
	("transformed", RelationStyle { color: "#1F6A5B", width: 3.2, dash: Some(&[7.0, 4.0]),     label: "Transformed" }),
	("imprisoned",  RelationStyle { color: "#3C3F45", width: 4.6, dash: Some(&[2.0, 3.0]),     label: "Imprisoned" }),
	("freed",       RelationStyle { color: "#88BDA2", width: 3.0, dash: Some(&[2.0, 6.0]),     label: "Freed" }),
];

/// Relation kinds drawn with an arrowhead.
const DIRECTED: &[&str] = &[
	"parent",
	"created",
	"fashioned",
	"killed",
	"punished",
	"cursed",
	"blessed",
	"mentor",
	"patron",
	"overthrew",
	"freed",
	"raised",
	"imprisoned",
];

/// Read-only registry mapping relation kinds to styles and directionality.
pub struct RelationStyles {
	styles: HashMap<&'static str, RelationStyle>,
	directed: HashSet<&'static str>,
}

impl RelationStyles {
	fn new() -> Self {
		Self {
			styles: STYLE_TABLE.iter().copied().collect(),
			directed: DIRECTED.iter().copied().collect(),
		}
	}

	pub fn style_for(&self, relation: &str) -> &RelationStyle {
		self.styles.get(relation).unwrap_or(&FALLBACK_STYLE)
	}

	pub fn is_directed(&self, relation: &str) -> bool {
		self.directed.contains(relation)
	}
}

static REGISTRY: LazyLock<RelationStyles> = LazyLock::new(RelationStyles::new);

/// The process-wide registry, built on first use and immutable afterwards.
pub fn relation_styles() -> &'static RelationStyles {
	&REGISTRY
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn known_relation_resolves_registered_style() {
		let s = relation_styles().style_for("parent");
		assert_eq!(s.color, "#6B3F2A");
		assert!(s.dash.is_none());
	}

	#[test]
	fn unknown_relation_falls_back_to_neutral() {
		let s = relation_styles().style_for("prophesied");
		assert_eq!(*s, FALLBACK_STYLE);
	}

	#[test]
	fn directionality_is_a_property_of_the_kind() {
		let reg = relation_styles();
		assert!(reg.is_directed("parent"));
		assert!(reg.is_directed("overthrew"));
		assert!(!reg.is_directed("spouse"));
		assert!(!reg.is_directed("union"));
		assert!(!reg.is_directed("prophesied"));
	}
}
