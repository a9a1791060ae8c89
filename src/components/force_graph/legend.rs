//! Legend derivation and display.
//!
//! The model is a pure function of the transformed link set so it can be
//! unit-tested without a host UI; the component only binds the model to HTML.

use leptos::prelude::*;

use super::style::{RelationStyle, RelationStyles, relation_styles};
use super::types::GraphLink;

/// Fixed category reference: ordered section titles with the relation kinds
/// they cover. Kinds absent from the input are filtered; present kinds not
/// listed here land in a trailing "Other" group.
#[rustfmt::skip]
const GROUPS: &[(&str, &[&str])] = &[
	("Lineage",            &["parent", "ancestor", "sibling", "twin"]),
	("Romance & marriage", &["spouse", "consort", "lover", "affair", "rape"]),
	("Creation & origin",  &["created", "born_from", "fashioned"]),
	("Conflict & power",   &["overthrew", "killed", "punished", "enemy", "ally"]),
	("Favor & guidance",   &["mentor", "patron", "blessed", "cursed"]),
	("Mythic events",      &["transformed", "imprisoned", "freed"]),
];

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
	pub relation: String,
	pub style: RelationStyle,
	pub directed: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendGroup {
	pub title: &'static str,
	pub entries: Vec<LegendEntry>,
}

/// Groups the relation kinds actually present in `links` under the fixed
/// category reference, preserving within-category reference order and
/// first-appearance order for uncategorized kinds.
pub fn legend_model(links: &[GraphLink], styles: &RelationStyles) -> Vec<LegendGroup> {
	let mut present: Vec<&str> = Vec::new();
	for l in links {
		if !l.relation.is_empty() && !present.contains(&l.relation.as_str()) {
			present.push(&l.relation);
		}
	}

	let entry = |rel: &str| LegendEntry {
		relation: rel.to_owned(),
		style: *styles.style_for(rel),
		directed: styles.is_directed(rel),
	};

	let mut groups = Vec::new();
	let mut used: Vec<&str> = Vec::new();
	for &(title, keys) in GROUPS {
		let entries: Vec<LegendEntry> = keys
			.iter()
			.filter(|k| present.contains(k))
			.map(|k| {
				used.push(k);
				entry(k)
			})
			.collect();
		if !entries.is_empty() {
			groups.push(LegendGroup { title, entries });
		}
	}

	let extras: Vec<LegendEntry> = present
		.iter()
		.filter(|r| !used.contains(r))
		.map(|r| entry(r))
		.collect();
	if !extras.is_empty() {
		groups.push(LegendGroup {
			title: "Other",
			entries: extras,
		});
	}
	groups
}

/// Legend panel for the relation kinds present in the rendered graph.
#[component]
pub fn Legend(#[prop(into)] links: Signal<Vec<GraphLink>>) -> impl IntoView {
	let groups = move || legend_model(&links.get(), relation_styles());

	view! {
		<div class="legend">
			<div class="legend-title">"Legend"</div>
			{move || {
				groups()
					.into_iter()
					.map(|group| {
						view! {
							<div class="legend-group">
								<div class="legend-header">{group.title}</div>
								{group
									.entries
									.into_iter()
									.map(|e| {
										let line = format!(
											"border-top: {}px {} {};",
											e.style.width,
											if e.style.dash.is_some() { "dashed" } else { "solid" },
											e.style.color,
										);
										let name = if e.directed {
											format!("{} \u{2192}", e.relation)
										} else {
											e.relation.clone()
										};
										view! {
											<div class="legend-item" title=e.relation.clone()>
												<div class="legend-swatch">
													<div style=line></div>
												</div>
												<div>
													<b>{name}</b>
													{(!e.style.label.is_empty())
														.then(|| format!(" — {}", e.style.label))}
												</div>
											</div>
										}
									})
									.collect_view()}
							</div>
						}
					})
					.collect_view()
			}}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn link(relation: &str) -> GraphLink {
		GraphLink {
			source: "a".into(),
			target: "b".into(),
			relation: relation.into(),
		}
	}

	fn flat(groups: &[LegendGroup]) -> Vec<String> {
		groups
			.iter()
			.flat_map(|g| g.entries.iter().map(|e| e.relation.clone()))
			.collect()
	}

	#[test]
	fn every_present_kind_appears_exactly_once() {
		let links = vec![
			link("parent"),
			link("spouse"),
			link("parent"),
			link("union"),
			link("killed"),
		];
		let groups = legend_model(&links, relation_styles());
		let mut rels = flat(&groups);
		rels.sort();
		assert_eq!(rels, ["killed", "parent", "spouse", "union"]);
	}

	#[test]
	fn kinds_group_under_their_category_in_reference_order() {
		let links = vec![link("lover"), link("spouse"), link("parent")];
		let groups = legend_model(&links, relation_styles());

		assert_eq!(groups[0].title, "Lineage");
		assert_eq!(groups[0].entries[0].relation, "parent");
		assert_eq!(groups[1].title, "Romance & marriage");
		// Reference order, not input order.
		assert_eq!(
			groups[1]
				.entries
				.iter()
				.map(|e| e.relation.as_str())
				.collect::<Vec<_>>(),
			["spouse", "lover"]
		);
	}

	#[test]
	fn uncategorized_kinds_trail_in_other() {
		let links = vec![link("union"), link("prophesied"), link("parent")];
		let groups = legend_model(&links, relation_styles());
		let other = groups.last().unwrap();
		assert_eq!(other.title, "Other");
		assert_eq!(
			other
				.entries
				.iter()
				.map(|e| e.relation.as_str())
				.collect::<Vec<_>>(),
			["union", "prophesied"]
		);
		// Unknown kinds carry the fallback style but are still listed.
		assert_eq!(other.entries[1].style.color, "#777");
	}

	#[test]
	fn absent_kinds_and_empty_categories_are_filtered() {
		let groups = legend_model(&[link("spouse")], relation_styles());
		assert_eq!(groups.len(), 1);
		assert_eq!(groups[0].title, "Romance & marriage");
	}

	#[test]
	fn directed_flag_follows_the_registry() {
		let groups = legend_model(&[link("parent"), link("spouse")], relation_styles());
		let rels = flat(&groups);
		assert_eq!(rels, ["parent", "spouse"]);
		assert!(groups[0].entries[0].directed);
		assert!(!groups[1].entries[0].directed);
	}

	#[test]
	fn empty_link_set_yields_empty_legend() {
		assert!(legend_model(&[], relation_styles()).is_empty());
	}
}
