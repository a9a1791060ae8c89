use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::force_graph::{
	GraphData, Legend, RawDataset, RelationGraphCanvas, transform,
};

/// Fetches the relation dataset and runs the full graph transform. The
/// transform completes here, before any layout or rendering observes the data.
async fn fetch_graph() -> Result<GraphData, String> {
	let raw: RawDataset = gloo_net::http::Request::get("data/relations.json")
		.send()
		.await
		.map_err(|e| e.to_string())?
		.json()
		.await
		.map_err(|e| e.to_string())?;

	let mut g: GraphData = raw.into();
	g.links = transform::normalize_inverse_links(g.links);
	Ok(transform::build_union_graph(g))
}

/// The pantheon graph page.
#[component]
pub fn Home() -> impl IntoView {
	let graph = RwSignal::new(Option::<GraphData>::None);
	let error = RwSignal::new(Option::<String>::None);

	Effect::new(move |_| {
		spawn_local(async move {
			match fetch_graph().await {
				Ok(g) => graph.set(Some(g)),
				Err(e) => {
					log::error!("failed to load relation dataset: {e}");
					error.set(Some(e));
				}
			}
		});
	});

	view! {
		<div class="fullscreen-graph">
			{move || {
				if let Some(e) = error.get() {
					view! {
						<div class="load-error">
							<h1>"Could not load the relation data"</h1>
							<p>{e}</p>
						</div>
					}
						.into_any()
				} else if let Some(g) = graph.get() {
					let links = g.links.clone();
					view! {
						<RelationGraphCanvas
							data=Signal::derive(move || g.clone())
							fullscreen=true
						/>
						<Legend links=Signal::derive(move || links.clone()) />
					}
						.into_any()
				} else {
					view! { <p class="loading">"Loading the pantheon…"</p> }.into_any()
				}
			}}
			<div class="graph-overlay">
				<h1>"Mythweave"</h1>
				<p class="subtitle">
					"Drag figures to reposition. Scroll to zoom. Drag the background to pan. Click a figure for their story."
				</p>
			</div>
		</div>
	}
}
