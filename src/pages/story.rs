use std::collections::HashMap;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;
use leptos_router::components::A;
use leptos_router::hooks::use_query_map;
use serde::Deserialize;

/// One entry of the id-keyed `data/stories.json` lookup.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Story {
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub text: Option<String>,
}

async fn fetch_stories() -> Result<HashMap<String, Story>, String> {
	gloo_net::http::Request::get("data/stories.json")
		.send()
		.await
		.map_err(|e| e.to_string())?
		.json()
		.await
		.map_err(|e| e.to_string())
}

/// Detail view for a single story, keyed by the `id` query parameter.
#[component]
pub fn StoryPage() -> impl IntoView {
	let query = use_query_map();
	let story = RwSignal::new(Option::<Result<(String, Story), String>>::None);

	Effect::new(move |_| {
		let Some(id) = query.read().get("id") else {
			story.set(Some(Err("Story not found".into())));
			return;
		};
		spawn_local(async move {
			let looked_up = fetch_stories().await.map(|all| all.get(&id).cloned());
			match looked_up {
				Ok(Some(s)) => story.set(Some(Ok((id, s)))),
				Ok(None) => story.set(Some(Err(format!("Unknown story: {id}")))),
				Err(e) => {
					log::error!("failed to load story lookup: {e}");
					story.set(Some(Err(e)));
				}
			}
		});
	});

	view! {
		<div class="detail-page">
			<A href="/">"← Back to the web"</A>
			{move || match story.get() {
				None => view! { <p class="loading">"Loading…"</p> }.into_any(),
				Some(Err(msg)) => view! { <h1>{msg}</h1> }.into_any(),
				Some(Ok((id, s))) => {
					let title = s.title.clone().unwrap_or(id);
					view! {
						<Title text=title.clone() />
						<h1>{title}</h1>
						<p class="story-text">{s.text.clone().unwrap_or_default()}</p>
					}
						.into_any()
				}
			}}
		</div>
	}
}
