use std::collections::HashMap;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;
use leptos_router::components::A;
use leptos_router::hooks::use_query_map;
use serde::Deserialize;

/// One entry of the id-keyed `data/characters.json` lookup.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Character {
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub bio: Option<String>,
	#[serde(default)]
	pub img: Option<String>,
	#[serde(default)]
	pub domains: Vec<String>,
	#[serde(default)]
	pub symbols: Vec<String>,
	#[serde(default)]
	pub stories: Vec<String>,
}

async fn fetch_characters() -> Result<HashMap<String, Character>, String> {
	gloo_net::http::Request::get("data/characters.json")
		.send()
		.await
		.map_err(|e| e.to_string())?
		.json()
		.await
		.map_err(|e| e.to_string())
}

/// Detail view for a single character, keyed by the `id` query parameter.
#[component]
pub fn CharacterPage() -> impl IntoView {
	let query = use_query_map();
	let character = RwSignal::new(Option::<Result<Character, String>>::None);

	Effect::new(move |_| {
		let Some(id) = query.read().get("id") else {
			character.set(Some(Err("Character not found".into())));
			return;
		};
		spawn_local(async move {
			let looked_up = fetch_characters().await.map(|all| all.get(&id).cloned());
			match looked_up {
				Ok(Some(c)) => character.set(Some(Ok(c))),
				Ok(None) => character.set(Some(Err(format!("Unknown character: {id}")))),
				Err(e) => {
					log::error!("failed to load character lookup: {e}");
					character.set(Some(Err(e)));
				}
			}
		});
	});

	view! {
		<div class="detail-page">
			<A href="/">"← Back to the web"</A>
			{move || match character.get() {
				None => view! { <p class="loading">"Loading…"</p> }.into_any(),
				Some(Err(msg)) => view! { <h1>{msg}</h1> }.into_any(),
				Some(Ok(c)) => {
					view! {
						<Title text=c.name.clone() />
						{c.img
							.as_ref()
							.map(|src| {
								view! {
									<img
										class="portrait"
										src=src.clone()
										alt=format!("{} portrait", c.name)
									/>
								}
							})}
						<h1>{c.name.clone()}</h1>
						<p class="char-title">{c.title.clone().unwrap_or_default()}</p>
						<p class="bio">{c.bio.clone().unwrap_or_default()}</p>
						<h2>"Domains"</h2>
						<ul>{c.domains.iter().map(|d| view! { <li>{d.clone()}</li> }).collect_view()}</ul>
						<h2>"Symbols"</h2>
						<ul>{c.symbols.iter().map(|s| view! { <li>{s.clone()}</li> }).collect_view()}</ul>
						<h2>"Stories"</h2>
						<ul>
							{c.stories
								.clone()
								.into_iter()
								.map(|st| {
									let encoded = String::from(js_sys::encode_uri_component(&st));
									view! {
										<li>
											<A href=format!(
												"/story?id={encoded}",
											)>{st.clone()}</A>
										</li>
									}
								})
								.collect_view()}
						</ul>
					}
						.into_any()
				}
			}}
		</div>
	}
}
