use leptos::prelude::*;
use leptos_router::components::A;

/// 404 fallback.
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="detail-page">
			<h1>"Lost in the underworld"</h1>
			<p>"This page does not exist."</p>
			<A href="/">"Return to the web of relations"</A>
		</div>
	}
}
