use leptos::prelude::*;
use mythweave::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(|| view! { <App /> });
}
