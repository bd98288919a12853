use leptos::prelude::*;

/// 404 fallback page.
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div style="text-align: center; margin-top: 4em;">
			<h1>"404"</h1>
			<p>"Page not found."</p>
			<a href="/">"Back to the graph"</a>
		</div>
	}
}
