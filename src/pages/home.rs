use leptos::prelude::*;

use crate::components::label_panel::LabelPanel;
use crate::components::value_panel::ValuePanel;
use crate::selection::LabelSelection;

/// Admin page: label CRUD plus, once a label is selected, its value
/// taxonomy. The value panel is keyed on the label key so selecting a
/// different label resets all value state.
#[component]
pub fn Home() -> impl IntoView {
	let selection = RwSignal::new(LabelSelection::cleared());
	let selected_key = Memo::new(move |_| selection.get().key);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<main class="admin">
				<LabelPanel selection=selection />
				{move || {
					let key = selected_key.get();
					(!key.is_empty()).then(|| view! { <ValuePanel label_key=key.clone() /> })
				}}
			</main>
		</ErrorBoundary>
	}
}
