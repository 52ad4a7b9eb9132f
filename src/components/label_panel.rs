//! Label manager: list, create, update and delete labels. Every mutation
//! re-fetches the listing; there are no optimistic updates.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::model::Label;
use crate::selection::{LabelForm, LabelSelection, validate_label_delete};

async fn refresh_labels(client: &ApiClient, labels: RwSignal<Vec<Label>>) {
	match client.labels().await {
		Ok(list) => labels.set(list),
		Err(err) => log::error!("GET /labels failed: {err}"),
	}
}

/// CRUD panel for labels. `selection` is shared with the page so the
/// label-value manager can follow it.
#[component]
pub fn LabelPanel(selection: RwSignal<LabelSelection>) -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let client = ApiClient::new(&config);
	let labels = RwSignal::new(Vec::<Label>::new());
	let form = RwSignal::new(LabelForm::default());

	// List click or CRUD response: mirror into the form, make it current.
	// Selecting a label implicitly drops any node selection, because the
	// value panel is remounted per label key.
	let select_label = move |label: &Label| {
		let selected = LabelSelection::select(label.key.clone(), label.name.clone());
		form.set(LabelForm::for_selection(&selected));
		selection.set(selected);
	};

	let get_labels = {
		let client = client.clone();
		move || {
			let client = client.clone();
			spawn_local(async move {
				refresh_labels(&client, labels).await;
			});
		}
	};

	let post_label = {
		let client = client.clone();
		move || {
			let f = form.get_untracked();
			if f.validate_create().is_err() {
				return;
			}
			let client = client.clone();
			spawn_local(async move {
				let label = Label {
					key: f.key,
					name: f.name,
				};
				match client.create_label(&label).await {
					Ok(created) => {
						select_label(&created);
						refresh_labels(&client, labels).await;
					}
					Err(err) => log::error!("POST /labels failed: {err}"),
				}
			});
		}
	};

	let put_label = {
		let client = client.clone();
		move || {
			let current = selection.get_untracked();
			let f = form.get_untracked();
			if f.validate_update(&current).is_err() {
				return;
			}
			let client = client.clone();
			spawn_local(async move {
				let label = Label {
					key: f.key,
					name: f.name,
				};
				match client.update_label(&current.key, &label).await {
					Ok(updated) => {
						select_label(&updated);
						refresh_labels(&client, labels).await;
					}
					Err(err) => log::error!("PUT /labels/{} failed: {err}", current.key),
				}
			});
		}
	};

	let delete_label = {
		let client = client.clone();
		move || {
			let current = selection.get_untracked();
			if validate_label_delete(&current).is_err() {
				return;
			}
			let client = client.clone();
			spawn_local(async move {
				match client.delete_label(&current.key).await {
					Ok(()) => {
						form.set(LabelForm::default());
						selection.set(LabelSelection::cleared());
						refresh_labels(&client, labels).await;
					}
					Err(err) => log::error!("DELETE /labels/{} failed: {err}", current.key),
				}
			});
		}
	};

	let put_button = {
		let put_label = put_label.clone();
		move || {
			let current = selection.get();
			current.is_selected().then(|| {
				let put_label = put_label.clone();
				view! {
					<button class="put" on:click=move |_| put_label()>
						{format!("PUT /labels/{}", current.key)}
					</button>
				}
			})
		}
	};
	let delete_button = {
		let delete_label = delete_label.clone();
		move || {
			let current = selection.get();
			current.is_selected().then(|| {
				let delete_label = delete_label.clone();
				view! {
					<div>
						<button class="delete" on:click=move |_| delete_label()>
							{format!("DELETE /labels/{}", current.key)}
						</button>
					</div>
				}
			})
		}
	};

	view! {
		<div>
			<button class="get" on:click=move |_| get_labels()>"GET /labels"</button>
			<For
				each=move || labels.get()
				key=|label| label.key.clone()
				children=move |label: Label| {
					let is_active = {
						let key = label.key.clone();
						move || selection.get().key == key
					};
					let clicked = label.clone();
					view! {
						<button
							class="get"
							class:active=is_active
							on:click=move |_| select_label(&clicked)
						>
							{label.name.clone()}
						</button>
					}
				}
			/>
		</div>
		<div>
			<button class="post" on:click=move |_| post_label()>"POST /labels"</button>
			{put_button}
			<input
				type="text"
				placeholder="key"
				prop:value=move || form.get().key
				on:input=move |ev| form.update(|f| f.key = event_target_value(&ev))
			/>
			<input
				type="text"
				placeholder="name"
				prop:value=move || form.get().name
				on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
			/>
		</div>
		{delete_button}
	}
}
