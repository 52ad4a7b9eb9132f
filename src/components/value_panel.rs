//! Label-value manager for one selected label: debounced search filters,
//! the value edit form, CRUD actions and the two graph views. Every fetch
//! rebuilds the normalized/tree/graph structures from scratch.

use std::sync::Arc;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::ApiClient;
use crate::components::force_graph::GraphCanvas;
use crate::config::AppConfig;
use crate::debounce::Debouncer;
use crate::model::LabelValueRecord;
use crate::normalize::{normalize_value, normalize_values};
use crate::selection::{
	FetchGate, LabelSelection, SelectedNode, ValueForm, validate_value_delete,
};
use crate::taxonomy::{TaxonomyData, build_graph, build_tree, to_graph_data};

const SEARCH_DEBOUNCE_MS: u32 = 500;
// Both filter inputs drive the same re-fetch, so they share one slot.
const VALUES_DEBOUNCE_KEY: &str = "label-values-search";

/// Fetches the value listing and rebuilds both derived structures. Carries
/// its own fetch gate so slow responses cannot overwrite fresher state.
#[derive(Clone)]
struct ValuesLoader {
	client: ApiClient,
	label: LabelSelection,
	locale: String,
	gate: Arc<FetchGate>,
	value_prefix: RwSignal<String>,
	partial_name: RwSignal<String>,
	tree: RwSignal<TaxonomyData>,
	graph: RwSignal<TaxonomyData>,
}

impl ValuesLoader {
	async fn load(&self) {
		if self.label.require().is_err() {
			return;
		}
		let ticket = self.gate.begin();
		let prefix = self.value_prefix.get_untracked();
		let partial = self.partial_name.get_untracked();
		match self
			.client
			.label_values(&self.label.key, &prefix, &partial)
			.await
		{
			Ok(records) => {
				if !self.gate.try_apply(ticket) {
					log::debug!("dropping stale values response for {}", self.label.key);
					return;
				}
				let values = normalize_values(&records, &self.locale);
				self.tree.set(build_tree(&values));
				self.graph.set(build_graph(&values));
			}
			Err(err) => log::error!("GET /labels/{}/values failed: {err}", self.label.key),
		}
	}

	fn fetch(&self) {
		let loader = self.clone();
		spawn_local(async move { loader.load().await });
	}
}

/// Taxonomy manager for `label_key`. Remounted whenever the selected label
/// key changes, which resets all value state.
#[component]
pub fn ValuePanel(label_key: String) -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let client = ApiClient::new(&config);
	let locale = config.locale.clone();
	let label = LabelSelection::select(label_key.clone(), String::new());

	let tree = RwSignal::new(TaxonomyData::default());
	let graph = RwSignal::new(TaxonomyData::default());
	let selected = RwSignal::new(SelectedNode::cleared());
	let form = RwSignal::new(ValueForm::default());
	let value_prefix = RwSignal::new(String::new());
	let partial_name = RwSignal::new(String::new());
	let search_text = RwSignal::new(String::new());
	let show_graph = RwSignal::new(false);
	let debouncer = Debouncer::new();

	let loader = ValuesLoader {
		client: client.clone(),
		label: label.clone(),
		locale: locale.clone(),
		gate: Arc::new(FetchGate::default()),
		value_prefix,
		partial_name,
		tree,
		graph,
	};

	let get_values = {
		let loader = loader.clone();
		move || loader.fetch()
	};

	let post_value = {
		let (client, label, locale, loader) = (
			client.clone(),
			label.clone(),
			locale.clone(),
			loader.clone(),
		);
		move || {
			let f = form.get_untracked();
			if f.validate_create(&label).is_err() {
				return;
			}
			let record = LabelValueRecord {
				value: f.value.clone(),
				parent_value: f.parent_value_opt(),
				name: [(locale.clone(), f.name.clone())].into(),
			};
			let (client, label, locale, loader) = (
				client.clone(),
				label.clone(),
				locale.clone(),
				loader.clone(),
			);
			spawn_local(async move {
				match client.create_value(&label.key, &record).await {
					Ok(created) => {
						let node = normalize_value(&created, &locale);
						form.set(ValueForm::for_node(&node));
						selected.set(SelectedNode::select(node));
						loader.load().await;
					}
					Err(err) => log::error!("POST /labels/{}/values failed: {err}", label.key),
				}
			});
		}
	};

	let put_value = {
		let (client, label, locale, loader) = (
			client.clone(),
			label.clone(),
			locale.clone(),
			loader.clone(),
		);
		move || {
			let f = form.get_untracked();
			let current = selected.get_untracked();
			if f.validate_update(&label, &current).is_err() {
				return;
			}
			let Some(target) = current.value().map(str::to_owned) else {
				return;
			};
			let record = LabelValueRecord {
				value: f.value.clone(),
				parent_value: f.parent_value_opt(),
				name: [(locale.clone(), f.name.clone())].into(),
			};
			let (client, label, locale, loader) = (
				client.clone(),
				label.clone(),
				locale.clone(),
				loader.clone(),
			);
			spawn_local(async move {
				match client
					.update_value(&label.key, &target, f.update_children, &record)
					.await
				{
					Ok(updated) => {
						let node = normalize_value(&updated, &locale);
						form.set(ValueForm::for_node(&node));
						selected.set(SelectedNode::select(node));
						loader.load().await;
					}
					Err(err) => {
						log::error!("PUT /labels/{}/values/{target} failed: {err}", label.key);
					}
				}
			});
		}
	};

	let delete_value = {
		let (client, label, loader) = (client.clone(), label.clone(), loader.clone());
		move || {
			let current = selected.get_untracked();
			if validate_value_delete(&label, &current).is_err() {
				return;
			}
			let Some(target) = current.value().map(str::to_owned) else {
				return;
			};
			let (client, label, loader) = (client.clone(), label.clone(), loader.clone());
			spawn_local(async move {
				match client.delete_value(&label.key, &target).await {
					Ok(()) => {
						selected.set(SelectedNode::cleared());
						loader.load().await;
					}
					Err(err) => {
						log::error!("DELETE /labels/{}/values/{target} failed: {err}", label.key);
					}
				}
			});
		}
	};

	// Graph/tree click: load the node into the edit form.
	let select_node = move |id: String| {
		let node = tree
			.get_untracked()
			.nodes
			.iter()
			.find(|n| n.value == id)
			.cloned();
		if let Some(node) = node {
			form.set(ValueForm::for_node(&node));
			selected.set(SelectedNode::select(node));
		}
	};

	let tree_view = Signal::derive(move || to_graph_data(&tree.get(), &search_text.get()));
	let graph_view = Signal::derive(move || to_graph_data(&graph.get(), &search_text.get()));

	let get_caption = format!("GET /labels/{label_key}/values");
	let post_caption = format!("POST /labels/{label_key}/values");

	let debounced_fetch = {
		let (debouncer, loader) = (debouncer.clone(), loader.clone());
		move || {
			let loader = loader.clone();
			debouncer.schedule(VALUES_DEBOUNCE_KEY, SEARCH_DEBOUNCE_MS, move || loader.fetch());
		}
	};
	let on_prefix_input = {
		let debounced_fetch = debounced_fetch.clone();
		move |ev: web_sys::Event| {
			value_prefix.set(event_target_value(&ev));
			debounced_fetch();
		}
	};
	let on_name_input = {
		let debounced_fetch = debounced_fetch.clone();
		move |ev: web_sys::Event| {
			partial_name.set(event_target_value(&ev));
			debounced_fetch();
		}
	};

	let put_button = {
		let put_value = put_value.clone();
		let label_key = label_key.clone();
		move || {
			selected.get().value().map(str::to_owned).map(|value| {
				let put_value = put_value.clone();
				view! {
					<button class="put" on:click=move |_| put_value()>
						{format!("PUT /labels/{label_key}/values/{value}")}
					</button>
				}
			})
		}
	};
	let delete_button = {
		let delete_value = delete_value.clone();
		let label_key = label_key.clone();
		move || {
			selected.get().value().map(str::to_owned).map(|value| {
				let delete_value = delete_value.clone();
				view! {
					<div>
						<button class="delete" on:click=move |_| delete_value()>
							{format!("DELETE /labels/{label_key}/values/{value}")}
						</button>
					</div>
				}
			})
		}
	};

	view! {
		<div>
			{move || {
				(!tree.get().nodes.is_empty())
					.then(|| {
						view! {
							<input
								type="text"
								placeholder="search"
								class="graph-search"
								prop:value=move || search_text.get()
								on:input=move |ev| search_text.set(event_target_value(&ev))
							/>
							<span class="node-count">
								{move || format!("{} nodes", tree.get().nodes.len())}
							</span>
							<button
								class="graph-toggle"
								on:click=move |_| show_graph.update(|v| *v = !*v)
							>
								"overview"
							</button>
						}
					})
			}}

			<div>
				<button class="get" on:click=move |_| get_values()>{get_caption}</button>
				<input
					type="text"
					placeholder="?valuePrefix="
					prop:value=move || value_prefix.get()
					on:input=on_prefix_input
				/>
				<input
					type="text"
					placeholder="&partialName="
					prop:value=move || partial_name.get()
					on:input=on_name_input
				/>
			</div>

			<div>
				<button class="post" on:click=move |_| post_value()>{post_caption}</button>
				<div>
					{put_button}
					<input
						type="text"
						placeholder="parentValue"
						prop:value=move || form.get().parent_value
						on:input=move |ev| {
							form.update(|f| f.parent_value = event_target_value(&ev))
						}
					/>
					<input
						type="text"
						placeholder="value"
						prop:value=move || form.get().value
						on:input=move |ev| form.update(|f| f.value = event_target_value(&ev))
					/>
					<input
						type="text"
						placeholder="name"
						prop:value=move || form.get().name
						on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
					/>
					<input
						type="checkbox"
						prop:checked=move || form.get().update_children
						on:change=move |ev| {
							form.update(|f| f.update_children = event_target_checked(&ev))
						}
					/>
					<small>"Update children"</small>
				</div>
			</div>

			{delete_button}

			<GraphCanvas data=tree_view on_node_click=Callback::new(select_node) />

			{move || {
				show_graph
					.get()
					.then(|| {
						view! {
							<div class="graph-overlay-layer">
								<GraphCanvas
									data=graph_view
									fullscreen=true
									on_node_click=Callback::new(select_node)
								/>
							</div>
						}
					})
			}}
		</div>
	}
}
