use std::collections::HashSet;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Event, FileReader, HtmlInputElement, ProgressEvent};

use crate::components::network_graph::{
	Graph, ImageFormat, LayoutCommand, LayoutEngine, NetworkGraphCanvas, RenderLayers,
	SnapshotConfig, TableData, apply_styles, build_graph, parse_table,
};

const PANEL_STYLE: &str = "position: absolute; background: #ffffffee; padding: 10px; \
	border: 1px solid #ddd; border-radius: 4px; box-shadow: 0 4px 6px rgba(0,0,0,0.1); \
	z-index: 1000;";

/// Main page: upload a tab-delimited table, pick the categories to
/// plot, then explore the resulting graph on the canvas.
#[component]
pub fn Home() -> impl IntoView {
	let (table, set_table) = signal(TableData::default());
	let (selected, set_selected) = signal(HashSet::<String>::new());
	let (graph, set_graph) = signal(None::<Graph>);
	let (command, set_command) = signal(None::<(u64, LayoutCommand)>);
	let (snapshot, set_snapshot) = signal(None::<(u64, SnapshotConfig)>);
	let (sim_running, set_sim_running) = signal(false);

	// Snapshot form state.
	let (file_name, set_file_name) = signal("graph".to_string());
	let (format, set_format) = signal(ImageFormat::Png);
	let (background, set_background) = signal("#ffffff".to_string());
	let (snap_width, set_snap_width) = signal(String::new());
	let (snap_height, set_snap_height) = signal(String::new());
	let (reset_camera, set_reset_camera) = signal(false);
	let (layer_edges, set_layer_edges) = signal(true);
	let (layer_nodes, set_layer_nodes) = signal(true);
	let (layer_edge_labels, set_layer_edge_labels) = signal(true);
	let (layer_node_labels, set_layer_node_labels) = signal(true);

	let on_file = move |ev: Event| {
		let input = event_target::<HtmlInputElement>(&ev);
		let Some(file) = input.files().and_then(|list| list.get(0)) else {
			return;
		};

		// A new upload discards the previous graph, selection and any
		// running layout before the file is even read.
		set_graph.set(None);
		set_selected.set(HashSet::new());
		set_table.set(TableData::default());
		set_sim_running.set(false);

		let Ok(reader) = FileReader::new() else {
			warn!("FileReader unavailable");
			return;
		};
		let reader_onload = reader.clone();
		let onload = Closure::once(move |_: ProgressEvent| {
			let text = reader_onload
				.result()
				.ok()
				.and_then(|value| value.as_string())
				.unwrap_or_default();
			let parsed = parse_table(&text);
			info!(
				"loaded table: {} columns, {} rows",
				parsed.headers.len(),
				parsed.rows.len()
			);
			set_table.set(parsed);
		});
		reader.set_onload(Some(onload.as_ref().unchecked_ref()));
		onload.forget();
		if let Err(err) = reader.read_as_text(&file) {
			warn!("failed to read uploaded file: {err:?}");
		}
	};

	let on_plot = move |_| {
		let data = table.get_untracked();
		let picked = selected.get_untracked();
		// No categories selected: keep whatever graph is showing.
		if picked.is_empty() || data.headers.is_empty() {
			return;
		}

		let mut g = build_graph(&data.rows, &data.headers, &picked);
		g.crop_to_largest_component();
		apply_styles(&mut g, &data.headers);
		LayoutEngine::seed_circular(&mut g);
		info!(
			"plotted graph: {} nodes, {} edges",
			g.node_count(),
			g.edge_count()
		);
		set_graph.set(Some(g));
	};

	let issue = move |cmd: LayoutCommand| {
		set_command.update(|slot| {
			let seq = slot.as_ref().map(|(seq, _)| seq + 1).unwrap_or(0);
			*slot = Some((seq, cmd));
		});
	};

	let on_save = move |_| {
		let config = SnapshotConfig {
			format: format.get_untracked(),
			file_name: file_name.get_untracked(),
			background_color: background.get_untracked(),
			width: snap_width.get_untracked().trim().parse().ok(),
			height: snap_height.get_untracked().trim().parse().ok(),
			reset_camera: reset_camera.get_untracked(),
			layers: RenderLayers {
				edges: layer_edges.get_untracked(),
				nodes: layer_nodes.get_untracked(),
				edge_labels: layer_edge_labels.get_untracked(),
				node_labels: layer_node_labels.get_untracked(),
			},
		};
		set_snapshot.update(|slot| {
			let seq = slot.as_ref().map(|(seq, _)| seq + 1).unwrap_or(0);
			*slot = Some((seq, config));
		});
	};

	view! {
		<div class="fullscreen-graph">
			<NetworkGraphCanvas
				graph=graph
				command=command
				snapshot=snapshot
				simulation_running=set_sim_running
				fullscreen=true
			/>

			<div style=format!("{PANEL_STYLE} top: 10px; left: 10px;")>
				<label style="display: block; margin-bottom: 5px;">"Upload a TSV file:"</label>
				<input type="file" accept=".tsv" on:change=on_file style="cursor: pointer;" />

				<Show when=move || table.with(|t| !t.headers.is_empty())>
					<label style="font-weight: bold; margin: 5px 0; display: block;">
						"Select node types:"
					</label>
					{move || {
						table
							.get()
							.headers
							.into_iter()
							.map(|header| {
								let shown = header.clone();
								let checked = header.clone();
								view! {
									<div>
										<input
											type="checkbox"
											prop:checked=move || {
												selected.get().contains(&checked)
											}
											on:change=move |ev| {
												let on = event_target_checked(&ev);
												set_selected
													.update(|s| {
														if on {
															s.insert(header.clone());
														} else {
															s.remove(&header);
														}
													});
											}
										/>
										<label style="margin-left: 5px;">{shown}</label>
									</div>
								}
							})
							.collect_view()
					}}
					<button on:click=on_plot style="margin-top: 10px;">
						"Plot selected nodes"
					</button>
				</Show>
			</div>

			<div style=format!("{PANEL_STYLE} top: 10px; right: 10px; display: flex; gap: 1em;")>
				<button on:click=move |_| issue(LayoutCommand::Random)>"Random"</button>
				<button on:click=move |_| issue(LayoutCommand::ToggleForceDirected)>
					{move || {
						if sim_running.get() { "Stop force layout" } else { "Start force layout" }
					}}
				</button>
				<button on:click=move |_| issue(LayoutCommand::Circular)>"Circular"</button>
			</div>

			<Show when=move || graph.with(|g| g.is_some())>
				<div style=format!("{PANEL_STYLE} bottom: 10px; right: 10px;")>
					<h4>"Layers to save"</h4>
					<div>
						<input
							type="checkbox"
							prop:checked=layer_edges
							on:change=move |ev| set_layer_edges.set(event_target_checked(&ev))
						/>
						<label>"Edges"</label>
					</div>
					<div>
						<input
							type="checkbox"
							prop:checked=layer_nodes
							on:change=move |ev| set_layer_nodes.set(event_target_checked(&ev))
						/>
						<label>"Nodes"</label>
					</div>
					<div>
						<input
							type="checkbox"
							prop:checked=layer_edge_labels
							on:change=move |ev| {
								set_layer_edge_labels.set(event_target_checked(&ev))
							}
						/>
						<label>"Edge labels"</label>
					</div>
					<div>
						<input
							type="checkbox"
							prop:checked=layer_node_labels
							on:change=move |ev| {
								set_layer_node_labels.set(event_target_checked(&ev))
							}
						/>
						<label>"Node labels"</label>
					</div>

					<h4>"Dimensions"</h4>
					<div>
						<label>"Width "</label>
						<input
							type="number"
							placeholder="viewport width"
							prop:value=snap_width
							on:input=move |ev| set_snap_width.set(event_target_value(&ev))
						/>
					</div>
					<div>
						<label>"Height "</label>
						<input
							type="number"
							placeholder="viewport height"
							prop:value=snap_height
							on:input=move |ev| set_snap_height.set(event_target_value(&ev))
						/>
					</div>

					<h4>"Options"</h4>
					<div>
						<label>"File name "</label>
						<input
							type="text"
							prop:value=file_name
							on:input=move |ev| set_file_name.set(event_target_value(&ev))
						/>
					</div>
					<div>
						<label>"Format "</label>
						<select on:change=move |ev| {
							set_format
								.set(
									if event_target_value(&ev) == "jpeg" {
										ImageFormat::Jpeg
									} else {
										ImageFormat::Png
									},
								)
						}>
							<option value="png">"PNG"</option>
							<option value="jpeg">"JPEG"</option>
						</select>
					</div>
					<div>
						<label>"Background "</label>
						<input
							type="color"
							prop:value=background
							on:input=move |ev| set_background.set(event_target_value(&ev))
						/>
					</div>
					<div>
						<input
							type="checkbox"
							prop:checked=reset_camera
							on:change=move |ev| set_reset_camera.set(event_target_checked(&ev))
						/>
						<label>"Reset camera"</label>
					</div>
					<button on:click=on_save style="margin-top: 10px;">
						"Save image snapshot"
					</button>
				</div>
			</Show>
		</div>
	}
}
