use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::graph::Graph;
use super::interaction::{Gesture, InteractionController};
use super::layout::LayoutCommand;
use super::render;
use super::snapshot::{self, SnapshotConfig};
use super::state::SceneState;

fn open_in_new_tab(url: &str) {
	if let Some(window) = web_sys::window() {
		let _ = window.open_with_url_and_target(url, "_blank");
	}
}

/// Canvas surface for the styled graph.
///
/// A change of the `graph` signal replaces the whole scene: the
/// previous graph, its layout phase and any running simulation are
/// discarded. Layout and snapshot requests arrive through the
/// sequence-numbered `command` and `snapshot` signals so repeated
/// identical requests still fire; `simulation_running` reports the
/// force-directed state back for the start/stop affordance.
#[component]
pub fn NetworkGraphCanvas(
	#[prop(into)] graph: Signal<Option<Graph>>,
	#[prop(into)] command: Signal<Option<(u64, LayoutCommand)>>,
	#[prop(into)] snapshot: Signal<Option<(u64, SnapshotConfig)>>,
	simulation_running: WriteSignal<bool>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<SceneState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let data = graph.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		// Replacing the scene drops the old graph together with any
		// running simulation or animation.
		*state_init.borrow_mut() = data.map(|graph| SceneState::new(graph, w, h));
		simulation_running.set(false);

		if animate_init.borrow().is_some() {
			return;
		}

		// Missing render target is fatal for the whole surface.
		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					error!("canvas 2d context has unexpected type, aborting setup");
					return;
				}
			},
			_ => {
				error!("canvas 2d context unavailable, aborting setup");
				return;
			}
		};

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, animate_inner, canvas_anim) =
			(state_init.clone(), animate_init.clone(), canvas.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx);
			} else {
				ctx.set_fill_style_str(render::BACKGROUND_COLOR);
				ctx.fill_rect(
					0.0,
					0.0,
					canvas_anim.width() as f64,
					canvas_anim.height() as f64,
				);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_cmd = state.clone();
	Effect::new(move |_| {
		let Some((_, cmd)) = command.get() else {
			return;
		};
		if let Some(ref mut s) = *state_cmd.borrow_mut() {
			match cmd {
				LayoutCommand::ToggleForceDirected => {
					let running = s.layout.toggle_force_directed(&s.graph);
					simulation_running.set(running);
				}
				LayoutCommand::Random => {
					s.layout.trigger_random(&s.graph);
					simulation_running.set(false);
				}
				LayoutCommand::Circular => {
					s.layout.trigger_circular(&s.graph);
					simulation_running.set(false);
				}
			}
		}
	});

	let state_snap = state.clone();
	Effect::new(move |_| {
		let Some((_, config)) = snapshot.get() else {
			return;
		};
		if let Some(ref s) = *state_snap.borrow() {
			if let Err(err) = snapshot::save_snapshot(s, &config) {
				warn!("snapshot export failed: {err:?}");
			}
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut s) = *state_md.borrow_mut() {
			let hit = s.node_at_position(x, y);
			if !s.interaction.pointer_down(&mut s.graph, hit, x, y) {
				s.pan.active = true;
				s.pan.start_x = x;
				s.pan.start_y = y;
				s.pan.transform_start_x = s.transform.x;
				s.pan.transform_start_y = s.transform.y;
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.interaction.is_dragging() {
				// Node drag overrides the default camera pan and, when
				// the simulation is running, pins the node under the
				// pointer (last writer wins per frame).
				let (gx, gy) = s.screen_to_graph(x, y);
				if let Some(node) = s.interaction.pointer_move(&mut s.graph, gx, gy) {
					s.layout.sync_drag(node, gx, gy);
				}
			} else if s.pan.active {
				s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
				s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut s) = *state_mu.borrow_mut() {
			let node = s.interaction.dragging();
			if s.interaction.pointer_up(&mut s.graph, x, y) == Some(Gesture::Click) {
				if let Some(node) = node {
					if let Some(url) = s.interaction.click_url(&s.graph, node) {
						open_in_new_tab(url);
					}
				}
			}
			s.pan.active = false;
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.interaction.reset(&mut s.graph);
			s.pan.active = false;
		}
	};

	let state_dc = state.clone();
	let on_dblclick = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref s) = *state_dc.borrow() {
			if let Some(node) = s.node_at_position(x, y) {
				if let Some(url) = InteractionController::double_click_url(&s.graph, node) {
					open_in_new_tab(url);
				}
			}
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (s.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / s.transform.k;
			s.transform.x = x - (x - s.transform.x) * ratio;
			s.transform.y = y - (y - s.transform.y) * ratio;
			s.transform.k = new_k;
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="network-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:dblclick=on_dblclick
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
