//! Snapshot export: renders the scene to an offscreen canvas and
//! triggers a download of the encoded image.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement};

use super::render::{self, RenderLayers};
use super::state::{SceneState, ViewTransform};

/// Raster output encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
	/// Lossless.
	Png,
	/// Lossy.
	Jpeg,
}

impl ImageFormat {
	pub fn mime(self) -> &'static str {
		match self {
			Self::Png => "image/png",
			Self::Jpeg => "image/jpeg",
		}
	}

	pub fn extension(self) -> &'static str {
		match self {
			Self::Png => "png",
			Self::Jpeg => "jpg",
		}
	}
}

/// Export configuration, mirrored by the snapshot form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotConfig {
	pub format: ImageFormat,
	pub file_name: String,
	pub background_color: String,
	/// Output pixel size; the live canvas size when unset.
	pub width: Option<u32>,
	pub height: Option<u32>,
	/// Render with the default centered camera instead of the current
	/// view.
	pub reset_camera: bool,
	pub layers: RenderLayers,
}

impl Default for SnapshotConfig {
	fn default() -> Self {
		Self {
			format: ImageFormat::Png,
			file_name: "graph".to_owned(),
			background_color: "#ffffff".to_owned(),
			width: None,
			height: None,
			reset_camera: false,
			layers: RenderLayers {
				edges: true,
				nodes: true,
				edge_labels: true,
				node_labels: true,
			},
		}
	}
}

/// Render the scene offscreen per `config` and download the result.
pub fn save_snapshot(state: &SceneState, config: &SnapshotConfig) -> Result<(), JsValue> {
	let document = web_sys::window()
		.ok_or("no window")?
		.document()
		.ok_or("no document")?;

	let width = config.width.unwrap_or(state.width as u32).max(1);
	let height = config.height.unwrap_or(state.height as u32).max(1);

	let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
	canvas.set_width(width);
	canvas.set_height(height);
	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")?
		.ok_or("no 2d context")?
		.dyn_into()?;

	let transform = if config.reset_camera {
		ViewTransform {
			x: width as f64 / 2.0,
			y: height as f64 / 2.0,
			k: 1.0,
		}
	} else {
		state.transform.clone()
	};

	render::render_with(
		state,
		&ctx,
		width as f64,
		height as f64,
		&config.background_color,
		&transform,
		&config.layers,
	);

	let url = canvas.to_data_url_with_type(config.format.mime())?;
	let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
	anchor.set_href(&url);
	anchor.set_download(&format!("{}.{}", config.file_name, config.format.extension()));
	anchor.click();
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn formats_map_to_mime_and_extension() {
		assert_eq!(ImageFormat::Png.mime(), "image/png");
		assert_eq!(ImageFormat::Png.extension(), "png");
		assert_eq!(ImageFormat::Jpeg.mime(), "image/jpeg");
		assert_eq!(ImageFormat::Jpeg.extension(), "jpg");
	}

	#[test]
	fn default_config_includes_every_layer() {
		let config = SnapshotConfig::default();
		assert!(config.layers.edges && config.layers.nodes);
		assert!(config.layers.edge_labels && config.layers.node_labels);
		assert!(!config.reset_camera);
	}
}
