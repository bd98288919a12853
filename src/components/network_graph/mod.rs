//! Table-to-graph pipeline and the interactive canvas built on it.

mod component;
mod graph;
mod interaction;
mod layout;
mod render;
mod snapshot;
mod state;
mod style;
mod table;

pub use component::NetworkGraphCanvas;
pub use graph::{Graph, build_graph};
pub use layout::{LayoutCommand, LayoutEngine};
pub use render::RenderLayers;
pub use snapshot::{ImageFormat, SnapshotConfig};
pub use style::apply_styles;
pub use table::{TableData, parse_table};
