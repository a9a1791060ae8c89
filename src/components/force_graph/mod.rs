mod component;
pub mod legend;
mod render;
pub mod scale;
pub mod sim;
mod state;
pub mod style;
pub mod transform;
mod types;

pub use component::RelationGraphCanvas;
pub use legend::Legend;
pub use types::{GraphData, GraphLink, GraphNode, NodeType, RawDataset};
