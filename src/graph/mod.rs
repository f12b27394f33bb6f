mod connectivity;
mod sample;
mod store;

pub use connectivity::blend_color;
pub use sample::{default_sample, read_sample, seed_store};
pub use store::{Edge, GraphError, GraphStore, Node};
