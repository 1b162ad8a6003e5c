pub mod definition;
pub mod normalize;

pub use definition::*;
pub use normalize::{graph_to_spec, spec_to_graph};
