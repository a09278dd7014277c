// Forest model and the store that owns every structural edit
pub mod id;
pub mod node;
pub mod store;

pub use node::Node;
pub use store::TreeStore;
