use uuid::Uuid;

/// Prefix shared by every generated node id
pub const NODE_ID_PREFIX: &str = "node-";

/// Generate a fresh node id.
///
/// Ids are random v4 uuids; nothing keeps a registry of issued ids, so
/// uniqueness is probabilistic.
pub fn generate_unique_node_id() -> String {
    format!("{NODE_ID_PREFIX}{}", Uuid::new_v4())
}
