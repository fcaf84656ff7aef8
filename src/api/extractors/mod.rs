pub mod object_id;
pub mod valid_json;

pub use object_id::PostId;
pub use valid_json::ValidJson;
