pub mod outline_client;

pub use outline_client::{FinalizeReply, OutlineBackend, OutlineClient};
