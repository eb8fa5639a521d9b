pub mod http_executor;

pub use http_executor::{join_url, HttpExecutor, HttpReply};
