pub mod snapshot_loader;
pub mod toml_loader;

pub use snapshot_loader::{load_outline_snapshot, save_outline_snapshot};
pub use toml_loader::load_selection_plan;
