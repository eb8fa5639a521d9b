pub mod outline_view;
pub mod selection_state;

pub use selection_state::{SelectionState, Toggled};
