pub mod loaders;
pub mod outline;
pub mod selection;
pub mod upload;

pub use loaders::{load_outline_snapshot, load_selection_plan, save_outline_snapshot};
pub use outline::{Block, LearningType, Module, Outline, Segment, VideoType};
pub use selection::{Pick, SegmentCoord, SelectionEntry, SelectionPlan};
pub use upload::{UploadBundle, UploadField};
