pub mod busy;
pub mod session;

pub use busy::{BusyFlag, BusyGuard};
pub use session::{CurationSession, FinalizeOutcome, PlanReport, UploadOutcome, FINAL_FILE_NAME};
