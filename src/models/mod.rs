pub mod exam_record;
pub mod listing;
pub mod progress;
pub mod search_url;

pub use exam_record::{DocumentKind, DownloadTask, ExamRecord};
pub use listing::{ListingCell, ListingPage, ListingRow};
pub use progress::{
    DownloadFailure, DownloadOutcome, HarvestEvent, HarvestOutcome, HarvestProgress,
    HarvestState, HarvestSummary,
};
pub use search_url::SearchUrlTemplate;
