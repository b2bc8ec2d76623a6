pub mod analytics;
pub mod clock;
pub mod config;
pub mod http;
pub mod report;
pub mod session;
pub mod store;

pub use analytics::{aggregate, AnalyticsResult, DateKey, DaySlot, EmotionCount};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use http::{cors_layer, create_router, AppState};
pub use report::{render_report, report_from_file};
pub use session::{NewSession, SessionEntry, SessionRecord, ValidSession, ValidationError};
pub use store::{MemoryStore, SessionStore};
