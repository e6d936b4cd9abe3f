// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod layout;
pub mod logging;
pub mod presenter;
pub mod runtime;
pub mod session;
pub mod speech;
pub mod timer;
pub mod util;

pub use catalog::{Catalog, CatalogError, VocabularyEntry};
pub use controller::{ActionOutcome, CheckOutcome, SessionController};
pub use presenter::{DrillView, MessageKind, Presenter};
pub use session::{Phase, SessionState, ThemeSelection};
pub use speech::{CommandSpeaker, SilentSpeaker, Speaker};
