/// Machine Translation Module
///
/// The external batch-translation capability used by the bulk import
/// pipeline to produce Oromo values for English-only word lists.
///
/// - [`MachineTranslator`] - provider trait, batch-oriented
/// - [`GoogleTranslateProvider`] - Google Translate v2 REST API
/// - [`MockTranslator`] - deterministic provider for tests and `--mock` runs
pub mod error;
pub mod google_translate;
pub mod mock;
pub mod translator;

pub use error::{MtError, MtResult};
pub use google_translate::GoogleTranslateProvider;
pub use mock::{MockMode, MockTranslator};
pub use translator::MachineTranslator;
