/// Machine Translation Module
///
/// Provider abstraction for the widget's one outbound operation.
///
/// # Overview
///
/// 1. **MachineTranslator** - async trait every provider implements
/// 2. **MyMemoryProvider** - talks to `api.mymemory.translated.net`
/// 3. **MockTranslator** - deterministic provider for tests and `--mock`
/// 4. **Data** - request/response/result types and the id-0 match selection
///
/// # Example
///
/// ```ignore
/// use translator_widget::{Config, mt::{MachineTranslator, MyMemoryProvider}};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let provider = MyMemoryProvider::new(&Config::default())?;
///     let translated = provider.translate("Hello", "en-GB", "de-DE").await?;
///     println!("{}", translated);
///     Ok(())
/// }
/// ```
pub mod data;
pub mod error;
pub mod mock;
pub mod mymemory;
pub mod translator;

pub use data::{MatchEntry, MyMemoryResponse, ResponseData, TranslationRequest, TranslationResult};
pub use error::{MtError, MtResult};
pub use mock::{MockCall, MockMode, MockTranslator};
pub use mymemory::MyMemoryProvider;
pub use translator::{MachineTranslator, validate_locale};
