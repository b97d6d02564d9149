//! A text translation widget.
//!
//! The widget keeps two text fields and two language selectors, translates
//! through the MyMemory API, and can copy either field to the clipboard or
//! read it aloud. Front-ends call one [`Widget`] method per user event.
//!
//! ```ignore
//! use std::sync::Arc;
//! use translator_widget::{Config, Widget, WidgetControls};
//! use translator_widget::mt::MyMemoryProvider;
//! use translator_widget::platform::{CommandSpeaker, SystemClipboard};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let widget = Widget::new(WidgetControls::new(
//!         Arc::new(MyMemoryProvider::new(&config)?),
//!         Arc::new(SystemClipboard),
//!         Arc::new(CommandSpeaker::spawn(config.speech_program.clone())),
//!     ));
//!     widget.type_source("Good morning");
//!     widget.translate_now().await;
//!     println!("{}", widget.snapshot().target.value);
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod mt;
pub mod platform;
pub mod terminal;
pub mod widget;

pub use catalog::{DEFAULT_SOURCE, DEFAULT_TARGET, LanguageCatalog};
pub use config::{Config, ConfigError};
pub use widget::{
    IconAction, IconBinding, IconOutcome, Side, TranslateHandle, TranslateOutcome, Widget,
    WidgetControls, WidgetError, WidgetResult, WidgetSnapshot,
};
