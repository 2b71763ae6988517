//! Template-driven input masking for single-line text fields.
//!
//! A [`MaskEngine`] owns a field's buffer. The host reports each edit and
//! gets back the reformatted text and selection: literals from the template
//! are inserted, non-conforming characters are dropped and unfilled slots
//! show a placeholder.
//!
//! # Example
//!
//! ```rust
//! use textmask::{MaskConfig, MaskEngine, Selection};
//!
//! let mut field = MaskEngine::new(MaskConfig::new("(999) 999-9999", '_'));
//! assert_eq!(field.text(), "(___) ___-____");
//!
//! // The user pastes a number with stray punctuation.
//! let (text, cursor) = field.on_text_changed("555.867.5309", Selection::cursor(12));
//!
//! assert_eq!(text, "(555) 867-5309");
//! assert_eq!(cursor, Selection::cursor(14));
//! assert_eq!(field.value(true), "5558675309");
//! ```

pub mod app;
pub mod buffer;
pub mod char_class;
pub mod config;
mod edit_mode;
pub mod engine;
mod keybind;
pub mod marks;
pub mod selection;
pub mod template;
pub mod terminal;

pub use buffer::{CharTag, MaskBuffer};
pub use config::{ConfigError, MaskConfig, parse_placeholder};
pub use engine::{MaskEngine, apply_mask, format_mask, strip_mask};
pub use selection::Selection;
pub use template::{Slot, SlotClass, Template, compile};
