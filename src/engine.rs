//! The mask engine: formats a tagged buffer against a compiled template.

use std::ops::Range;

use itertools::Itertools;
use log::{debug, trace};

use crate::buffer::{CharTag, MaskBuffer};
use crate::char_class;
use crate::config::MaskConfig;
use crate::selection::Selection;
use crate::template::{Slot, Template, compile};

/// Mask state for one text field.
///
/// The host reports every edit through [`MaskEngine::on_text_changed`] (when
/// it only knows the new text) or [`MaskEngine::replace`] (when it knows the
/// exact edit), then renders [`MaskEngine::text`] and
/// [`MaskEngine::selection`].
#[derive(Debug, Clone)]
pub struct MaskEngine {
    template: Template,
    placeholder: char,
    buffer: MaskBuffer,
    selection: Selection,
    /// Set while the buffer is being reformatted. Edit notifications that
    /// arrive in the meantime are ignored.
    formatting: bool,
}

impl Default for MaskEngine {
    fn default() -> Self {
        Self::new(MaskConfig::default())
    }
}

// Constructors
impl MaskEngine {
    /// Create an engine with an empty buffer, formatted right away.
    pub fn new(config: MaskConfig) -> Self {
        let mut engine = Self {
            template: compile(&config.mask),
            placeholder: config.placeholder,
            buffer: MaskBuffer::new(),
            selection: Selection::default(),
            formatting: false,
        };
        engine.reformat();
        engine
    }

    /// Create an engine holding `text` as if the user had typed it.
    ///
    /// Every char of `text` counts as user input, even one that equals the
    /// placeholder or a template literal.
    pub fn with_text(config: MaskConfig, text: &str) -> Self {
        let mut engine = Self {
            template: compile(&config.mask),
            placeholder: config.placeholder,
            buffer: MaskBuffer::from_user_text(text),
            selection: Selection::default(),
            formatting: false,
        };
        let end = engine.buffer.len_chars();
        engine.handle_change(Selection::cursor(end));
        engine
    }
}

// Configuration
impl MaskEngine {
    pub fn template(&self) -> &str {
        self.template.source()
    }

    pub fn compiled_template(&self) -> &Template {
        &self.template
    }

    /// Replace the template and reformat the current content.
    ///
    /// An empty template switches formatting off; the buffer is left as is.
    pub fn set_template(&mut self, mask: &str) {
        debug!("mask template {:?} -> {:?}", self.template.source(), mask);
        self.template = compile(mask);
        self.reformat();
    }

    pub fn placeholder(&self) -> char {
        self.placeholder
    }

    /// Replace the placeholder and reformat the current content.
    pub fn set_placeholder(&mut self, placeholder: char) {
        debug!("placeholder {:?} -> {:?}", self.placeholder, placeholder);
        self.placeholder = placeholder;
        self.reformat();
    }
}

// Host-facing queries
impl MaskEngine {
    /// The buffer as displayed.
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn buffer(&self) -> &MaskBuffer {
        &self.buffer
    }

    /// The displayed text, or with `strip_mask` only what the user typed.
    pub fn value(&self, strip_mask: bool) -> String {
        if strip_mask {
            self.buffer.user_text()
        } else {
            self.text()
        }
    }

    pub fn is_formatting(&self) -> bool {
        self.formatting
    }
}

// Edit handling
impl MaskEngine {
    /// Handle a host edit given only the resulting text and selection.
    ///
    /// The new text is reconciled with the current buffer: the unchanged
    /// prefix and suffix keep their tags and the changed middle is taken as
    /// user input. The caret in `selection` marks where the edit ended.
    /// Returns the formatted text and adjusted selection.
    pub fn on_text_changed(&mut self, text: &str, selection: Selection) -> (String, Selection) {
        if self.formatting {
            return (self.text(), self.selection);
        }
        self.reconcile(text, selection.end);
        self.handle_change(selection)
    }

    /// Replace `range` of the displayed text with user-typed `text`, then
    /// format. `selection` is where the host put the selection after the
    /// edit, in post-edit offsets.
    pub fn replace(&mut self, range: Range<usize>, text: &str, selection: Selection) -> Selection {
        if self.formatting {
            return self.selection;
        }
        self.buffer.replace(range, text);
        self.handle_change(selection).1
    }

    /// Move the selection without editing.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection.clamped(self.buffer.len_chars());
    }

    fn reformat(&mut self) {
        self.handle_change(self.selection);
    }

    fn handle_change(&mut self, selection: Selection) -> (String, Selection) {
        let selection = selection.clamped(self.buffer.len_chars());
        if self.template.is_empty() {
            self.selection = selection;
            return (self.text(), selection);
        }

        self.formatting = true;
        self.selection = format_mask(&self.template, self.placeholder, &mut self.buffer, selection);
        self.formatting = false;

        (self.text(), self.selection)
    }

    /// Bring the buffer in line with `text` with a single replacement.
    ///
    /// When the common suffix allows it, the replaced region ends at `caret`
    /// in the new text, so an edit next to an identical char lands on the
    /// side the user touched. Otherwise the longest common prefix is kept.
    fn reconcile(&mut self, text: &str, caret: usize) {
        let old = self.buffer.chars().collect_vec();
        let new = text.chars().collect_vec();

        let common_prefix = old.iter().zip(&new).take_while(|(a, b)| a == b).count();
        let common_suffix = old
            .iter()
            .rev()
            .zip(new.iter().rev())
            .take_while(|(a, b)| a == b)
            .count();

        let caret = caret.min(new.len());
        let pinned_suffix = new.len() - caret;
        let (prefix, suffix) = if pinned_suffix <= common_suffix {
            let prefix = common_prefix.min(caret).min(old.len() - pinned_suffix);
            (prefix, pinned_suffix)
        } else {
            let shortest = old.len().min(new.len());
            (common_prefix, common_suffix.min(shortest - common_prefix))
        };

        let removed = prefix..old.len() - suffix;
        let inserted: String = new[prefix..new.len() - suffix].iter().collect();
        if removed.is_empty() && inserted.is_empty() {
            return;
        }
        trace!("edit {:?} -> {:?}", removed, inserted);
        self.buffer.replace(removed, &inserted);
    }
}

/// Format `buffer` against `template` in place and return the adjusted
/// selection.
///
/// Mask chars are stripped first, so the walk only ever sees user input.
/// Literal slots are always inserted; wildcard slots take the next user char
/// that satisfies them, discarding the ones that don't, or a placeholder once
/// input runs out. The result is exactly `template.slot_count()` chars long.
pub fn format_mask(
    template: &Template,
    placeholder: char,
    buffer: &mut MaskBuffer,
    selection: Selection,
) -> Selection {
    buffer.anchor_selection(selection);
    buffer.strip_mask_chars();

    let mut j = 0;
    for slot in template.slots() {
        match *slot {
            Slot::Literal(ch) => {
                buffer.insert_char(j, ch, CharTag::Literal);
                j += 1;
            }
            Slot::Wildcard(class) => loop {
                match buffer.char_at(j) {
                    None => {
                        buffer.insert_char(j, placeholder, CharTag::Placeholder);
                        j += 1;
                        break;
                    }
                    Some(ch) if char_class::matches(class, ch) => {
                        j += 1;
                        break;
                    }
                    Some(ch) => {
                        trace!("rejected {:?} for {:?} slot at {}", ch, class, j);
                        buffer.remove(j..j + 1);
                    }
                }
            },
        }
    }

    buffer.truncate(template.slot_count());
    buffer.release_selection()
}

/// Format `raw` as if typed into an empty field.
///
/// An empty template returns `raw` unchanged.
pub fn apply_mask(template: &Template, placeholder: char, raw: &str) -> String {
    if template.is_empty() {
        return raw.to_string();
    }
    let mut buffer = MaskBuffer::from_user_text(raw);
    format_mask(template, placeholder, &mut buffer, Selection::default());
    buffer.to_string()
}

/// The user-typed chars of `buffer`, without touching it.
pub fn strip_mask(buffer: &MaskBuffer) -> String {
    buffer.user_text()
}
