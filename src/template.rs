//! Mask template compiler.
//!
//! A template is a plain string. Four characters are wildcards that accept a
//! single character of a given class; everything else is copied into the
//! buffer verbatim.
//!
//! | Char | Slot                         |
//! |------|------------------------------|
//! | `9`  | One decimal digit            |
//! | `A`  | One letter                   |
//! | `*`  | One digit or letter          |
//! | `?`  | Any single character         |
//! | `\`  | Next character is a literal  |

use std::fmt;
use std::str::Chars;

use phf::{Map, phf_map};

/// Forces the following template character to be treated as a literal.
pub const ESCAPE_CHAR: char = '\\';

/// The character class a wildcard slot accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotClass {
    Digit,
    Letter,
    Alnum,
    Any,
}

/// One position in a compiled template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Filled by a user character satisfying the class, or the placeholder.
    Wildcard(SlotClass),
    /// Always synthesized; never consumes user input.
    Literal(char),
}

impl Slot {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Slot::Wildcard(_))
    }
}

const WILDCARDS: Map<char, SlotClass> = phf_map! {
    '9' => SlotClass::Digit,
    'A' => SlotClass::Letter,
    '*' => SlotClass::Alnum,
    '?' => SlotClass::Any,
};

/// Look up the wildcard class for a template character, if it is one.
pub fn wildcard_class(ch: char) -> Option<SlotClass> {
    WILDCARDS.get(&ch).copied()
}

/// A compiled mask template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    source: String,
    slots: Vec<Slot>,
}

impl Template {
    /// The mask string this template was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Total number of slots, literal and wildcard. A formatted buffer is
    /// always exactly this long.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn wildcard_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_wildcard()).count()
    }

    /// An empty template disables formatting altogether.
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// Compile a mask string into its slot sequence.
///
/// Never fails. A dangling escape at the very end of the mask is consumed
/// and produces no slot.
pub fn compile(mask: &str) -> Template {
    let slots = Compiler {
        chars: mask.chars(),
    }
    .collect();
    Template {
        source: mask.to_string(),
        slots,
    }
}

struct Compiler<'a> {
    chars: Chars<'a>,
}

impl Iterator for Compiler<'_> {
    type Item = Slot;

    fn next(&mut self) -> Option<Slot> {
        let ch = self.chars.next()?;
        if ch == ESCAPE_CHAR {
            // `None` here is the dangling escape: nothing follows it.
            return self.chars.next().map(Slot::Literal);
        }
        Some(match wildcard_class(ch) {
            Some(class) => Slot::Wildcard(class),
            None => Slot::Literal(ch),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use Slot::*;
    use SlotClass::*;

    #[test]
    fn wildcards_and_literals() {
        let t = compile("(99) A*?");
        assert_eq!(
            t.slots(),
            &[
                Literal('('),
                Wildcard(Digit),
                Wildcard(Digit),
                Literal(')'),
                Literal(' '),
                Wildcard(Letter),
                Wildcard(Alnum),
                Wildcard(Any),
            ]
        );
        assert_eq!(t.slot_count(), 8);
        assert_eq!(t.wildcard_count(), 5);
        assert_eq!(t.source(), "(99) A*?");
    }

    #[test]
    fn escape_forces_literal() {
        assert_eq!(compile("\\9\\A").slots(), &[Literal('9'), Literal('A')]);
        // Escape only covers the next character.
        assert_eq!(compile("\\9A").slots(), &[Literal('9'), Wildcard(Letter)]);
    }

    #[test]
    fn escaped_escape_is_literal_backslash() {
        assert_eq!(compile("\\\\9").slots(), &[Literal('\\'), Wildcard(Digit)]);
    }

    #[test]
    fn dangling_escape_emits_nothing() {
        let t = compile("99\\");
        assert_eq!(t.slots(), &[Wildcard(Digit), Wildcard(Digit)]);
        assert_eq!(t.slot_count(), 2);
        assert!(compile("\\").slots().is_empty());
    }

    #[test]
    fn empty_template() {
        let t = compile("");
        assert!(t.is_empty());
        assert_eq!(t.slot_count(), 0);
        assert_eq!(t, Template::default());
    }

    #[test]
    fn lowercase_letters_are_literals() {
        assert_eq!(compile("a9").slots(), &[Literal('a'), Wildcard(Digit)]);
    }

    #[test]
    fn non_ascii_literals() {
        assert_eq!(compile("€9").slots(), &[Literal('€'), Wildcard(Digit)]);
    }

    #[test]
    fn wildcard_lookup() {
        assert_eq!(wildcard_class('9'), Some(Digit));
        assert_eq!(wildcard_class('?'), Some(Any));
        assert_eq!(wildcard_class('-'), None);
        assert_eq!(wildcard_class('\\'), None);
    }
}
