//! Character class membership tests for wildcard slots.

use unicode_general_category::{GeneralCategory, get_general_category};

use crate::template::SlotClass;

/// Test whether `ch` may fill a wildcard slot of class `class`.
pub fn matches(class: SlotClass, ch: char) -> bool {
    match class {
        SlotClass::Digit => is_digit(ch),
        SlotClass::Letter => is_letter(ch),
        SlotClass::Alnum => is_digit(ch) || is_letter(ch),
        SlotClass::Any => true,
    }
}

/// Unicode decimal digit (`Nd`). Excludes other numerics such as `½` or `Ⅻ`.
pub fn is_digit(ch: char) -> bool {
    get_general_category(ch) == GeneralCategory::DecimalNumber
}

pub fn is_letter(ch: char) -> bool {
    ch.is_alphabetic()
}
