//! Visible-character accounting.

use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};

/// Whether a character takes up room on the page.
///
/// Letters, marks, numbers, punctuation and symbols cost one. Separators
/// (spaces, line and paragraph breaks) and everything in the "other" group
/// (controls, format characters, private use, unassigned) are free.
pub(crate) fn is_visible(c: char) -> bool {
    matches!(
        c.general_category_group(),
        GeneralCategoryGroup::Letter
            | GeneralCategoryGroup::Mark
            | GeneralCategoryGroup::Number
            | GeneralCategoryGroup::Punctuation
            | GeneralCategoryGroup::Symbol
    )
}

/// Counts visible characters against a budget.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Counter {
    limit: usize,
    visible: usize,
}

impl Counter {
    pub(crate) fn new(limit: usize) -> Self {
        Self { limit, visible: 0 }
    }

    /// Count a run of plain text. If the budget runs out part-way through,
    /// returns the byte length of the prefix that used it up (always a whole
    /// number of characters, ending with the last visible one).
    pub(crate) fn text(&mut self, run: &str) -> Option<usize> {
        for (offset, c) in run.char_indices() {
            if is_visible(c) {
                self.visible += 1;
                if self.is_exhausted() {
                    return Some(offset + c.len_utf8());
                }
            }
        }
        None
    }

    /// Count one entity. Returns `true` if that used up the budget.
    pub(crate) fn entity(&mut self) -> bool {
        self.visible += 1;
        self.is_exhausted()
    }

    pub(crate) fn visible(&self) -> usize {
        self.visible
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.visible >= self.limit
    }
}
