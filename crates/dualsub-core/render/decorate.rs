//! Pluggable text decoration for primary-track text
//!
//! Players highlight dictionary words in the primary language. The core only
//! knows the seam: a function from text to decorated text.

/// Transforms primary-track text before it is rendered
pub trait TextDecorator {
    /// Return the decorated form of `text`
    fn decorate(&self, text: &str) -> String;
}

/// Identity decorator used when no highlighter is available
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlainText;

impl TextDecorator for PlainText {
    fn decorate(&self, text: &str) -> String {
        text.to_string()
    }
}

impl<F> TextDecorator for F
where
    F: Fn(&str) -> String,
{
    fn decorate(&self, text: &str) -> String {
        self(text)
    }
}

/// Decorate non-empty text, leaving empty text untouched
pub(crate) fn decorate_non_empty<D: TextDecorator + ?Sized>(decorator: &D, text: &str) -> String {
    if text.is_empty() {
        String::new()
    } else {
        decorator.decorate(text)
    }
}
