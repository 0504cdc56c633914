//! Sources: anything the drive loop can feed, one element at a time.
//!
//! Ordered collections yield their elements and character sequences yield
//! one `char` at a time. Both go through the same [`Source`] interface, so
//! the drive loop has a single code path.

use crate::error::{Error, Result};
use serde_json::Value;
use std::collections::VecDeque;
use std::ops::Range;

/// A finite sequence of elements that can be driven through a reducer.
///
/// # Examples
///
/// ```
/// use transfold::Source;
///
/// let chars: Vec<char> = "hey".elements().unwrap().collect();
/// assert_eq!(chars, vec!['h', 'e', 'y']);
///
/// let nums: Vec<i32> = vec![1, 2].elements().unwrap().collect();
/// assert_eq!(nums, vec![1, 2]);
/// ```
pub trait Source {
    /// Element type fed to the reducer.
    type Item;
    /// Iterator over the elements, in order.
    type Elements: Iterator<Item = Self::Item>;

    /// Start iterating.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedSourceKind`] when the value is neither an
    /// ordered sequence nor a character sequence. Only dynamically typed
    /// sources can fail this way.
    fn elements(self) -> Result<Self::Elements>;
}

impl<T> Source for Vec<T> {
    type Item = T;
    type Elements = std::vec::IntoIter<T>;

    fn elements(self) -> Result<Self::Elements> {
        Ok(self.into_iter())
    }
}

impl<T> Source for VecDeque<T> {
    type Item = T;
    type Elements = std::collections::vec_deque::IntoIter<T>;

    fn elements(self) -> Result<Self::Elements> {
        Ok(self.into_iter())
    }
}

impl<T, const N: usize> Source for [T; N] {
    type Item = T;
    type Elements = std::array::IntoIter<T, N>;

    fn elements(self) -> Result<Self::Elements> {
        Ok(self.into_iter())
    }
}

impl<'a, T> Source for &'a [T] {
    type Item = &'a T;
    type Elements = std::slice::Iter<'a, T>;

    fn elements(self) -> Result<Self::Elements> {
        Ok(self.iter())
    }
}

impl<'a, T> Source for &'a Vec<T> {
    type Item = &'a T;
    type Elements = std::slice::Iter<'a, T>;

    fn elements(self) -> Result<Self::Elements> {
        Ok(self.iter())
    }
}

impl<T> Source for Option<T> {
    type Item = T;
    type Elements = std::option::IntoIter<T>;

    fn elements(self) -> Result<Self::Elements> {
        Ok(self.into_iter())
    }
}

impl<T> Source for Range<T>
where
    Range<T>: Iterator<Item = T>,
{
    type Item = T;
    type Elements = Range<T>;

    fn elements(self) -> Result<Self::Elements> {
        Ok(self)
    }
}

impl<'a> Source for &'a str {
    type Item = char;
    type Elements = std::str::Chars<'a>;

    fn elements(self) -> Result<Self::Elements> {
        Ok(self.chars())
    }
}

impl<'a> Source for &'a String {
    type Item = char;
    type Elements = std::str::Chars<'a>;

    fn elements(self) -> Result<Self::Elements> {
        Ok(self.chars())
    }
}

impl Source for String {
    type Item = char;
    type Elements = OwnedChars;

    fn elements(self) -> Result<Self::Elements> {
        Ok(OwnedChars { text: self, pos: 0 })
    }
}

/// Characters of an owned `String`, in order.
#[derive(Debug, Clone)]
pub struct OwnedChars {
    text: String,
    pos: usize,
}

impl Iterator for OwnedChars {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let c = self.text[self.pos..].chars().next()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.text.len() - self.pos;
        (rest.div_ceil(4), Some(rest))
    }
}

/// Adapter that turns any [`IntoIterator`] into a [`Source`].
///
/// Built with [`iter`].
#[derive(Debug, Clone)]
pub struct Elements<I>(I);

/// Drive any iterable, such as a `HashMap`, a `BTreeSet` or an iterator
/// chain.
///
/// # Examples
///
/// ```
/// use transfold::{source, transduce, Collector, Identity};
///
/// let squares = source::iter((1..=4).map(|x| x * x));
/// let total = transduce(Identity, Collector::Sum, 0, squares).unwrap();
/// assert_eq!(total, 30);
/// ```
pub fn iter<I: IntoIterator>(items: I) -> Elements<I> {
    Elements(items)
}

impl<I: IntoIterator> Source for Elements<I> {
    type Item = I::Item;
    type Elements = I::IntoIter;

    fn elements(self) -> Result<Self::Elements> {
        Ok(self.0.into_iter())
    }
}

/// A JSON array drives its elements; a JSON string drives its characters,
/// each as a one-character string. Every other kind is rejected.
impl Source for Value {
    type Item = Value;
    type Elements = JsonElements;

    fn elements(self) -> Result<Self::Elements> {
        match self {
            Value::Array(items) => Ok(JsonElements::Array(items.into_iter())),
            Value::String(text) => Ok(JsonElements::Chars(text.elements()?)),
            other => Err(Error::UnsupportedSourceKind {
                kind: json_kind(&other),
            }),
        }
    }
}

/// Elements of a JSON array or string source.
#[derive(Debug)]
pub enum JsonElements {
    /// Array elements.
    Array(std::vec::IntoIter<Value>),
    /// String characters.
    Chars(OwnedChars),
}

impl Iterator for JsonElements {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        match self {
            JsonElements::Array(items) => items.next(),
            JsonElements::Chars(chars) => chars.next().map(|c| Value::String(c.to_string())),
        }
    }
}

/// Short name of a JSON value's kind, for error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_owned_chars_handles_multibyte() {
        let chars: Vec<char> = String::from("añ😀b").elements().unwrap().collect();
        assert_eq!(chars, vec!['a', 'ñ', '😀', 'b']);
    }

    #[test]
    fn test_json_string_yields_single_char_strings() {
        let items: Vec<Value> = json!("ab").elements().unwrap().collect();
        assert_eq!(items, vec![json!("a"), json!("b")]);
    }

    #[test]
    fn test_json_scalar_is_unsupported() {
        let err = json!(42).elements().unwrap_err();
        assert_eq!(err, Error::UnsupportedSourceKind { kind: "number" });
        assert!(json!({"a": 1}).elements().is_err());
    }
}
