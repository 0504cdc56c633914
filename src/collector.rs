//! Named accumulation operations and the accumulators that support them.

use crate::error::{Error, Result};
use crate::source::json_kind;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

/// A well-known combining operation, usable in place of a closure when
/// building a terminal reducer.
///
/// Names serialize in lowercase (`"append"`, `"sum"`, ...) and parse back
/// with [`FromStr`].
///
/// # Examples
///
/// ```
/// use transfold::{Accumulate, Collector};
///
/// let op: Collector = "append".parse().unwrap();
/// assert_eq!(op, Collector::Append);
///
/// let acc = vec![1].accumulate(op, 2).unwrap();
/// assert_eq!(acc, vec![1, 2]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collector {
    /// Push the input onto a collection (insert, for sets).
    Append,
    /// Add the input to a number.
    Sum,
    /// Multiply a number by the input.
    Product,
    /// Add one, ignoring the input.
    Count,
    /// Keep the larger of accumulator and input.
    Max,
    /// Keep the smaller of accumulator and input.
    Min,
}

impl Collector {
    /// Lowercase name of the operation.
    pub fn name(self) -> &'static str {
        match self {
            Collector::Append => "append",
            Collector::Sum => "sum",
            Collector::Product => "product",
            Collector::Count => "count",
            Collector::Max => "max",
            Collector::Min => "min",
        }
    }
}

impl fmt::Display for Collector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collector {
    type Err = Error;

    /// Accepts the lowercase names plus the common aliases `push`, `add`
    /// and `+`, `*`.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "append" | "push" | "<<" => Ok(Collector::Append),
            "sum" | "add" | "+" => Ok(Collector::Sum),
            "product" | "mul" | "*" => Ok(Collector::Product),
            "count" => Ok(Collector::Count),
            "max" => Ok(Collector::Max),
            "min" => Ok(Collector::Min),
            other => Err(Error::unknown_operation(other, "any")),
        }
    }
}

/// An accumulator that knows how to apply [`Collector`] operations to
/// inputs of type `In`.
///
/// Pairs that make no sense (summing into a `Vec`, appending to a number)
/// return [`Error::UnknownOperation`].
pub trait Accumulate<In>: Sized {
    /// Fold one input into the accumulator.
    fn accumulate(self, op: Collector, input: In) -> Result<Self>;
}

impl<T> Accumulate<T> for Vec<T> {
    fn accumulate(mut self, op: Collector, input: T) -> Result<Self> {
        match op {
            Collector::Append => {
                self.push(input);
                Ok(self)
            }
            _ => Err(Error::unknown_operation(op, "Vec")),
        }
    }
}

impl<T> Accumulate<T> for VecDeque<T> {
    fn accumulate(mut self, op: Collector, input: T) -> Result<Self> {
        match op {
            Collector::Append => {
                self.push_back(input);
                Ok(self)
            }
            _ => Err(Error::unknown_operation(op, "VecDeque")),
        }
    }
}

impl<T: Ord> Accumulate<T> for BTreeSet<T> {
    fn accumulate(mut self, op: Collector, input: T) -> Result<Self> {
        match op {
            Collector::Append => {
                self.insert(input);
                Ok(self)
            }
            _ => Err(Error::unknown_operation(op, "BTreeSet")),
        }
    }
}

impl<T: Eq + Hash> Accumulate<T> for HashSet<T> {
    fn accumulate(mut self, op: Collector, input: T) -> Result<Self> {
        match op {
            Collector::Append => {
                self.insert(input);
                Ok(self)
            }
            _ => Err(Error::unknown_operation(op, "HashSet")),
        }
    }
}

impl Accumulate<char> for String {
    fn accumulate(mut self, op: Collector, input: char) -> Result<Self> {
        match op {
            Collector::Append => {
                self.push(input);
                Ok(self)
            }
            _ => Err(Error::unknown_operation(op, "String")),
        }
    }
}

impl Accumulate<&str> for String {
    fn accumulate(mut self, op: Collector, input: &str) -> Result<Self> {
        match op {
            Collector::Append => {
                self.push_str(input);
                Ok(self)
            }
            _ => Err(Error::unknown_operation(op, "String")),
        }
    }
}

impl Accumulate<String> for String {
    fn accumulate(self, op: Collector, input: String) -> Result<Self> {
        self.accumulate(op, input.as_str())
    }
}

/// An input that a numeric accumulator can take.
///
/// `Sum`, `Product`, `Max` and `Min` need the input as a number of the
/// accumulator's own type. `Count` ignores the input, so characters,
/// strings, booleans, JSON values and collections are operands too; they
/// just have no numeric value.
///
/// # Examples
///
/// ```
/// use transfold::{Accumulate, Collector};
///
/// assert_eq!(0usize.accumulate(Collector::Count, 'x').unwrap(), 1);
/// assert_eq!(0usize.accumulate(Collector::Count, "word").unwrap(), 1);
/// assert!(0usize.accumulate(Collector::Sum, 'x').is_err());
/// ```
pub trait Operand<T> {
    /// The input as a number of type `T`, if it is one.
    fn operand(self) -> Option<T>;
}

macro_rules! valueless_operands {
    ($t:ty; $($input:ty),* $(,)?) => {$(
        impl Operand<$t> for $input {
            fn operand(self) -> Option<$t> {
                None
            }
        }
    )*};
}

macro_rules! numeric_operands {
    ($($t:ty),* $(,)?) => {$(
        impl Operand<$t> for $t {
            fn operand(self) -> Option<$t> {
                Some(self)
            }
        }

        impl Operand<$t> for &$t {
            fn operand(self) -> Option<$t> {
                Some(*self)
            }
        }

        valueless_operands!($t; char, &char, bool, &bool, &str, String, &String, Value, &Value);

        impl<U> Operand<$t> for Vec<U> {
            fn operand(self) -> Option<$t> {
                None
            }
        }

        impl<U> Operand<$t> for &Vec<U> {
            fn operand(self) -> Option<$t> {
                None
            }
        }

        impl<U> Operand<$t> for &[U] {
            fn operand(self) -> Option<$t> {
                None
            }
        }

        impl<U> Operand<$t> for Option<U> {
            fn operand(self) -> Option<$t> {
                None
            }
        }
    )*};
}

numeric_operands!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

// Integer arithmetic is checked; overflow is an error, never a panic or a wrap.
macro_rules! integer_accumulate {
    ($($t:ty),* $(,)?) => {$(
        impl<In: Operand<$t>> Accumulate<In> for $t {
            fn accumulate(self, op: Collector, input: In) -> Result<Self> {
                let target = stringify!($t);
                match (op, input.operand()) {
                    (Collector::Count, _) => {
                        self.checked_add(1).ok_or_else(|| Error::overflow(op, target))
                    }
                    (Collector::Sum, Some(x)) => {
                        self.checked_add(x).ok_or_else(|| Error::overflow(op, target))
                    }
                    (Collector::Product, Some(x)) => {
                        self.checked_mul(x).ok_or_else(|| Error::overflow(op, target))
                    }
                    (Collector::Max, Some(x)) => Ok(self.max(x)),
                    (Collector::Min, Some(x)) => Ok(self.min(x)),
                    _ => Err(Error::unknown_operation(op, target)),
                }
            }
        }
    )*};
}

integer_accumulate!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! float_accumulate {
    ($($t:ty),* $(,)?) => {$(
        impl<In: Operand<$t>> Accumulate<In> for $t {
            fn accumulate(self, op: Collector, input: In) -> Result<Self> {
                match (op, input.operand()) {
                    (Collector::Count, _) => Ok(self + 1.0),
                    (Collector::Sum, Some(x)) => Ok(self + x),
                    (Collector::Product, Some(x)) => Ok(self * x),
                    (Collector::Max, Some(x)) => Ok(self.max(x)),
                    (Collector::Min, Some(x)) => Ok(self.min(x)),
                    _ => Err(Error::unknown_operation(op, stringify!($t))),
                }
            }
        }
    )*};
}

float_accumulate!(f32, f64);

impl Accumulate<Value> for Value {
    fn accumulate(self, op: Collector, input: Value) -> Result<Self> {
        let target = json_kind(&self);
        match (op, self, input) {
            (Collector::Append, Value::Array(mut items), input) => {
                items.push(input);
                Ok(Value::Array(items))
            }
            (Collector::Append, Value::String(mut text), Value::String(more)) => {
                text.push_str(&more);
                Ok(Value::String(text))
            }
            (Collector::Count, Value::Number(n), _) => number_op(op, &n, &Number::from(1))
                .ok_or_else(|| Error::unknown_operation(op, target)),
            (Collector::Sum | Collector::Product, Value::Number(a), Value::Number(b)) => {
                number_op(op, &a, &b).ok_or_else(|| Error::unknown_operation(op, target))
            }
            (Collector::Max | Collector::Min, Value::Number(a), Value::Number(b)) => {
                let x = a.as_f64().unwrap_or(f64::NAN);
                let y = b.as_f64().unwrap_or(f64::NAN);
                let keep_input = match op {
                    Collector::Max => y > x,
                    _ => y < x,
                };
                Ok(Value::Number(if keep_input { b } else { a }))
            }
            _ => Err(Error::unknown_operation(op, target)),
        }
    }
}

/// Integer arithmetic when both sides fit in `i64` without overflow,
/// floating point otherwise. `None` when the result is not a finite number.
fn number_op(op: Collector, a: &Number, b: &Number) -> Option<Value> {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        let exact = match op {
            Collector::Product => x.checked_mul(y),
            _ => x.checked_add(y),
        };
        if let Some(n) = exact {
            return Some(Value::from(n));
        }
    }
    let (x, y) = (a.as_f64()?, b.as_f64()?);
    let n = match op {
        Collector::Product => x * y,
        _ => x + y,
    };
    Number::from_f64(n).map(Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collector_names_round_trip_through_serde() {
        let encoded = serde_json::to_string(&Collector::Append).unwrap();
        assert_eq!(encoded, "\"append\"");
        let decoded: Collector = serde_json::from_str("\"max\"").unwrap();
        assert_eq!(decoded, Collector::Max);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("push".parse::<Collector>().unwrap(), Collector::Append);
        assert_eq!("+".parse::<Collector>().unwrap(), Collector::Sum);
        assert!("frobnicate".parse::<Collector>().is_err());
    }

    #[test]
    fn test_numeric_ops() {
        assert_eq!(3i64.accumulate(Collector::Sum, 4).unwrap(), 7);
        assert_eq!(3i64.accumulate(Collector::Product, 4).unwrap(), 12);
        assert_eq!(3i64.accumulate(Collector::Count, 100).unwrap(), 4);
        assert_eq!(3i64.accumulate(Collector::Max, 4).unwrap(), 4);
        assert_eq!(3i64.accumulate(Collector::Min, 4).unwrap(), 3);
        assert_eq!(1.5f64.accumulate(Collector::Sum, &2.0).unwrap(), 3.5);
    }

    #[test]
    fn test_mismatched_op_is_unknown_operation() {
        let err = vec![1].accumulate(Collector::Sum, 2).unwrap_err();
        assert_eq!(
            err,
            Error::UnknownOperation {
                op: "sum".to_string(),
                target: "Vec"
            }
        );
        assert!(5u8.accumulate(Collector::Append, 1).is_err());
        assert!(5u8.accumulate(Collector::Sum, 'a').is_err());
    }

    #[test]
    fn test_integer_overflow_is_an_error() {
        assert_eq!(
            i32::MAX.accumulate(Collector::Sum, 1).unwrap_err(),
            Error::Overflow {
                op: "sum".to_string(),
                target: "i32"
            }
        );
        assert!(u8::MAX.accumulate(Collector::Count, 'x').is_err());
        assert!(i64::MIN.accumulate(Collector::Product, 2).is_err());
        assert!((-1i8).accumulate(Collector::Sum, i8::MIN).is_err());
    }

    #[test]
    fn test_count_accepts_any_operand() {
        assert_eq!(0usize.accumulate(Collector::Count, 'a').unwrap(), 1);
        assert_eq!(1u32.accumulate(Collector::Count, String::from("s")).unwrap(), 2);
        assert_eq!(2i64.accumulate(Collector::Count, vec![1, 2, 3]).unwrap(), 3);
        assert_eq!(0.5f64.accumulate(Collector::Count, json!(null)).unwrap(), 1.5);
    }

    #[test]
    fn test_string_append() {
        let s = String::new().accumulate(Collector::Append, 'a').unwrap();
        let s = s.accumulate(Collector::Append, "bc").unwrap();
        assert_eq!(s, "abc");
    }

    #[test]
    fn test_json_accumulate() {
        let arr = json!([1]).accumulate(Collector::Append, json!("x")).unwrap();
        assert_eq!(arr, json!([1, "x"]));

        assert_eq!(json!(2).accumulate(Collector::Sum, json!(3)).unwrap(), json!(5));
        let sum = json!(2).accumulate(Collector::Sum, json!(0.5)).unwrap();
        assert_eq!(sum, json!(2.5));
        let count = json!(2).accumulate(Collector::Count, json!(null)).unwrap();
        assert_eq!(count, json!(3));
        let max = json!(2).accumulate(Collector::Max, json!(9)).unwrap();
        assert_eq!(max, json!(9));

        let err = json!({}).accumulate(Collector::Append, json!(1)).unwrap_err();
        assert_eq!(err, Error::unknown_operation("append", "object"));
    }
}
