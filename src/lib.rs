//! Composable transducers.
//!
//! A transducer describes a transformation (map, filter, take, flatten, ...)
//! without knowing where elements come from or where they end up. It is
//! built once and then driven against any [`Source`] into any reducer, with
//! the same early-termination behaviour everywhere.
//!
//! ```
//! use transfold::{compose, filtering, mapping, taking, transduce, Collector};
//!
//! let xf = compose![
//!     filtering(|x: &i32| x % 2 == 1),
//!     mapping(|x: i32| x * x),
//!     taking(3),
//! ];
//! let squares = transduce(&xf, Collector::Append, Vec::new(), 1..100).unwrap();
//! assert_eq!(squares, vec![1, 9, 25]);
//!
//! // The same pipeline over a character sequence.
//! let xf = compose![filtering(|c: &char| c.is_alphabetic()), taking(4)];
//! let word = transduce(&xf, Collector::Append, String::new(), "a-b_c d!e").unwrap();
//! assert_eq!(word, "abcd");
//! ```

mod cat;
mod collector;
mod error;
mod reduced;
mod reducer;
pub mod source;
mod transduce;
mod transducer;

pub use cat::{Catting, CattingReducer, MapCat};
pub use collector::{Accumulate, Collector, Operand};
pub use error::{Error, Result};
pub use reduced::{Reduced, Step};
pub use reducer::{
    BaseReducer, CollectorReducer, FnReducer, IntoReducer, Reducer, ReducerBuilder, StepKind,
};
pub use source::Source;
pub use transduce::{apply, reduce, transduce};
pub use transducer::{
    Compose, Filtering, FilteringReducer, Identity, Mapping, MappingReducer, Taking,
    TakingReducer, Transducer,
};

/// Transform every element with `f`.
pub fn mapping<F>(f: F) -> Mapping<F> {
    Mapping::new(f)
}

/// Keep only the elements for which `pred` returns `true`.
pub fn filtering<P>(pred: P) -> Filtering<P> {
    Filtering::new(pred)
}

/// Let the first `n` elements through, then halt the whole reduction.
///
/// `taking(0)` halts on the first element without passing anything on.
pub fn taking(n: usize) -> Taking {
    Taking::new(n)
}

/// Flatten one level: each element is itself driven as a [`Source`].
pub fn cat() -> Catting {
    Catting
}

/// Map each element to a source with `f`, then flatten.
///
/// Same as `compose(mapping(f), cat())`.
///
/// # Examples
///
/// ```
/// use transfold::{mapcat, transduce, Collector};
///
/// let repeat = mapcat(|n: usize| vec![n; n]);
/// let out = transduce(repeat, Collector::Append, Vec::new(), vec![1, 2, 3]).unwrap();
/// assert_eq!(out, vec![1, 2, 2, 3, 3, 3]);
/// ```
pub fn mapcat<F>(f: F) -> MapCat<F> {
    compose(mapping(f), cat())
}

/// Chain two transducers. Elements pass through `first`, then `rest`.
///
/// Use [`compose!`] for any number of transducers.
pub fn compose<A, B>(first: A, rest: B) -> Compose<A, B> {
    Compose::new(first, rest)
}

/// The empty pipeline.
pub fn identity() -> Identity {
    Identity
}

/// Terminal reducer from an initial value and a combining function.
///
/// For a named operation use [`CollectorReducer::new`], or pass the
/// [`Collector`] itself to [`transduce`].
///
/// # Examples
///
/// ```
/// use transfold::{mapping, reducer, transduce};
///
/// let r = reducer(0, |acc: i64, x: i64| acc + x);
/// assert_eq!(transduce(mapping(|x: i64| x * 2), r, 0, vec![1, 2, 3]).unwrap(), 12);
/// ```
pub fn reducer<A, In, F>(init: A, f: F) -> FnReducer<A, In>
where
    F: FnMut(A, In) -> A + 'static,
{
    FnReducer::from_fn(init, f)
}

/// Chain any number of transducers, applied to elements left to right.
///
/// `compose![]` is [`Identity`].
///
/// # Examples
///
/// ```
/// use transfold::{compose, mapping, transduce, Collector};
///
/// let xf = compose![mapping(|x: i32| x + 1), mapping(|x: i32| x * 10)];
/// assert_eq!(transduce(xf, Collector::Append, Vec::new(), vec![1, 2]).unwrap(), vec![20, 30]);
/// ```
#[macro_export]
macro_rules! compose {
    () => {
        $crate::Identity
    };
    ($only:expr $(,)?) => {
        $only
    };
    ($first:expr, $($rest:expr),+ $(,)?) => {
        $crate::Compose::new($first, $crate::compose!($($rest),+))
    };
}
