use crate::error::Result;
use crate::reduced::Step;
use crate::reducer::{IntoReducer, Reducer};
use crate::source::Source;
use crate::transducer::Transducer;

/// Drive `source` through `reducer`, starting from `init`.
///
/// Each element is passed to `step` in order. When a step returns
/// [`Step::Reduced`], one level of wrapping is removed and that value is
/// returned at once; no further element is read. Otherwise the final
/// accumulator is returned once the source is exhausted.
///
/// Neither `init()` nor `result()` of the reducer is called: the caller's
/// `init` is the starting accumulator and the accumulator is returned as is.
///
/// # Errors
///
/// Returns the first error raised by the source or by a step.
///
/// # Examples
///
/// ```
/// use transfold::{reduce, FnReducer};
///
/// let mut longest = FnReducer::from_fn(0, |acc: usize, w: &str| acc.max(w.len()));
/// let n = reduce(&mut longest, 0, vec!["a", "abc", "ab"]).unwrap();
/// assert_eq!(n, 3);
/// ```
pub fn reduce<R, S>(reducer: &mut R, init: R::Acc, source: S) -> Result<R::Acc>
where
    S: Source,
    R: Reducer<S::Item>,
{
    let mut acc = init;
    for input in source.elements()? {
        match reducer.step(acc, input)? {
            Step::Continue(next) => acc = next,
            Step::Reduced(done) => {
                log::trace!("reduction halted early");
                return Ok(done.into_inner());
            }
        }
    }
    Ok(acc)
}

/// Wrap the reducer described by `rf` with `xform` and return the
/// composite reducer without driving it.
///
/// # Examples
///
/// ```
/// use transfold::{apply, mapping, Collector, Reducer, Step};
///
/// let mut r = apply(mapping(|x: i32| x * 3), Collector::Sum, &0);
/// assert_eq!(r.step(1, 2).unwrap(), Step::Continue(7));
/// ```
pub fn apply<T, Rf, A>(xform: T, rf: Rf, init: &A) -> T::Reducer
where
    Rf: IntoReducer<A>,
    T: Transducer<Rf::Reducer>,
{
    xform.wrap(rf.into_reducer(init))
}

/// Build the reducer chain for `xform` over `rf` and drive `source`
/// through it, starting from `init`.
///
/// `rf` is a ready-made reducer or a [`Collector`](crate::Collector),
/// which is seeded with `init`. A fresh reducer chain is built on every call,
/// so the same transducer (pass `&xform` to keep it) can be reused freely.
///
/// # Errors
///
/// Returns the first error raised by the source or by a step. Early
/// termination is not an error.
///
/// # Examples
///
/// ```
/// use transfold::{filtering, mapping, transduce, Collector, CollectorReducer};
///
/// let doubled_sum = transduce(mapping(|x: i64| x * 2), Collector::Sum, 0, vec![1, 2, 3]).unwrap();
/// assert_eq!(doubled_sum, 12);
///
/// let evens = transduce(
///     filtering(|x: &i32| x % 2 == 0),
///     CollectorReducer::new(Vec::new(), Collector::Append),
///     Vec::new(),
///     vec![1, 2, 3, 4],
/// )
/// .unwrap();
/// assert_eq!(evens, vec![2, 4]);
/// ```
pub fn transduce<T, Rf, A, S>(xform: T, rf: Rf, init: A, source: S) -> Result<A>
where
    S: Source,
    Rf: IntoReducer<A>,
    T: Transducer<Rf::Reducer>,
    T::Reducer: Reducer<S::Item, Acc = A>,
{
    let mut composite = xform.wrap(rf.into_reducer(&init));
    reduce(&mut composite, init, source)
}
