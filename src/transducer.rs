//! Transducers: reusable descriptions of how to turn one reducer into
//! another.

use crate::error::Result;
use crate::reduced::Step;
use crate::reducer::{BaseReducer, Reducer};
use std::fmt;

/// Turns a downstream reducer `R` into a new reducer.
///
/// A transducer holds only configuration. Each call to [`wrap`](Self::wrap)
/// builds an independent reducer with its own fresh state, so one
/// transducer value can drive any number of reductions.
pub trait Transducer<R> {
    /// The reducer produced by [`wrap`](Self::wrap).
    type Reducer;

    /// Decorate `reducer`, which the result owns exclusively.
    fn wrap(&self, reducer: R) -> Self::Reducer;
}

impl<R, T: Transducer<R> + ?Sized> Transducer<R> for &T {
    type Reducer = T::Reducer;

    fn wrap(&self, reducer: R) -> T::Reducer {
        (**self).wrap(reducer)
    }
}

/// The transducer that changes nothing: `wrap` returns its argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl<R> Transducer<R> for Identity {
    type Reducer = R;

    fn wrap(&self, reducer: R) -> R {
        reducer
    }
}

/// Two transducers chained so that elements flow through `first`, then
/// through `rest`.
///
/// Wrapping runs the other way round: `rest` wraps the downstream reducer
/// and `first` wraps the result, which puts `first` outermost.
#[derive(Debug, Clone, Copy)]
pub struct Compose<A, B> {
    first: A,
    rest: B,
}

impl<A, B> Compose<A, B> {
    /// Chain `first` before `rest`.
    pub fn new(first: A, rest: B) -> Self {
        Compose { first, rest }
    }
}

impl<R, A, B> Transducer<R> for Compose<A, B>
where
    B: Transducer<R>,
    A: Transducer<B::Reducer>,
{
    type Reducer = A::Reducer;

    fn wrap(&self, reducer: R) -> A::Reducer {
        self.first.wrap(self.rest.wrap(reducer))
    }
}

/// Element-wise transform.
#[derive(Clone, Copy)]
pub struct Mapping<F> {
    f: F,
}

impl<F> Mapping<F> {
    /// Apply `f` to every element.
    pub fn new(f: F) -> Self {
        Mapping { f }
    }
}

impl<F> fmt::Debug for Mapping<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapping").finish_non_exhaustive()
    }
}

impl<R, F: Clone> Transducer<R> for Mapping<F> {
    type Reducer = MappingReducer<R, F>;

    fn wrap(&self, reducer: R) -> Self::Reducer {
        MappingReducer {
            base: BaseReducer::new(reducer),
            f: self.f.clone(),
        }
    }
}

/// Reducer built by [`Mapping`].
pub struct MappingReducer<R, F> {
    base: BaseReducer<R>,
    f: F,
}

impl<A, B, R, F> Reducer<A> for MappingReducer<R, F>
where
    R: Reducer<B>,
    F: FnMut(A) -> B,
{
    type Acc = R::Acc;
    type Output = R::Output;

    fn init(&self) -> R::Acc {
        self.base.downstream().init()
    }

    fn step(&mut self, acc: R::Acc, input: A) -> Result<Step<R::Acc>> {
        let mapped = (self.f)(input);
        self.base.forward(acc, mapped)
    }

    fn result(&self, acc: R::Acc) -> R::Output {
        self.base.downstream().result(acc)
    }
}

/// Keeps the elements that satisfy a predicate, in order.
#[derive(Clone, Copy)]
pub struct Filtering<P> {
    pred: P,
}

impl<P> Filtering<P> {
    /// Keep elements for which `pred` returns `true`.
    pub fn new(pred: P) -> Self {
        Filtering { pred }
    }
}

impl<P> fmt::Debug for Filtering<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filtering").finish_non_exhaustive()
    }
}

impl<R, P: Clone> Transducer<R> for Filtering<P> {
    type Reducer = FilteringReducer<R, P>;

    fn wrap(&self, reducer: R) -> Self::Reducer {
        FilteringReducer {
            base: BaseReducer::new(reducer),
            pred: self.pred.clone(),
        }
    }
}

/// Reducer built by [`Filtering`].
pub struct FilteringReducer<R, P> {
    base: BaseReducer<R>,
    pred: P,
}

impl<A, R, P> Reducer<A> for FilteringReducer<R, P>
where
    R: Reducer<A>,
    P: FnMut(&A) -> bool,
{
    type Acc = R::Acc;
    type Output = R::Output;

    fn init(&self) -> R::Acc {
        self.base.downstream().init()
    }

    fn step(&mut self, acc: R::Acc, input: A) -> Result<Step<R::Acc>> {
        if (self.pred)(&input) {
            self.base.forward(acc, input)
        } else {
            Ok(Step::Continue(acc))
        }
    }

    fn result(&self, acc: R::Acc) -> R::Output {
        self.base.downstream().result(acc)
    }
}

/// Lets the first `n` elements through, then halts the reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Taking {
    n: usize,
}

impl Taking {
    /// Allow `n` elements through.
    pub fn new(n: usize) -> Self {
        Taking { n }
    }
}

impl<R> Transducer<R> for Taking {
    type Reducer = TakingReducer<R>;

    fn wrap(&self, reducer: R) -> TakingReducer<R> {
        TakingReducer {
            base: BaseReducer::new(reducer),
            remaining: self.n,
        }
    }
}

/// Reducer built by [`Taking`]. Owns the count of elements still allowed.
#[derive(Debug)]
pub struct TakingReducer<R> {
    base: BaseReducer<R>,
    remaining: usize,
}

impl<A, R: Reducer<A>> Reducer<A> for TakingReducer<R> {
    type Acc = R::Acc;
    type Output = R::Output;

    fn init(&self) -> R::Acc {
        self.base.downstream().init()
    }

    /// The element arriving after the quota is used up is dropped, and the
    /// accumulator so far becomes the final value. Once exhausted, every
    /// later call halts the same way.
    fn step(&mut self, acc: R::Acc, input: A) -> Result<Step<R::Acc>> {
        match self.remaining.checked_sub(1) {
            Some(left) => {
                self.remaining = left;
                self.base.forward(acc, input)
            }
            None => {
                log::trace!("taking: quota exhausted, halting");
                Ok(Step::reduced(acc))
            }
        }
    }

    fn result(&self, acc: R::Acc) -> R::Output {
        self.base.downstream().result(acc)
    }
}
