use crate::collector::{Accumulate, Collector};
use crate::error::{Error, Result};
use crate::reduced::Step;
use std::any::type_name;
use std::fmt;

/// The accumulator-update protocol.
///
/// A reducer knows its initial accumulator, folds one input into an
/// accumulator per `step`, and finalizes an accumulator with `result`.
/// `step` may ask the caller to stop by returning [`Step::Reduced`].
///
/// Reducers built by transducers decorate exactly one downstream reducer
/// and must pass a downstream `Step::Reduced` back up unchanged.
pub trait Reducer<In> {
    /// Running accumulator.
    type Acc;
    /// Finalized value produced by [`Reducer::result`].
    type Output;

    /// The initial accumulator.
    fn init(&self) -> Self::Acc;

    /// Fold one input into the accumulator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownOperation`] when a named operation cannot be
    /// applied to the accumulator.
    fn step(&mut self, acc: Self::Acc, input: In) -> Result<Step<Self::Acc>>;

    /// Finalize an accumulator.
    fn result(&self, acc: Self::Acc) -> Self::Output;
}

/// Core of every decorating reducer: exclusive ownership of one downstream
/// reducer.
///
/// Decorators delegate `init` and `result` to the downstream reducer and
/// only supply their own `step`, usually ending in [`BaseReducer::forward`].
#[derive(Debug, Clone)]
pub struct BaseReducer<R> {
    reducer: R,
}

impl<R> BaseReducer<R> {
    /// Take ownership of the downstream reducer.
    pub fn new(reducer: R) -> Self {
        BaseReducer { reducer }
    }

    /// The downstream reducer.
    pub fn downstream(&self) -> &R {
        &self.reducer
    }

    /// The downstream reducer, mutably.
    pub fn downstream_mut(&mut self) -> &mut R {
        &mut self.reducer
    }

    /// Pass an input on to the downstream reducer.
    pub fn forward<In>(&mut self, acc: R::Acc, input: In) -> Result<Step<R::Acc>>
    where
        R: Reducer<In>,
    {
        self.reducer.step(acc, input)
    }
}

/// Which kind of step a terminal reducer runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepKind {
    /// A caller-supplied combining function.
    Function,
    /// A named operation applied to the accumulator.
    Operation(String),
}

enum Combine<A, In> {
    Function(Box<dyn FnMut(A, In) -> A>),
    Operation(Collector, fn(Collector, A, In) -> Result<A>),
    Unresolved(String),
}

impl<A, In> Combine<A, In> {
    fn kind(&self) -> StepKind {
        match self {
            Combine::Function(_) => StepKind::Function,
            Combine::Operation(op, _) => StepKind::Operation(op.to_string()),
            Combine::Unresolved(name) => StepKind::Operation(name.clone()),
        }
    }
}

fn accumulate_with<A: Accumulate<In>, In>(op: Collector, acc: A, input: In) -> Result<A> {
    acc.accumulate(op, input)
}

fn resolve<A: Accumulate<In>, In>(name: &str) -> Combine<A, In> {
    match name.parse::<Collector>() {
        Ok(op) => Combine::Operation(op, accumulate_with::<A, In>),
        Err(_) => {
            log::debug!(
                "operation `{name}` is not a known collector; deferring failure to first step"
            );
            Combine::Unresolved(name.to_string())
        }
    }
}

/// Terminal reducer: an initial value plus either a combining function or a
/// named [`Collector`] operation.
///
/// `result` is the identity.
///
/// # Examples
///
/// ```
/// use transfold::{Collector, FnReducer, Reducer, Step};
///
/// let mut sum = FnReducer::from_fn(0, |acc: i32, x: i32| acc + x);
/// assert_eq!(sum.step(1, 2).unwrap(), Step::Continue(3));
///
/// let mut push = FnReducer::<Vec<i32>, i32>::from_op(Vec::new(), Collector::Append);
/// assert_eq!(push.step(vec![1], 2).unwrap(), Step::Continue(vec![1, 2]));
/// ```
pub struct FnReducer<A, In> {
    init: A,
    combine: Combine<A, In>,
}

impl<A, In> FnReducer<A, In> {
    /// Build from an initial value and a combining function.
    pub fn from_fn<F>(init: A, f: F) -> Self
    where
        F: FnMut(A, In) -> A + 'static,
    {
        FnReducer {
            init,
            combine: Combine::Function(Box::new(f)),
        }
    }

    /// Build from an initial value and a named operation.
    pub fn from_op(init: A, op: Collector) -> Self
    where
        A: Accumulate<In>,
    {
        FnReducer {
            init,
            combine: Combine::Operation(op, accumulate_with::<A, In>),
        }
    }

    /// Start configuring a reducer whose step source is chosen later.
    pub fn builder(init: A) -> ReducerBuilder<A, In> {
        ReducerBuilder {
            init,
            function: None,
            operation: None,
        }
    }

    /// Which kind of step this reducer runs.
    pub fn kind(&self) -> StepKind {
        self.combine.kind()
    }
}

impl<A: fmt::Debug, In> fmt::Debug for FnReducer<A, In> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnReducer")
            .field("init", &self.init)
            .field("kind", &self.combine.kind())
            .finish()
    }
}

impl<A: Clone, In> Reducer<In> for FnReducer<A, In> {
    type Acc = A;
    type Output = A;

    fn init(&self) -> A {
        self.init.clone()
    }

    fn step(&mut self, acc: A, input: In) -> Result<Step<A>> {
        match &mut self.combine {
            Combine::Function(f) => Ok(Step::Continue(f(acc, input))),
            Combine::Operation(op, apply) => apply(*op, acc, input).map(Step::Continue),
            Combine::Unresolved(name) => Err(Error::UnknownOperation {
                op: name.clone(),
                target: type_name::<A>(),
            }),
        }
    }

    fn result(&self, acc: A) -> A {
        acc
    }
}

/// Builder for [`FnReducer`], for when the step source is decided at run
/// time (for example from a configured operation name).
///
/// Exactly one of [`function`](Self::function) and
/// [`operation`](Self::operation) / [`operation_named`](Self::operation_named)
/// must be set before [`build`](Self::build).
///
/// # Examples
///
/// ```
/// use transfold::{Error, FnReducer};
///
/// let ok = FnReducer::<i64, i64>::builder(0).operation_named("sum").build();
/// assert!(ok.is_ok());
///
/// let neither = FnReducer::<i64, i64>::builder(0).build();
/// assert!(matches!(neither, Err(Error::Configuration(_))));
/// ```
pub struct ReducerBuilder<A, In> {
    init: A,
    function: Option<Box<dyn FnMut(A, In) -> A>>,
    operation: Option<Combine<A, In>>,
}

impl<A, In> ReducerBuilder<A, In> {
    /// Use a combining function as the step.
    pub fn function<F>(mut self, f: F) -> Self
    where
        F: FnMut(A, In) -> A + 'static,
    {
        self.function = Some(Box::new(f));
        self
    }

    /// Use a named operation as the step.
    pub fn operation(mut self, op: Collector) -> Self
    where
        A: Accumulate<In>,
    {
        self.operation = Some(Combine::Operation(op, accumulate_with::<A, In>));
        self
    }

    /// Use an operation looked up by name as the step.
    ///
    /// A name that matches no [`Collector`] is still accepted here; the
    /// reducer then fails with [`Error::UnknownOperation`] on its first step.
    pub fn operation_named(mut self, name: &str) -> Self
    where
        A: Accumulate<In>,
    {
        self.operation = Some(resolve::<A, In>(name));
        self
    }

    /// Finish the reducer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if both a function and an operation
    /// were set, or neither.
    pub fn build(self) -> Result<FnReducer<A, In>> {
        let combine = match (self.function, self.operation) {
            (Some(f), None) => Combine::Function(f),
            (None, Some(op)) => op,
            (Some(_), Some(_)) => {
                return Err(Error::Configuration(
                    "both a combining function and an operation were given".to_string(),
                ));
            }
            (None, None) => {
                return Err(Error::Configuration(
                    "a combining function or an operation is required".to_string(),
                ));
            }
        };
        Ok(FnReducer {
            init: self.init,
            combine,
        })
    }
}

/// Terminal reducer driven by a [`Collector`] operation.
///
/// Generic over its input type, so the input is fixed by whatever feeds it.
/// This is what a bare `Collector` becomes when handed to
/// [`transduce`](crate::transduce).
///
/// # Examples
///
/// ```
/// use transfold::{Collector, CollectorReducer, Reducer, Step};
///
/// let mut r = CollectorReducer::new(String::new(), Collector::Append);
/// assert_eq!(r.step(String::from("a"), 'b').unwrap(), Step::Continue(String::from("ab")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorReducer<A> {
    init: A,
    op: Collector,
}

impl<A> CollectorReducer<A> {
    /// Build from an initial value and an operation.
    pub fn new(init: A, op: Collector) -> Self {
        CollectorReducer { init, op }
    }

    /// The operation applied on each step.
    pub fn op(&self) -> Collector {
        self.op
    }
}

impl<A, In> Reducer<In> for CollectorReducer<A>
where
    A: Accumulate<In> + Clone,
{
    type Acc = A;
    type Output = A;

    fn init(&self) -> A {
        self.init.clone()
    }

    fn step(&mut self, acc: A, input: In) -> Result<Step<A>> {
        acc.accumulate(self.op, input).map(Step::Continue)
    }

    fn result(&self, acc: A) -> A {
        acc
    }
}

/// Either a ready-made reducer or a recipe for building one from an
/// initial value.
///
/// Implemented by [`FnReducer`] and [`CollectorReducer`] (returned as is)
/// and by a bare [`Collector`], which is seeded with the initial value.
/// Custom reducers implement it by returning themselves.
pub trait IntoReducer<A> {
    /// The reducer produced.
    type Reducer;

    /// Build the reducer, seeding it with `init` when it needs one.
    fn into_reducer(self, init: &A) -> Self::Reducer;
}

impl<A, In> IntoReducer<A> for FnReducer<A, In> {
    type Reducer = Self;

    fn into_reducer(self, _init: &A) -> Self {
        self
    }
}

impl<A> IntoReducer<A> for CollectorReducer<A> {
    type Reducer = Self;

    fn into_reducer(self, _init: &A) -> Self {
        self
    }
}

impl<A: Clone> IntoReducer<A> for Collector {
    type Reducer = CollectorReducer<A>;

    fn into_reducer(self, init: &A) -> CollectorReducer<A> {
        CollectorReducer::new(init.clone(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_rejects_both() {
        let result = FnReducer::builder(0i64)
            .function(|acc: i64, x: i64| acc + x)
            .operation(Collector::Sum)
            .build();
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_builder_rejects_neither() {
        let result = FnReducer::<Vec<u8>, u8>::builder(Vec::new()).build();
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_unknown_name_fails_on_first_step() {
        let mut r = FnReducer::<i64, i64>::builder(0)
            .operation_named("frobnicate")
            .build()
            .unwrap();
        assert_eq!(r.kind(), StepKind::Operation("frobnicate".to_string()));
        let err = r.step(0, 1).unwrap_err();
        assert!(matches!(err, Error::UnknownOperation { ref op, .. } if op == "frobnicate"));
    }

    #[test]
    fn test_result_is_identity() {
        let r = FnReducer::<u32, u32>::from_op(7, Collector::Sum);
        assert_eq!(Reducer::<u32>::result(&r, 9), 9);
        assert_eq!(Reducer::<u32>::init(&r), 7);
    }

    #[test]
    fn test_collector_is_seeded_with_init() {
        let mut r = Collector::Count.into_reducer(&10u64);
        assert_eq!(Reducer::<u64>::init(&r), 10);
        assert_eq!(r.step(10u64, 99u64).unwrap(), Step::Continue(11));
    }

    #[test]
    fn test_base_reducer_forwards() {
        let mut base = BaseReducer::new(FnReducer::from_fn(0, |acc: i32, x: i32| acc - x));
        assert_eq!(base.forward(10, 3).unwrap(), Step::Continue(7));
        assert_eq!(base.downstream().kind(), StepKind::Function);
    }
}
