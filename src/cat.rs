//! Flattening: every input is itself a source whose elements are fed
//! downstream one by one.

use crate::error::Result;
use crate::reduced::Step;
use crate::reducer::{BaseReducer, Reducer};
use crate::source::Source;
use crate::transduce::reduce;
use crate::transducer::{Compose, Mapping, Transducer};

/// Flattens one level of nesting.
///
/// # Examples
///
/// ```
/// use transfold::{cat, transduce, Collector};
///
/// let total = transduce(cat(), Collector::Sum, 0, vec![vec![1, 2], vec![3], vec![4, 5]]).unwrap();
/// assert_eq!(total, 15);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Catting;

/// Map every element to a source, then flatten.
pub type MapCat<F> = Compose<Mapping<F>, Catting>;

impl<R> Transducer<R> for Catting {
    type Reducer = CattingReducer<R>;

    fn wrap(&self, reducer: R) -> CattingReducer<R> {
        CattingReducer {
            base: BaseReducer::new(reducer),
        }
    }
}

/// Reducer built by [`Catting`].
#[derive(Debug)]
pub struct CattingReducer<R> {
    base: BaseReducer<R>,
}

impl<S, R> Reducer<S> for CattingReducer<R>
where
    S: Source,
    R: Reducer<S::Item>,
{
    type Acc = R::Acc;
    type Output = R::Output;

    fn init(&self) -> R::Acc {
        self.base.downstream().init()
    }

    /// Runs a nested reduction over `input`, starting from `acc` and feeding
    /// the downstream reducer directly. A halt inside the nested source
    /// comes back as a halt of this step.
    fn step(&mut self, acc: R::Acc, input: S) -> Result<Step<R::Acc>> {
        let mut preserving = PreservingReduced::new(self.base.downstream_mut());
        reduce(&mut preserving, Step::Continue(acc), input)
    }

    fn result(&self, acc: R::Acc) -> R::Output {
        self.base.downstream().result(acc)
    }
}

/// Pass-through adapter for a nested reduction.
///
/// When the downstream reducer halts with `Reduced(x)`, this returns
/// `Reduced(Reduced(x))`. The nested drive loop unwraps one level and
/// stops; the remaining `Reduced(x)` is what the catting step returns, so
/// the outer drive loop stops too.
struct PreservingReduced<'a, R> {
    reducer: &'a mut R,
}

impl<'a, R> PreservingReduced<'a, R> {
    fn new(reducer: &'a mut R) -> Self {
        PreservingReduced { reducer }
    }
}

impl<In, R: Reducer<In>> Reducer<In> for PreservingReduced<'_, R> {
    type Acc = Step<R::Acc>;
    type Output = Step<R::Acc>;

    fn init(&self) -> Step<R::Acc> {
        Step::Continue(self.reducer.init())
    }

    fn step(&mut self, acc: Step<R::Acc>, input: In) -> Result<Step<Step<R::Acc>>> {
        let acc = match acc {
            Step::Continue(acc) => acc,
            // Not reached through `reduce`, which stops at the first halt and
            // never feeds a halted accumulator back. Keep it a halt regardless.
            Step::Reduced(done) => return Ok(Step::reduced(Step::Reduced(done))),
        };
        Ok(match self.reducer.step(acc, input)? {
            Step::Reduced(done) => Step::reduced(Step::Reduced(done)),
            next => Step::Continue(next),
        })
    }

    fn result(&self, acc: Step<R::Acc>) -> Step<R::Acc> {
        acc
    }
}
