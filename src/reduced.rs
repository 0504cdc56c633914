/// Final value of a reduction that stopped early.
///
/// A `Reduced` is told apart from an ordinary accumulator by its type alone:
/// an accumulator that happens to hold a `Reduced` is still an accumulator.
///
/// # Examples
///
/// ```
/// use transfold::Reduced;
///
/// let done = Reduced::new(vec![1, 2]);
/// assert_eq!(done.val(), &vec![1, 2]);
/// assert_eq!(done.into_inner(), vec![1, 2]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reduced<T>(T);

impl<T> Reduced<T> {
    /// Wrap a final value.
    pub fn new(val: T) -> Self {
        Reduced(val)
    }

    /// Borrow the final value.
    pub fn val(&self) -> &T {
        &self.0
    }

    /// Unwrap the final value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

/// Outcome of a single reducer step.
///
/// `Continue` carries the next accumulator. `Reduced` asks the drive loop to
/// stop and return the wrapped value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step<A> {
    /// Keep feeding elements.
    Continue(A),
    /// Stop now; this is the final accumulator.
    Reduced(Reduced<A>),
}

impl<A> Step<A> {
    /// Shorthand for `Step::Reduced(Reduced::new(acc))`.
    pub fn reduced(acc: A) -> Self {
        Step::Reduced(Reduced::new(acc))
    }

    /// Returns `true` for [`Step::Reduced`].
    #[inline]
    pub fn is_reduced(&self) -> bool {
        matches!(self, Step::Reduced(_))
    }

    /// The accumulator, whichever variant holds it.
    pub fn into_inner(self) -> A {
        match self {
            Step::Continue(acc) => acc,
            Step::Reduced(done) => done.into_inner(),
        }
    }

    /// Transform the accumulator while keeping the variant.
    pub fn map<B>(self, f: impl FnOnce(A) -> B) -> Step<B> {
        match self {
            Step::Continue(acc) => Step::Continue(f(acc)),
            Step::Reduced(done) => Step::reduced(f(done.into_inner())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_not_value_marks_halt() {
        let looks_done: Step<Reduced<i32>> = Step::Continue(Reduced::new(1));
        assert!(!looks_done.is_reduced());

        let done: Step<i32> = Step::reduced(1);
        assert!(done.is_reduced());
    }

    #[test]
    fn test_map_keeps_variant() {
        assert_eq!(Step::Continue(2).map(|x| x * 10), Step::Continue(20));
        assert_eq!(Step::reduced(2).map(|x| x * 10), Step::reduced(20));
    }

    #[test]
    fn test_into_inner_unwraps_either_variant() {
        assert_eq!(Step::Continue("a").into_inner(), "a");
        assert_eq!(Step::reduced("b").into_inner(), "b");
    }
}
