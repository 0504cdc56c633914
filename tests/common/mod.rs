#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;
use transfold::{IntoReducer, Reducer, Result, Step};

/// Decorates a reducer and counts how many times its `step` runs.
pub struct Counting<R> {
    inner: R,
    steps: Rc<Cell<usize>>,
}

/// Count the steps that reach `inner`, recording them in `steps`.
pub fn counting<R>(inner: R, steps: &Rc<Cell<usize>>) -> Counting<R> {
    Counting {
        inner,
        steps: Rc::clone(steps),
    }
}

impl<In, R: Reducer<In>> Reducer<In> for Counting<R> {
    type Acc = R::Acc;
    type Output = R::Output;

    fn init(&self) -> R::Acc {
        self.inner.init()
    }

    fn step(&mut self, acc: R::Acc, input: In) -> Result<Step<R::Acc>> {
        self.steps.set(self.steps.get() + 1);
        self.inner.step(acc, input)
    }

    fn result(&self, acc: R::Acc) -> R::Output {
        self.inner.result(acc)
    }
}

impl<A, R: IntoReducer<A>> IntoReducer<A> for Counting<R> {
    type Reducer = Counting<R::Reducer>;

    fn into_reducer(self, init: &A) -> Self::Reducer {
        Counting {
            inner: self.inner.into_reducer(init),
            steps: self.steps,
        }
    }
}

pub fn push<T>(mut acc: Vec<T>, x: T) -> Vec<T> {
    acc.push(x);
    acc
}

pub fn sum(acc: i64, x: i64) -> i64 {
    acc + x
}

pub fn is_even(x: &i64) -> bool {
    x % 2 == 0
}

pub fn double(x: i64) -> i64 {
    x * 2
}
