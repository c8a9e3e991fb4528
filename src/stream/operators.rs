// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Derived operators over [`Observable`].
//!
//! Every operator creates a brand-new output observable and wires one (or
//! more) `observe` registrations on its source(s) that conditionally `emit`
//! on the output. No operator introduces new emission semantics, and none
//! tears its wiring down: operator subscriptions are permanent for the life
//! of the graph. Because `observe` replays the last value at registration,
//! every derived stream automatically reflects current state for late
//! consumers without special-case code.
//!
//! Callback panics (mapper, predicate, reducer) propagate synchronously up
//! the emission call stack, exactly like observer panics on the core
//! primitive.

use std::cell::RefCell;
use std::rc::Rc;

use super::{Keyed, Observable};

impl<T: Clone + 'static> Observable<T> {
    /// Transform each value by a function.
    ///
    /// The output emits `mapper(value)` for every source emission, in the
    /// same order, and replays the mapped last value to late subscribers.
    pub fn map<U, F>(&self, mapper: F) -> Observable<U>
    where
        U: Clone + 'static,
        F: Fn(&T) -> U + 'static,
    {
        let out = Observable::new();
        let sink = out.clone();
        self.observe(move |value| {
            sink.emit(mapper(value));
        });
        out
    }

    /// Map every value to a constant, ignoring the payload.
    pub fn constant<U>(&self, value: U) -> Observable<U>
    where
        U: Clone + 'static,
    {
        self.map(move |_| value.clone())
    }

    /// Only re-emit values that pass the predicate.
    ///
    /// Suppressed values leave the output untouched: no emission, and no
    /// change to the value replayed to late subscribers.
    pub fn filter<P>(&self, predicate: P) -> Observable<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        let out = Observable::new();
        let sink = out.clone();
        self.observe(move |value| {
            if predicate(value) {
                sink.emit(value.clone());
            }
        });
        out
    }

    /// Combine this observable with additional streams into one.
    ///
    /// The output emits whenever this observable or any listed stream
    /// emits, interleaved in real-time order. This observable is wired
    /// first, so at construction time existing last values replay into the
    /// output in that order.
    pub fn merge<I>(&self, streams: I) -> Observable<T>
    where
        I: IntoIterator<Item = Observable<T>>,
    {
        let out = Observable::new();
        for stream in std::iter::once(self.clone()).chain(streams) {
            let sink = out.clone();
            stream.observe(move |value| {
                sink.emit(value.clone());
            });
        }
        out
    }

    /// Accumulate values with a reducer.
    ///
    /// The accumulator starts at `initial` and lives in the operator's
    /// closure; each source emission folds the value in and emits the new
    /// accumulator.
    pub fn scan<A, R>(&self, mut reducer: R, initial: A) -> Observable<A>
    where
        A: Clone + 'static,
        R: FnMut(A, &T) -> A + 'static,
    {
        let out = Observable::new();
        let sink = out.clone();
        let mut accumulator = initial;
        self.observe(move |value| {
            accumulator = reducer(accumulator.clone(), value);
            sink.emit(accumulator.clone());
        });
        out
    }

    /// Sample another stream on every emission of this one.
    ///
    /// This observable's payload only serves as a clock tick; per tick the
    /// output emits whatever `values` most recently emitted, or `None` if
    /// `values` has not emitted yet.
    pub fn trigger<U>(&self, values: &Observable<U>) -> Observable<Option<U>>
    where
        U: Clone + 'static,
    {
        let out = Observable::new();

        let latest: Rc<RefCell<Option<U>>> = Rc::new(RefCell::new(None));
        let write = Rc::clone(&latest);
        values.observe(move |value| {
            *write.borrow_mut() = Some(value.clone());
        });

        let sink = out.clone();
        self.observe(move |_| {
            let sampled = latest.borrow().clone();
            sink.emit(sampled);
        });
        out
    }

    /// Wrap each value under the given field name.
    ///
    /// The output emits [`Keyed`] values that serialize as the single-entry
    /// object `{key: value}`.
    pub fn wrap(&self, key: impl Into<String>) -> Observable<Keyed<T>> {
        let key = key.into();
        self.map(move |value| Keyed::new(key.clone(), value.clone()))
    }
}

impl<U: Clone + 'static> Observable<Observable<U>> {
    /// Flatten an observable of observables into an observable of their
    /// values.
    ///
    /// Each inner observable is subscribed as it arrives and stays
    /// subscribed for the life of the graph; the output re-emits whatever
    /// any inner observable emits (including the replay of an inner last
    /// value at subscription time).
    pub fn flatten(&self) -> Observable<U> {
        let out = Observable::new();
        let sink = out.clone();
        self.observe(move |inner| {
            let sink = sink.clone();
            inner.observe(move |value| {
                sink.emit(value.clone());
            });
        });
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording<T: Clone + 'static>(source: &Observable<T>) -> Rc<RefCell<Vec<T>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        source.observe(move |value| sink.borrow_mut().push(value.clone()));
        seen
    }

    #[test]
    fn map_transforms_every_emission_in_order() {
        let source = Observable::new();
        let doubled = source.map(|x: &i32| x * 2);
        let seen = recording(&doubled);

        source.emit(1).emit(2).emit(3);
        assert_eq!(*seen.borrow(), vec![2, 4, 6]);
    }

    #[test]
    fn map_replays_mapped_value_to_late_subscriber() {
        let source = Observable::new();
        source.emit(21);

        // The operator wiring itself replays, so an output built after the
        // emission already holds the mapped value.
        let doubled = source.map(|x: &i32| x * 2);
        let seen = recording(&doubled);
        assert_eq!(*seen.borrow(), vec![42]);
    }

    #[test]
    fn constant_ignores_payload() {
        let source = Observable::new();
        let ticks = source.constant("tick");
        let seen = recording(&ticks);

        source.emit(1).emit(99);
        assert_eq!(*seen.borrow(), vec!["tick", "tick"]);
    }

    #[test]
    fn filter_emits_passing_subsequence() {
        let source = Observable::new();
        let evens = source.filter(|x: &i32| x % 2 == 0);
        let seen = recording(&evens);

        source.emit(1).emit(2).emit(3).emit(4);
        assert_eq!(*seen.borrow(), vec![2, 4]);
    }

    #[test]
    fn filtered_stream_replays_only_passing_values() {
        let source = Observable::new();
        let evens = source.filter(|x: &i32| x % 2 == 0);

        source.emit(2).emit(3);

        // 3 was suppressed, so the filtered stream's last value is still 2.
        let seen = recording(&evens);
        assert_eq!(*seen.borrow(), vec![2]);
    }

    #[test]
    fn scan_accumulates() {
        let source = Observable::new();
        let sums = source.scan(|acc, x: &i32| acc + x, 0);
        let seen = recording(&sums);

        source.emit(1).emit(2).emit(3);
        assert_eq!(*seen.borrow(), vec![1, 3, 6]);
    }

    #[test]
    fn merge_interleaves_in_real_time_order() {
        let a = Observable::new();
        let b = Observable::new();
        let merged = a.merge([b.clone()]);
        let seen = recording(&merged);

        a.emit(1);
        b.emit(2);
        a.emit(3);
        assert_eq!(*seen.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn merge_replays_existing_values_at_wiring() {
        let a = Observable::new();
        let b = Observable::new();
        a.emit(1);
        b.emit(2);

        // Wiring order is self first, so the merged stream ends up holding
        // the listed stream's value as its last.
        let merged = a.merge([b.clone()]);
        let seen = recording(&merged);
        assert_eq!(*seen.borrow(), vec![2]);
    }

    #[test]
    fn trigger_samples_latest_value_per_tick() {
        let ticks = Observable::new();
        let values = Observable::new();
        let sampled = ticks.trigger(&values);
        let seen = recording(&sampled);

        values.emit("x");
        ticks.emit(());
        values.emit("y");
        ticks.emit(());

        assert_eq!(*seen.borrow(), vec![Some("x"), Some("y")]);
    }

    #[test]
    fn trigger_emits_none_before_value_stream_emits() {
        let ticks = Observable::new();
        let values: Observable<&str> = Observable::new();
        let sampled = ticks.trigger(&values);
        let seen = recording(&sampled);

        ticks.emit(());
        assert_eq!(*seen.borrow(), vec![None]);
    }

    #[test]
    fn trigger_discards_source_payload() {
        let ticks = Observable::new();
        let values = Observable::new();
        let sampled = ticks.trigger(&values);
        let seen = recording(&sampled);

        values.emit(10);
        ticks.emit(999);
        assert_eq!(*seen.borrow(), vec![Some(10)]);
    }

    #[test]
    fn flatten_keeps_inner_streams_subscribed() {
        let outer = Observable::new();
        let flat = outer.flatten();
        let seen = recording(&flat);

        let first = Observable::new();
        let second = Observable::new();
        outer.emit(first.clone());
        outer.emit(second.clone());

        // An inner stream received earlier still feeds the output.
        first.emit(5);
        second.emit(6);
        first.emit(7);
        assert_eq!(*seen.borrow(), vec![5, 6, 7]);
    }

    #[test]
    fn flatten_replays_inner_last_value_on_arrival() {
        let outer = Observable::new();
        let flat = outer.flatten();
        let seen = recording(&flat);

        let inner = Observable::new();
        inner.emit(7);
        outer.emit(inner.clone());

        assert_eq!(*seen.borrow(), vec![7]);
    }

    #[test]
    fn wrap_wraps_each_value_under_key() {
        let source = Observable::new();
        let wrapped = source.wrap("count");
        let seen = recording(&wrapped);

        source.emit(3);
        assert_eq!(*seen.borrow(), vec![Keyed::new("count", 3)]);
    }
}
