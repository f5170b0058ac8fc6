//! Borrowed, optionally filtered views over member tables.
//!
//! An [`ArrayRange`] never owns or copies its elements. It borrows a slice
//! owned by the registry, so the registry cannot be mutated while a range or
//! any of its iterators is alive.
//!
//! Filtering happens while iterating: an iterator is never left on an element
//! the predicate rejects, including right after construction. As a result
//! `begin() == end()` exactly when no element passes the predicate.
//!
//! ```
//! use introspect_core::ArrayRange;
//!
//! let values = [1, 2, 3, 4, 5];
//! let odd = ArrayRange::with_predicate(&values, |v: &i32| v % 2 == 1);
//!
//! assert_eq!(odd.len(), 3);
//! assert_eq!(odd.iter().copied().collect::<Vec<_>>(), [1, 3, 5]);
//! assert_eq!(odd.rbegin().copied().collect::<Vec<_>>(), [5, 3, 1]);
//! ```

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

// ============================================================================
// Predicates
// ============================================================================

/// Element filter for an [`ArrayRange`].
pub trait Predicate<T> {
    /// Set when [`test`](Predicate::test) accepts every element, which lets
    /// the range answer `len()` without walking the slice.
    const ALWAYS_TRUE: bool = false;

    fn test(&self, item: &T) -> bool;
}

/// Accepts every element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoPredicate;

impl<T> Predicate<T> for NoPredicate {
    const ALWAYS_TRUE: bool = true;

    #[inline]
    fn test(&self, _item: &T) -> bool {
        true
    }
}

impl<T, F> Predicate<T> for F
where
    F: Fn(&T) -> bool,
{
    #[inline]
    fn test(&self, item: &T) -> bool {
        self(item)
    }
}

/// Plain function pointer predicate, for ranges stored in named types.
pub type FnPredicate<T> = fn(&T) -> bool;

// ============================================================================
// Directions
// ============================================================================

/// Traversal order of a [`RangeIter`].
pub trait Direction: Copy + Default + fmt::Debug {
    const REVERSED: bool;
}

/// Declaration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Forward;

/// Reverse declaration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reverse;

impl Direction for Forward {
    const REVERSED: bool = false;
}

impl Direction for Reverse {
    const REVERSED: bool = true;
}

// ============================================================================
// ArrayRange
// ============================================================================

/// A read-only view over a borrowed slice, filtered by `P`.
pub struct ArrayRange<'a, T, P = NoPredicate> {
    items: &'a [T],
    pred: P,
}

impl<'a, T> ArrayRange<'a, T, NoPredicate> {
    /// View every element of `items`.
    ///
    /// Ranges are produced by the owner of the table (a registry or a class
    /// entry); consumers only traverse them.
    pub fn new(items: &'a [T]) -> Self {
        Self {
            items,
            pred: NoPredicate,
        }
    }

    /// A range with no elements.
    pub fn empty() -> Self {
        Self::new(&[])
    }
}

impl<T> Default for ArrayRange<'_, T, NoPredicate> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, T, P> ArrayRange<'a, T, P>
where
    P: Predicate<T> + Copy,
{
    /// View the elements of `items` accepted by `pred`.
    ///
    /// Like [`new`](ArrayRange::new), meant for the owner of the table.
    pub fn with_predicate(items: &'a [T], pred: P) -> Self {
        Self { items, pred }
    }

    /// Iterator on the first accepted element.
    pub fn begin(&self) -> RangeIter<'a, T, P, Forward> {
        RangeIter::new(self.items, self.pred)
    }

    /// Past-the-end forward iterator.
    pub fn end(&self) -> RangeIter<'a, T, P, Forward> {
        RangeIter::exhausted(self.items, self.pred)
    }

    /// Iterator on the last accepted element, moving backwards.
    pub fn rbegin(&self) -> RangeIter<'a, T, P, Reverse> {
        RangeIter::new(self.items, self.pred)
    }

    /// Past-the-end reverse iterator.
    pub fn rend(&self) -> RangeIter<'a, T, P, Reverse> {
        RangeIter::exhausted(self.items, self.pred)
    }

    #[inline]
    pub fn iter(&self) -> RangeIter<'a, T, P, Forward> {
        self.begin()
    }

    /// Number of accepted elements.
    ///
    /// Constant time without a predicate, linear otherwise.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn len(&self) -> usize {
        if P::ALWAYS_TRUE {
            self.items.len()
        } else {
            self.items.iter().filter(|item| self.pred.test(item)).count()
        }
    }

    /// Check if no element is accepted.
    pub fn is_empty(&self) -> bool {
        self.begin() == self.end()
    }

    pub fn first(&self) -> Option<&'a T> {
        self.begin().next()
    }

    pub fn last(&self) -> Option<&'a T> {
        self.rbegin().next()
    }

    /// First accepted element matching `f`.
    pub fn find_by(&self, mut f: impl FnMut(&T) -> bool) -> Option<&'a T> {
        self.iter().find(|item| f(item))
    }

    /// The underlying slice, ignoring the predicate.
    pub fn as_slice(&self) -> &'a [T] {
        self.items
    }

    /// Narrow this range with an additional predicate.
    pub fn filter<Q>(self, extra: Q) -> ArrayRange<'a, T, impl Fn(&T) -> bool + Copy>
    where
        Q: Predicate<T> + Copy,
    {
        let pred = self.pred;
        ArrayRange::with_predicate(self.items, move |item: &T| {
            pred.test(item) && extra.test(item)
        })
    }
}

impl<T, P: Clone> Clone for ArrayRange<'_, T, P> {
    fn clone(&self) -> Self {
        Self {
            items: self.items,
            pred: self.pred.clone(),
        }
    }
}

impl<T, P: Copy> Copy for ArrayRange<'_, T, P> {}

impl<'a, T, P> IntoIterator for &ArrayRange<'a, T, P>
where
    P: Predicate<T> + Copy,
{
    type Item = &'a T;
    type IntoIter = RangeIter<'a, T, P, Forward>;

    fn into_iter(self) -> Self::IntoIter {
        self.begin()
    }
}

impl<'a, T, P> IntoIterator for ArrayRange<'a, T, P>
where
    P: Predicate<T> + Copy,
{
    type Item = &'a T;
    type IntoIter = RangeIter<'a, T, P, Forward>;

    fn into_iter(self) -> Self::IntoIter {
        self.begin()
    }
}

impl<T, P> fmt::Debug for ArrayRange<'_, T, P>
where
    T: fmt::Debug,
    P: Predicate<T> + Copy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// ============================================================================
// RangeIter
// ============================================================================

/// Iterator over the accepted elements of an [`ArrayRange`].
///
/// The unvisited window is `items[front..back]`. Only the leading end (the
/// front for a forward iterator, the back for a reverse one) is kept on an
/// accepted element. The trailing end is tested only when `next_back` walks
/// onto it, so every element is tested when the traversal reaches it.
pub struct RangeIter<'a, T, P, D> {
    items: &'a [T],
    front: usize,
    back: usize,
    pred: P,
    _direction: PhantomData<D>,
}

impl<'a, T, P, D> RangeIter<'a, T, P, D>
where
    P: Predicate<T> + Copy,
    D: Direction,
{
    fn new(items: &'a [T], pred: P) -> Self {
        let mut iter = Self {
            items,
            front: 0,
            back: items.len(),
            pred,
            _direction: PhantomData,
        };
        iter.settle();
        iter
    }

    fn exhausted(items: &'a [T], pred: P) -> Self {
        let end = if D::REVERSED { 0 } else { items.len() };
        Self {
            items,
            front: end,
            back: end,
            pred,
            _direction: PhantomData,
        }
    }

    /// Move the leading end onto the next accepted element.
    fn settle(&mut self) {
        if D::REVERSED {
            self.skip_back();
        } else {
            self.skip_front();
        }
    }

    fn skip_front(&mut self) {
        if P::ALWAYS_TRUE {
            return;
        }
        while self.front < self.back && !self.pred.test(&self.items[self.front]) {
            self.front += 1;
        }
    }

    fn skip_back(&mut self) {
        if P::ALWAYS_TRUE {
            return;
        }
        while self.back > self.front && !self.pred.test(&self.items[self.back - 1]) {
            self.back -= 1;
        }
    }

    fn pop_front(&mut self) -> Option<&'a T> {
        if D::REVERSED {
            self.skip_front();
        }
        if self.front >= self.back {
            return None;
        }
        let item = &self.items[self.front];
        self.front += 1;
        if !D::REVERSED {
            self.skip_front();
        }
        Some(item)
    }

    fn pop_back(&mut self) -> Option<&'a T> {
        if !D::REVERSED {
            self.skip_back();
        }
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        let item = &self.items[self.back];
        if D::REVERSED {
            self.skip_back();
        }
        Some(item)
    }

    /// The element the iterator is positioned on, without advancing.
    pub fn get(&self) -> Option<&'a T> {
        if self.front >= self.back {
            None
        } else if D::REVERSED {
            Some(&self.items[self.back - 1])
        } else {
            Some(&self.items[self.front])
        }
    }

    /// Check if the iterator is past the end.
    pub fn is_end(&self) -> bool {
        self.front >= self.back
    }

    /// Index into the underlying slice of the current position.
    ///
    /// All exhausted iterators share one position, so they compare equal.
    fn position(&self) -> Option<usize> {
        if self.is_end() {
            None
        } else if D::REVERSED {
            Some(self.back)
        } else {
            Some(self.front)
        }
    }
}

impl<'a, T, P, D> Iterator for RangeIter<'a, T, P, D>
where
    P: Predicate<T> + Copy,
    D: Direction,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if D::REVERSED {
            self.pop_back()
        } else {
            self.pop_front()
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back.saturating_sub(self.front);
        if P::ALWAYS_TRUE {
            (remaining, Some(remaining))
        } else {
            // Predicates may change between steps.
            (0, Some(remaining))
        }
    }
}

impl<T, P, D> DoubleEndedIterator for RangeIter<'_, T, P, D>
where
    P: Predicate<T> + Copy,
    D: Direction,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if D::REVERSED {
            self.pop_front()
        } else {
            self.pop_back()
        }
    }
}

impl<T, D: Direction> ExactSizeIterator for RangeIter<'_, T, NoPredicate, D> {}

impl<T, P, D> FusedIterator for RangeIter<'_, T, P, D>
where
    P: Predicate<T> + Copy,
    D: Direction,
{
}

impl<T, P: Copy, D> Clone for RangeIter<'_, T, P, D> {
    fn clone(&self) -> Self {
        Self {
            items: self.items,
            front: self.front,
            back: self.back,
            pred: self.pred,
            _direction: PhantomData,
        }
    }
}

impl<T, P, D> PartialEq for RangeIter<'_, T, P, D>
where
    P: Predicate<T> + Copy,
    D: Direction,
{
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.items, other.items) && self.position() == other.position()
    }
}

impl<T, P, D> Eq for RangeIter<'_, T, P, D>
where
    P: Predicate<T> + Copy,
    D: Direction,
{
}

impl<T, P, D: Direction> fmt::Debug for RangeIter<'_, T, P, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeIter")
            .field("front", &self.front)
            .field("back", &self.back)
            .field("reversed", &D::REVERSED)
            .finish()
    }
}
