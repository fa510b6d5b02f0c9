//! Containers that remember how you looked at them.
//!
//! **Orderly** offers [`Container`],
//! a growable sequence kept in insertion order,
//! along with six ways of walking it,
//! listed in [`Order`].
//! Each walk is a [`Cursor`]:
//! a position in an index *permutation*
//! that was computed once, when the cursor was made,
//! from whatever the container held at that moment.
//!
//! # Snapshots
//!
//! A cursor never recomputes its permutation.
//! So if you `add()` to a container while a cursor is live,
//! the cursor won’t visit the new element,
//! and the indices it already holds stay meaningful.
//!
//! ```
//! use orderly::Container;
//!
//! let mut c: Container<i32> = [3, 1, 2].into_iter().collect();
//! let mut it = c.begin_ascending();
//! let end = c.end_ascending();
//!
//! c.add(0);
//!
//! let mut seen = Vec::new();
//! while it != end {
//!     seen.push(*it.get(&c)?);
//!     it.advance()?;
//! }
//! assert_eq!(seen, [1, 2, 3]);
//! # Ok::<(), orderly::Error>(())
//! ```
//!
//! # Stale cursors
//!
//! Removal is different.
//! [`Container::remove()`] packs the survivors together,
//! so an index taken *before* the removal
//! may now refer to a different element,
//! or to nothing at all.
//! This is like a use-after-free error,
//! except that it can never touch invalid memory:
//!
//! - an index that fell off the end reads as [`Error::OutOfRange`];
//! - an index that is still in bounds
//!   reads whatever element lives there *now*.
//!
//! If that matters to you,
//! ask [`Cursor::is_stale()`] before trusting a read.
//!
//! # Ends
//!
//! Cursors go forward only.
//! Advancing from the last element reaches the *end sentinel*
//! without complaint;
//! advancing again is [`Error::PastEnd`].
//! Compare against `end_*()` to know when to stop,
//! or use [`Container::traverse()`],
//! which wraps all of this up as an ordinary [`Iterator`].
//!
//! # TODO
//!
//! ## Borrowed permutations
//!
//! Every `begin_*()` and `end_*()` pair
//! computes the same permutation twice.
//! A range type holding both ends over one permutation
//! would halve that,
//! at the cost of a second way to spell a traversal.
//!

#![warn(missing_docs)]

pub use container::{Container, ContainerId};
pub use cursor::Cursor;
pub use error::{Error, ParseOrderError, Result};
pub use order::{Order, Permutation};
pub use traversal::Traversal;

pub mod error {

    //! Ways that containers and cursors refuse.

    use core::fmt;

    /// Why an operation on a container or cursor failed.
    ///
    /// None of these leave anything half-done:
    /// the container and the cursor stay usable afterward.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub enum Error {
        /// [`crate::Container::remove()`]
        /// found no occurrence of the value.
        NotFound,
        /// A cursor was read at or past its end sentinel,
        /// against the wrong container,
        /// or through an index that no longer exists.
        OutOfRange,
        /// A cursor was advanced
        /// while already at its end sentinel.
        PastEnd,
    }

    impl fmt::Display for Error {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(match self {
                Error::NotFound => "element not found in container",
                Error::OutOfRange => "cursor out of range",
                Error::PastEnd => "advance past end",
            })
        }
    }

    impl std::error::Error for Error {}

    /// Like [`core::result::Result`] with [`Error`] by default.
    pub type Result<T, E = Error> = core::result::Result<T, E>;

    /// A traversal order label that isn’t one of
    /// [`crate::Order::ALL`].
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct ParseOrderError {
        label: String,
    }

    impl ParseOrderError {
        pub(crate) fn new(label: &str) -> Self {
            ParseOrderError {
                label: label.to_owned(),
            }
        }

        /// The label that was rejected.
        pub fn label(&self) -> &str {
            &self.label
        }
    }

    impl fmt::Display for ParseOrderError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "unknown traversal order “{}”", self.label)
        }
    }

    impl std::error::Error for ParseOrderError {}
}

pub mod order {

    //! Traversal orders, as index permutations.
    //!
    //! Every strategy here is a pure function
    //! from a snapshot of a container’s elements
    //! (or just its length, if values don’t matter)
    //! to a `Vec<usize>` holding each of `0..len` exactly once.
    //! [`Order::permutation()`] freezes that result
    //! into a shareable [`Permutation`].

    use super::error::ParseOrderError;
    use core::fmt;
    use core::str::FromStr;
    use std::rc::Rc;

    /// A frozen sequence of indices into a snapshot,
    /// each index appearing exactly once.
    ///
    /// Cloning is cheap and shares the indices.
    #[derive(Clone, Debug, Default, PartialEq, Eq)]
    pub struct Permutation {
        indices: Rc<[usize]>,
    }

    impl Permutation {
        /// Number of indices, which is the length
        /// of the snapshot it was computed from.
        pub fn len(&self) -> usize {
            self.indices.len()
        }

        /// Whether the snapshot was empty.
        pub fn is_empty(&self) -> bool {
            self.indices.is_empty()
        }

        /// Like [`slice::get()`].
        pub fn get(&self, position: usize) -> Option<usize> {
            self.indices.get(position).copied()
        }

        /// All indices, in visiting order.
        pub fn as_slice(&self) -> &[usize] {
            &self.indices
        }
    }

    impl From<Vec<usize>> for Permutation {
        fn from(indices: Vec<usize>) -> Self {
            Permutation {
                indices: indices.into(),
            }
        }
    }

    /// The ways to walk a [`crate::Container`].
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub enum Order {
        /// First added, first visited.
        #[default]
        Insertion,
        /// Smallest first; equal elements in insertion order.
        Ascending,
        /// Largest first; equal elements
        /// in *reverse* insertion order.
        Descending,
        /// Last added, first visited.
        Reverse,
        /// Smallest, largest, second smallest,
        /// second largest, and so on inward.
        SideCross,
        /// Middle insertion position first,
        /// then outward, lower side first.
        MiddleOut,
    }

    impl Order {
        /// Every order, in declaration order.
        pub const ALL: [Order; 6] = [
            Order::Insertion,
            Order::Ascending,
            Order::Descending,
            Order::Reverse,
            Order::SideCross,
            Order::MiddleOut,
        ];

        /// A stable label, accepted back by [`FromStr`].
        pub const fn name(self) -> &'static str {
            match self {
                Order::Insertion => "insertion",
                Order::Ascending => "ascending",
                Order::Descending => "descending",
                Order::Reverse => "reverse",
                Order::SideCross => "side-cross",
                Order::MiddleOut => "middle-out",
            }
        }

        /// Computes this order over a snapshot.
        pub fn permutation<T: Ord>(self, elements: &[T]) -> Permutation {
            let len = elements.len();
            let indices = match self {
                Order::Insertion => insertion(len),
                Order::Ascending => ascending(elements),
                Order::Descending => descending(elements),
                Order::Reverse => reverse(len),
                Order::SideCross => side_cross(elements),
                Order::MiddleOut => middle_out(len),
            };
            log::trace!(
                "computed {} permutation over {len} elements",
                self.name()
            );
            Permutation::from(indices)
        }
    }

    impl fmt::Display for Order {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.pad(self.name())
        }
    }

    impl FromStr for Order {
        type Err = ParseOrderError;

        fn from_str(label: &str) -> Result<Self, Self::Err> {
            Order::ALL
                .into_iter()
                .find(|order| order.name() == label)
                .ok_or_else(|| ParseOrderError::new(label))
        }
    }

    /// `0, 1, …, len - 1`.
    pub fn insertion(len: usize) -> Vec<usize> {
        (0..len).collect()
    }

    /// Indices sorted by their elements.
    ///
    /// The sort is stable,
    /// so equal elements keep their insertion order.
    pub fn ascending<T: Ord>(elements: &[T]) -> Vec<usize> {
        let mut indices = insertion(elements.len());
        indices.sort_by(|&a, &b| elements[a].cmp(&elements[b]));
        indices
    }

    /// [`ascending()`], backward.
    ///
    /// Equal elements therefore come out
    /// latest-inserted first.
    pub fn descending<T: Ord>(elements: &[T]) -> Vec<usize> {
        let mut indices = ascending(elements);
        indices.reverse();
        indices
    }

    /// `len - 1, …, 1, 0`.
    pub fn reverse(len: usize) -> Vec<usize> {
        (0..len).rev().collect()
    }

    /// [`ascending()`], taken alternately
    /// from the front and the back.
    ///
    /// With an odd number of elements,
    /// the median comes last, once.
    pub fn side_cross<T: Ord>(elements: &[T]) -> Vec<usize> {
        let sorted = ascending(elements);
        let mut indices = Vec::with_capacity(sorted.len());
        let (mut lo, mut hi) = (0, sorted.len());
        while lo < hi {
            indices.push(sorted[lo]);
            lo += 1;
            if lo < hi {
                hi -= 1;
                indices.push(sorted[hi]);
            }
        }
        indices
    }

    /// `mid, mid - 1, mid + 1, mid - 2, mid + 2, …`
    /// where `mid = (len - 1) / 2`,
    /// continuing on one side once the other runs out.
    pub fn middle_out(len: usize) -> Vec<usize> {
        let Some(last) = len.checked_sub(1) else {
            return Vec::new();
        };
        let mid = last / 2;
        let mut indices = Vec::with_capacity(len);
        indices.push(mid);
        let mut lower = (0..mid).rev();
        let mut upper = mid + 1..len;
        loop {
            match (lower.next(), upper.next()) {
                (None, None) => break,
                (below, above) => {
                    indices.extend(below);
                    indices.extend(above);
                }
            }
        }
        indices
    }
}

pub mod container {

    //! The element store and its traversal factories.

    use super::cursor::Cursor;
    use super::error::{Error, Result};
    use super::order::{self, Order, Permutation};
    use super::traversal::Traversal;
    use core::fmt;
    use std::sync::atomic::{self, AtomicU64};

    /// Identifies one container for as long as the process runs.
    ///
    /// Cursors carry the identity of the container they came from,
    /// so that they compare equal only to their siblings
    /// and refuse to read from anywhere else.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct ContainerId(u64);

    impl ContainerId {
        fn fresh() -> Self {
            static NEXT: AtomicU64 = AtomicU64::new(0);
            ContainerId(NEXT.fetch_add(1, atomic::Ordering::Relaxed))
        }
    }

    /// A sequence of values in insertion order,
    /// walkable in every [`Order`].
    ///
    /// Duplicates are allowed.
    /// Indices are always `0..len()`:
    /// removing an element moves its successors down.
    #[derive(Debug)]
    pub struct Container<T> {
        id: ContainerId,
        revision: u64,
        elements: Vec<T>,
    }

    impl<T> Container<T> {
        /// Makes an empty container.
        pub fn new() -> Self {
            Container::with_capacity(0)
        }

        /// Like [`Vec::with_capacity()`].
        pub fn with_capacity(capacity: usize) -> Self {
            Container {
                id: ContainerId::fresh(),
                revision: 0,
                elements: Vec::with_capacity(capacity),
            }
        }

        /// This container’s identity.
        pub fn id(&self) -> ContainerId {
            self.id
        }

        /// How many successful mutations
        /// this container has seen.
        pub fn revision(&self) -> u64 {
            self.revision
        }

        /// Appends a value.
        pub fn add(&mut self, value: T) {
            self.elements.push(value);
            self.revision += 1;
        }

        /// Removes **every** element equal to `value`,
        /// keeping the order of the rest,
        /// and returns how many went.
        ///
        /// # Errors
        ///
        /// [`Error::NotFound`] if there were none,
        /// in which case nothing changed.
        pub fn remove(&mut self, value: &T) -> Result<usize>
        where
            T: PartialEq,
        {
            let before = self.elements.len();
            self.elements.retain(|element| element != value);
            let removed = before - self.elements.len();
            if removed == 0 {
                return Err(Error::NotFound);
            }
            self.revision += 1;
            log::debug!(
                "removed {removed} of {before} elements from container {}",
                self.id.0
            );
            Ok(removed)
        }

        /// Number of elements.
        pub fn size(&self) -> usize {
            self.elements.len()
        }

        /// Like [`Vec::len()`]; same as [`Self::size()`].
        pub fn len(&self) -> usize {
            self.elements.len()
        }

        /// Like [`Vec::is_empty()`].
        pub fn is_empty(&self) -> bool {
            self.elements.is_empty()
        }

        /// The elements in insertion order, read-only.
        pub fn as_slice(&self) -> &[T] {
            &self.elements
        }

        /// Like [`slice::contains()`].
        pub fn contains(&self, value: &T) -> bool
        where
            T: PartialEq,
        {
            self.elements.contains(value)
        }

        /// Number of elements equal to `value`.
        pub fn count(&self, value: &T) -> usize
        where
            T: PartialEq,
        {
            self.elements.iter().filter(|e| *e == value).count()
        }

        /// `[a, b, c]`, in insertion order.
        pub fn render(&self) -> String
        where
            T: fmt::Display,
        {
            self.to_string()
        }

        fn cursor(&self, permutation: Permutation, at_end: bool) -> Cursor {
            let position = if at_end { permutation.len() } else { 0 };
            Cursor::new(self.id, self.revision, permutation, position)
        }

        fn insertion(&self) -> Permutation {
            Permutation::from(order::insertion(self.len()))
        }

        /// Start of the default traversal, in insertion order.
        pub fn begin(&self) -> Cursor {
            self.begin_insertion()
        }

        /// End sentinel of the default traversal.
        pub fn end(&self) -> Cursor {
            self.end_insertion()
        }

        /// Start of a walk in [`Order::Insertion`].
        pub fn begin_insertion(&self) -> Cursor {
            self.cursor(self.insertion(), false)
        }

        /// End sentinel of a walk in [`Order::Insertion`].
        pub fn end_insertion(&self) -> Cursor {
            self.cursor(self.insertion(), true)
        }

        /// Start of a walk in [`Order::Reverse`].
        pub fn begin_reverse(&self) -> Cursor {
            let permutation = order::reverse(self.len());
            self.cursor(permutation.into(), false)
        }

        /// End sentinel of a walk in [`Order::Reverse`].
        pub fn end_reverse(&self) -> Cursor {
            let permutation = order::reverse(self.len());
            self.cursor(permutation.into(), true)
        }

        /// Start of a walk in [`Order::MiddleOut`].
        pub fn begin_middle_out(&self) -> Cursor {
            let permutation = order::middle_out(self.len());
            self.cursor(permutation.into(), false)
        }

        /// End sentinel of a walk in [`Order::MiddleOut`].
        pub fn end_middle_out(&self) -> Cursor {
            let permutation = order::middle_out(self.len());
            self.cursor(permutation.into(), true)
        }

        /// Walks the elements in insertion order.
        pub fn iter(&self) -> Traversal<'_, T> {
            Traversal::new(self, Order::Insertion, self.begin())
        }
    } // impl Container

    impl<T: Ord> Container<T> {
        /// Start of a walk in `order`,
        /// over the elements as they are now.
        pub fn begin_order(&self, order: Order) -> Cursor {
            self.cursor(order.permutation(&self.elements), false)
        }

        /// End sentinel of a walk in `order`.
        ///
        /// This computes its own permutation.
        /// Pair it with a `begin_order()`
        /// from before any mutation in between.
        pub fn end_order(&self, order: Order) -> Cursor {
            self.cursor(order.permutation(&self.elements), true)
        }

        /// Start of a walk in [`Order::Ascending`].
        pub fn begin_ascending(&self) -> Cursor {
            self.begin_order(Order::Ascending)
        }

        /// End sentinel of a walk in [`Order::Ascending`].
        pub fn end_ascending(&self) -> Cursor {
            self.end_order(Order::Ascending)
        }

        /// Start of a walk in [`Order::Descending`].
        pub fn begin_descending(&self) -> Cursor {
            self.begin_order(Order::Descending)
        }

        /// End sentinel of a walk in [`Order::Descending`].
        pub fn end_descending(&self) -> Cursor {
            self.end_order(Order::Descending)
        }

        /// Start of a walk in [`Order::SideCross`].
        pub fn begin_side_cross(&self) -> Cursor {
            self.begin_order(Order::SideCross)
        }

        /// End sentinel of a walk in [`Order::SideCross`].
        pub fn end_side_cross(&self) -> Cursor {
            self.end_order(Order::SideCross)
        }

        /// Walks the elements in `order`, as an [`Iterator`].
        ///
        /// The walk borrows the container,
        /// so it can’t go stale.
        pub fn traverse(&self, order: Order) -> Traversal<'_, T> {
            Traversal::new(self, order, self.begin_order(order))
        }
    } // impl Container

    impl<T> Default for Container<T> {
        fn default() -> Self {
            Container::new()
        }
    }

    /// A clone is a different container,
    /// so it gets its own identity:
    /// cursors over the original don’t read from the clone.
    impl<T: Clone> Clone for Container<T> {
        fn clone(&self) -> Self {
            Container {
                id: ContainerId::fresh(),
                revision: self.revision,
                elements: self.elements.clone(),
            }
        }
    }

    impl<T: fmt::Display> fmt::Display for Container<T> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("[")?;
            for (i, element) in self.elements.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{element}")?;
            }
            f.write_str("]")
        }
    }

    impl<T> FromIterator<T> for Container<T> {
        fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
            let mut container = Container::new();
            container.extend(iter);
            container
        }
    }

    impl<T> Extend<T> for Container<T> {
        fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
            let before = self.elements.len();
            self.elements.extend(iter);
            if self.elements.len() != before {
                self.revision += 1;
            }
        }
    }

    impl<'c, T> IntoIterator for &'c Container<T> {
        type Item = &'c T;
        type IntoIter = Traversal<'c, T>;

        fn into_iter(self) -> Traversal<'c, T> {
            self.iter()
        }
    }
}

pub mod cursor {

    //! Forward-only positions in a frozen permutation.
    //!
    //! A [`Cursor`] doesn’t borrow its container.
    //! It remembers the container’s [`ContainerId`]
    //! and is handed the container again
    //! each time it’s read with [`Cursor::get()`].
    //! That is what lets a container change
    //! while cursors over it are still around.

    use super::container::{Container, ContainerId};
    use super::error::{Error, Result};
    use super::order::Permutation;

    /// A position in one traversal of one container.
    ///
    /// States:
    ///
    /// - *active* while `position() < len()`: readable;
    /// - *end* when `position() == len()`: the sentinel,
    ///   which compares equal to the matching `end_*()`;
    /// - anything further is refused with [`Error::PastEnd`].
    ///
    /// Clones share the permutation
    /// but move independently.
    /// A `Cursor::default()` belongs to no container
    /// and can never be read.
    #[derive(Clone, Debug, Default)]
    pub struct Cursor {
        container: Option<ContainerId>,
        revision: u64,
        permutation: Permutation,
        position: usize,
    }

    impl Cursor {
        pub(crate) fn new(
            container: ContainerId,
            revision: u64,
            permutation: Permutation,
            position: usize,
        ) -> Self {
            debug_assert!(position <= permutation.len());
            Cursor {
                container: Some(container),
                revision,
                permutation,
                position,
            }
        }

        /// Steps forward, possibly onto the end sentinel.
        ///
        /// # Errors
        ///
        /// [`Error::PastEnd`] if already at the end sentinel.
        /// The cursor stays where it was.
        pub fn advance(&mut self) -> Result<()> {
            if self.is_end() {
                return Err(Error::PastEnd);
            }
            self.position += 1;
            Ok(())
        }

        /// Reads the element under the cursor.
        ///
        /// The index is the one captured when the cursor was made;
        /// the element is whatever `container` holds there *now*.
        ///
        /// # Errors
        ///
        /// [`Error::OutOfRange`] if
        ///
        /// - the cursor is at its end sentinel;
        /// - the cursor doesn’t belong to `container`;
        /// - elements were removed since,
        ///   and the index is no longer inside the container.
        pub fn get<'c, T>(&self, container: &'c Container<T>) -> Result<&'c T> {
            if self.container != Some(container.id()) {
                return Err(Error::OutOfRange);
            }
            let index = self
                .permutation
                .get(self.position)
                .ok_or(Error::OutOfRange)?;
            container.as_slice().get(index).ok_or_else(|| {
                log::trace!(
                    "stale index {index} in container of {}",
                    container.len()
                );
                Error::OutOfRange
            })
        }

        /// The captured index under the cursor,
        /// or `None` at the end sentinel.
        pub fn index(&self) -> Option<usize> {
            self.permutation.get(self.position)
        }

        /// How far along the permutation the cursor is.
        pub fn position(&self) -> usize {
            self.position
        }

        /// Length of the permutation,
        /// which is also the end sentinel’s position.
        pub fn len(&self) -> usize {
            self.permutation.len()
        }

        /// Whether the permutation is empty,
        /// so that beginning and end coincide.
        pub fn is_empty(&self) -> bool {
            self.permutation.is_empty()
        }

        /// Whether the cursor is at its end sentinel.
        pub fn is_end(&self) -> bool {
            self.position >= self.permutation.len()
        }

        /// Number of elements left to visit.
        pub fn remaining(&self) -> usize {
            self.len() - self.position
        }

        /// The whole frozen permutation.
        pub fn indices(&self) -> &[usize] {
            self.permutation.as_slice()
        }

        /// The container this cursor was made from.
        pub fn container(&self) -> Option<ContainerId> {
            self.container
        }

        /// Whether `container` differs from the one
        /// this cursor was made from,
        /// or has been mutated since.
        pub fn is_stale<T>(&self, container: &Container<T>) -> bool {
            self.container != Some(container.id())
                || self.revision != container.revision()
        }
    } // impl Cursor

    /// Same container, same position.
    impl PartialEq for Cursor {
        fn eq(&self, other: &Self) -> bool {
            self.container == other.container && self.position == other.position
        }
    }

    impl Eq for Cursor {}
}

pub mod traversal {

    //! Cursors as ordinary iterators.

    use super::container::Container;
    use super::cursor::Cursor;
    use super::order::Order;
    use core::iter::FusedIterator;

    /// Like [`core::slice::Iter`],
    /// but in any [`Order`].
    ///
    /// Holding the container borrowed
    /// means nothing can change underneath,
    /// so every step succeeds until the end.
    #[derive(Debug)]
    pub struct Traversal<'c, T> {
        container: &'c Container<T>,
        order: Order,
        cursor: Cursor,
    }

    impl<'c, T> Traversal<'c, T> {
        pub(crate) fn new(
            container: &'c Container<T>,
            order: Order,
            cursor: Cursor,
        ) -> Self {
            Traversal {
                container,
                order,
                cursor,
            }
        }

        /// The order being walked.
        pub fn order(&self) -> Order {
            self.order
        }

        /// Where the walk is.
        pub fn cursor(&self) -> &Cursor {
            &self.cursor
        }

        /// Lets go of the container,
        /// keeping the position.
        pub fn into_cursor(self) -> Cursor {
            self.cursor
        }
    }

    impl<T> Clone for Traversal<'_, T> {
        fn clone(&self) -> Self {
            Traversal {
                container: self.container,
                order: self.order,
                cursor: self.cursor.clone(),
            }
        }
    }

    impl<'c, T> Iterator for Traversal<'c, T> {
        type Item = &'c T;

        fn next(&mut self) -> Option<&'c T> {
            let element = self.cursor.get(self.container).ok()?;
            self.cursor.advance().ok()?;
            Some(element)
        }

        fn size_hint(&self) -> (usize, Option<usize>) {
            let remaining = self.cursor.remaining();
            (remaining, Some(remaining))
        }
    }

    impl<T> ExactSizeIterator for Traversal<'_, T> {}

    impl<T> FusedIterator for Traversal<'_, T> {}
}
