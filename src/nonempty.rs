//! Non-empty vector type
//!
//! [`NonEmptyVec<T>`] is a vector guaranteed to contain at least one element.
//! It backs the message list of [`ValidationError`](crate::errors::ValidationError)
//! and the member list of [`Fault::aggregate`](crate::Fault::aggregate), where
//! an empty collection would be meaningless.
//!
//! # Examples
//!
//! ```
//! use verdict::NonEmptyVec;
//!
//! let nev = NonEmptyVec::new("name is required", vec!["age must be positive"]);
//! assert_eq!(nev.head(), &"name is required");
//! assert_eq!(nev.len(), 2);
//! ```

/// A non-empty vector guaranteed to contain at least one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyVec<T> {
    head: T,
    tail: Vec<T>,
}

impl<T> NonEmptyVec<T> {
    /// Create a new non-empty vector with a head element and tail.
    pub fn new(head: T, tail: Vec<T>) -> Self {
        Self { head, tail }
    }

    /// Create a non-empty vector with a single element.
    pub fn singleton(value: T) -> Self {
        Self::new(value, Vec::new())
    }

    /// Try to build a non-empty vector, returning `None` for an empty input.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::NonEmptyVec;
    ///
    /// assert!(NonEmptyVec::from_vec(vec![1, 2]).is_some());
    /// assert!(NonEmptyVec::<i32>::from_vec(vec![]).is_none());
    /// ```
    pub fn from_vec(mut vec: Vec<T>) -> Option<Self> {
        if vec.is_empty() {
            None
        } else {
            let head = vec.remove(0);
            Some(Self::new(head, vec))
        }
    }

    /// The first element. Always present.
    pub fn head(&self) -> &T {
        &self.head
    }

    /// Every element after the first.
    pub fn tail(&self) -> &[T] {
        &self.tail
    }

    /// Number of elements, never zero.
    pub fn len(&self) -> usize {
        1 + self.tail.len()
    }

    /// Always `false`; present for API symmetry with `Vec`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Keep the elements matching `predicate`; `None` when nothing survives.
    pub fn retain<F>(self, mut predicate: F) -> Option<Self>
    where
        F: FnMut(&T) -> bool,
    {
        let kept: Vec<T> = self.into_iter().filter(|x| predicate(x)).collect();
        Self::from_vec(kept)
    }

    /// Convert into a regular vector.
    pub fn into_vec(self) -> Vec<T> {
        let mut vec = Vec::with_capacity(self.len());
        vec.push(self.head);
        vec.extend(self.tail);
        vec
    }

    /// Iterate over all elements in order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        std::iter::once(&self.head).chain(self.tail.iter())
    }
}

impl<T> IntoIterator for NonEmptyVec<T> {
    type Item = T;
    type IntoIter = std::iter::Chain<std::iter::Once<T>, std::vec::IntoIter<T>>;

    fn into_iter(self) -> Self::IntoIter {
        std::iter::once(self.head).chain(self.tail)
    }
}
