//! Semigroup trait for associative merging
//!
//! Diagnostic state is merged in several places: reason lists are concatenated
//! when outcomes are chained, metadata maps are merged last-write-wins, and
//! faults collected by [`combine`](crate::traverse::combine) fold into a single
//! aggregate. All of them go through [`Semigroup::combine`].
//!
//! # Mathematical Properties
//!
//! For a type to be a valid Semigroup, the `combine` operation must be associative:
//! ```text
//! a.combine(b).combine(c) == a.combine(b.combine(c))
//! ```
//!
//! # Examples
//!
//! ```
//! use verdict::{Metadata, Semigroup};
//!
//! let v1 = vec![1, 2, 3];
//! let v2 = vec![4, 5, 6];
//! assert_eq!(v1.combine(v2), vec![1, 2, 3, 4, 5, 6]);
//!
//! let a: Metadata = [("region", "eu")].into_iter().collect();
//! let b: Metadata = [("REGION", "us")].into_iter().collect();
//! assert_eq!(a.combine(b).get("region").and_then(|v| v.as_str()), Some("us"));
//! ```

/// A type that supports an associative binary operation
///
/// # Laws
///
/// Implementations must satisfy the associativity law:
/// ```text
/// a.combine(b).combine(c) == a.combine(b.combine(c))
/// ```
///
/// # Note on Ownership
///
/// The `combine` method takes `self` by value, not by reference. If you need to
/// preserve the original values, you must clone them before combining.
pub trait Semigroup: Sized {
    /// Combine this value with another value associatively
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Semigroup;
    ///
    /// let v1 = vec![1, 2];
    /// let v2 = vec![3, 4];
    /// let result = v1.combine(v2);
    /// assert_eq!(result, vec![1, 2, 3, 4]);
    /// ```
    fn combine(self, other: Self) -> Self;
}

impl<T> Semigroup for Vec<T> {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_semigroup() {
        let v1 = vec![1, 2, 3];
        let v2 = vec![4, 5, 6];
        assert_eq!(v1.combine(v2), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_vec_associativity() {
        let a = vec![1];
        let b = vec![2];
        let c = vec![3];

        assert_eq!(
            a.clone().combine(b.clone()).combine(c.clone()),
            a.combine(b.combine(c))
        );
    }

    #[test]
    fn test_vec_empty_is_neutral() {
        let v: Vec<i32> = vec![1, 2];
        assert_eq!(v.clone().combine(Vec::new()), v);
        assert_eq!(Vec::new().combine(v.clone()), v);
    }
}
