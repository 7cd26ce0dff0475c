//! Tagged unions of two to eight alternatives
//!
//! `OneOf2<A, B>` through `OneOf8<A, .., H>` hold exactly one value, tagged by
//! position. Unlike [`Outcome`](crate::Outcome) no alternative means failure and
//! there is no diagnostic bag: a `OneOf` is a plain sum type whose consumer is
//! expected to handle every case, usually with [`fold`](OneOf2::fold) or a
//! `match`.
//!
//! # Examples
//!
//! ```
//! use verdict::OneOf3;
//!
//! fn parse(input: &str) -> OneOf3<i64, f64, String> {
//!     if let Ok(n) = input.parse() {
//!         OneOf3::First(n)
//!     } else if let Ok(x) = input.parse() {
//!         OneOf3::Second(x)
//!     } else {
//!         OneOf3::Third(input.to_string())
//!     }
//! }
//!
//! let described = parse("2.5").fold(
//!     |n| format!("int {n}"),
//!     |x| format!("float {x}"),
//!     |s| format!("text {s}"),
//! );
//! assert_eq!(described, "float 2.5");
//! assert_eq!(parse("x").index(), 2);
//! ```

macro_rules! one_of {
    (
        $(#[$attr:meta])*
        $name:ident {
            $($idx:literal $variant:ident($T:ident) $is:ident $get:ident $into:ident $on:ident $F:ident),+ $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name<$($T),+> {
            $(
                #[doc = concat!("Alternative at position ", stringify!($idx))]
                $variant($T),
            )+
        }

        impl<$($T),+> $name<$($T),+> {
            /// Zero-based position of the held alternative.
            pub fn index(&self) -> usize {
                match self {
                    $($name::$variant(_) => $idx,)+
                }
            }

            $(
                #[doc = concat!("Returns `true` when holding `", stringify!($variant), "`.")]
                pub fn $is(&self) -> bool {
                    matches!(self, $name::$variant(_))
                }

                #[doc = concat!("Borrow the `", stringify!($variant), "` value, if held.")]
                pub fn $get(&self) -> Option<&$T> {
                    match self {
                        $name::$variant(value) => Some(value),
                        _ => None,
                    }
                }

                #[doc = concat!("Take the `", stringify!($variant), "` value, if held.")]
                pub fn $into(self) -> Option<$T> {
                    match self {
                        $name::$variant(value) => Some(value),
                        _ => None,
                    }
                }
            )+

            /// Run the handler for the held alternative. Exactly one handler is
            /// invoked.
            pub fn fold<R, $($F),+>(self, $($on: $F),+) -> R
            where
                $($F: FnOnce($T) -> R),+
            {
                match self {
                    $($name::$variant(value) => $on(value),)+
                }
            }

            /// Borrow the held value without consuming the union.
            pub fn as_ref(&self) -> $name<$(&$T),+> {
                match self {
                    $($name::$variant(value) => $name::$variant(value),)+
                }
            }
        }
    };
}

one_of! {
    /// One of two alternatives.
    OneOf2 {
        0 First(A) is_first first into_first on_first FA,
        1 Second(B) is_second second into_second on_second FB,
    }
}

one_of! {
    /// One of three alternatives.
    OneOf3 {
        0 First(A) is_first first into_first on_first FA,
        1 Second(B) is_second second into_second on_second FB,
        2 Third(C) is_third third into_third on_third FC,
    }
}

one_of! {
    /// One of four alternatives.
    OneOf4 {
        0 First(A) is_first first into_first on_first FA,
        1 Second(B) is_second second into_second on_second FB,
        2 Third(C) is_third third into_third on_third FC,
        3 Fourth(D) is_fourth fourth into_fourth on_fourth FD,
    }
}

one_of! {
    /// One of five alternatives.
    OneOf5 {
        0 First(A) is_first first into_first on_first FA,
        1 Second(B) is_second second into_second on_second FB,
        2 Third(C) is_third third into_third on_third FC,
        3 Fourth(D) is_fourth fourth into_fourth on_fourth FD,
        4 Fifth(E) is_fifth fifth into_fifth on_fifth FE,
    }
}

one_of! {
    /// One of six alternatives.
    OneOf6 {
        0 First(A) is_first first into_first on_first FA,
        1 Second(B) is_second second into_second on_second FB,
        2 Third(C) is_third third into_third on_third FC,
        3 Fourth(D) is_fourth fourth into_fourth on_fourth FD,
        4 Fifth(E) is_fifth fifth into_fifth on_fifth FE,
        5 Sixth(G) is_sixth sixth into_sixth on_sixth FG,
    }
}

one_of! {
    /// One of seven alternatives.
    OneOf7 {
        0 First(A) is_first first into_first on_first FA,
        1 Second(B) is_second second into_second on_second FB,
        2 Third(C) is_third third into_third on_third FC,
        3 Fourth(D) is_fourth fourth into_fourth on_fourth FD,
        4 Fifth(E) is_fifth fifth into_fifth on_fifth FE,
        5 Sixth(G) is_sixth sixth into_sixth on_sixth FG,
        6 Seventh(H) is_seventh seventh into_seventh on_seventh FH,
    }
}

one_of! {
    /// One of eight alternatives.
    OneOf8 {
        0 First(A) is_first first into_first on_first FA,
        1 Second(B) is_second second into_second on_second FB,
        2 Third(C) is_third third into_third on_third FC,
        3 Fourth(D) is_fourth fourth into_fourth on_fourth FD,
        4 Fifth(E) is_fifth fifth into_fifth on_fifth FE,
        5 Sixth(G) is_sixth sixth into_sixth on_sixth FG,
        6 Seventh(H) is_seventh seventh into_seventh on_seventh FH,
        7 Eighth(I) is_eighth eighth into_eighth on_eighth FI,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_accessors() {
        let value: OneOf2<i32, &str> = OneOf2::Second("b");
        assert!(value.is_second());
        assert!(!value.is_first());
        assert_eq!(value.first(), None);
        assert_eq!(value.second(), Some(&"b"));
        assert_eq!(value.into_second(), Some("b"));
    }

    #[test]
    fn test_index() {
        assert_eq!(OneOf3::<u8, u8, u8>::First(0).index(), 0);
        assert_eq!(OneOf3::<u8, u8, u8>::Third(0).index(), 2);
        assert_eq!(OneOf8::<(), (), (), (), (), (), (), u8>::Eighth(1).index(), 7);
    }

    #[test]
    fn test_fold_invokes_exactly_one_handler() {
        let calls = Cell::new(0);
        let count = |label: &'static str| {
            calls.set(calls.get() + 1);
            label
        };

        let value: OneOf4<u8, u16, u32, u64> = OneOf4::Third(3);
        let label = value.fold(|_| count("a"), |_| count("b"), |_| count("c"), |_| count("d"));

        assert_eq!(label, "c");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_as_ref() {
        let value: OneOf2<String, i32> = OneOf2::First("text".to_string());
        let borrowed = value.as_ref();
        assert_eq!(borrowed.first().map(|s| s.len()), Some(4));
        assert!(value.is_first());
    }

    #[test]
    fn test_equality() {
        assert_eq!(OneOf2::<i32, i32>::First(1), OneOf2::First(1));
        assert_ne!(OneOf2::<i32, i32>::First(1), OneOf2::Second(1));
    }
}
