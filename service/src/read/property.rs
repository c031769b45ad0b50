//! [`Property`]-related read definitions.

#[cfg(doc)]
use crate::domain::Property;

pub mod list {
    //! [`Property`] list definitions.

    use crate::domain::{property, Property};

    /// Filter for a [`Property`] list.
    ///
    /// All the criteria are combined with a logical AND; an unset criterion
    /// matches everything.
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// Exact match on the `featured` flag.
        pub featured: Option<bool>,

        /// Case-insensitive exact match on the [`property::Operation`].
        pub operation: Option<String>,

        /// Case-insensitive exact match on the [`property::Kind`].
        pub kind: Option<String>,

        /// Case-insensitive substring match on the [`property::Location`].
        pub location: Option<String>,

        /// [`Rooms`] bucket match on the number of bedrooms.
        pub rooms: Option<Rooms>,
    }

    impl Filter {
        /// Checks whether the given [`Property`] satisfies this [`Filter`].
        #[must_use]
        pub fn matches(&self, property: &Property) -> bool {
            if let Some(featured) = self.featured {
                if property.featured != featured {
                    return false;
                }
            }
            if let Some(op) = &self.operation {
                let prop_op: &str = property.operation.as_ref();
                if prop_op.to_lowercase() != op.to_lowercase() {
                    return false;
                }
            }
            if let Some(kind) = &self.kind {
                let prop_kind: &str = property.kind.as_ref();
                if prop_kind.to_lowercase() != kind.to_lowercase() {
                    return false;
                }
            }
            if let Some(location) = &self.location {
                let prop_loc: &str = property.location.as_ref();
                if !prop_loc.to_lowercase().contains(&location.to_lowercase())
                {
                    return false;
                }
            }
            if let Some(rooms) = self.rooms {
                if !rooms.matches(property.bedrooms) {
                    return false;
                }
            }
            true
        }
    }

    /// Bedrooms criterion of a [`Filter`].
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum Rooms {
        /// Exactly the given number of bedrooms.
        ///
        /// Kept as the raw submitted integer: a count no [`Property`] can
        /// have (negative, or far too large to stay below the bucket)
        /// simply matches nothing.
        Exact(i64),

        /// Four bedrooms or more (the "4+" bucket of the listings UI).
        FourOrMore,
    }

    impl Rooms {
        /// Parses a [`Rooms`] criterion from the raw query parameter.
        ///
        /// Any integer 4 or above falls into the [`Rooms::FourOrMore`]
        /// bucket. [`None`] is returned for non-integer input only, which
        /// makes the criterion silently ignored.
        #[must_use]
        pub fn from_param(raw: &str) -> Option<Self> {
            let n: i64 = raw.parse().ok()?;
            Some(if n >= 4 { Self::FourOrMore } else { Self::Exact(n) })
        }

        /// Checks whether the given number of `bedrooms` satisfies this
        /// criterion.
        #[must_use]
        pub fn matches(self, bedrooms: property::Bedrooms) -> bool {
            match self {
                Self::Exact(n) => i64::from(bedrooms) == n,
                Self::FourOrMore => bedrooms >= 4,
            }
        }
    }

    #[cfg(test)]
    mod spec {
        use super::Rooms;

        #[test]
        fn four_and_above_collapse_into_one_bucket() {
            assert_eq!(Rooms::from_param("4"), Some(Rooms::FourOrMore));
            assert_eq!(Rooms::from_param("7"), Some(Rooms::FourOrMore));
            assert_eq!(Rooms::from_param("300"), Some(Rooms::FourOrMore));
            assert_eq!(Rooms::from_param("2"), Some(Rooms::Exact(2)));
        }

        #[test]
        fn negative_counts_parse_but_match_nothing() {
            let rooms = Rooms::from_param("-1").unwrap();
            assert_eq!(rooms, Rooms::Exact(-1));
            assert!(!rooms.matches(0));
            assert!(!rooms.matches(3));
        }

        #[test]
        fn non_integer_input_is_ignored() {
            assert_eq!(Rooms::from_param(""), None);
            assert_eq!(Rooms::from_param("many"), None);
            assert_eq!(Rooms::from_param("3.5"), None);
        }

        #[test]
        fn bucket_matching() {
            assert!(Rooms::FourOrMore.matches(4));
            assert!(Rooms::FourOrMore.matches(5));
            assert!(!Rooms::FourOrMore.matches(3));
            assert!(Rooms::Exact(2).matches(2));
            assert!(!Rooms::Exact(2).matches(3));
        }
    }
}
