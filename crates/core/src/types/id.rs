//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_uuid!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

/// Macro to define a type-safe uuid-backed ID wrapper.
///
/// Creates a newtype wrapper around [`uuid::Uuid`] with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - Constructors: `new()`, `random()`
/// - Accessor: `as_uuid()`
/// - `Display`, `FromStr`, and `From<Uuid>` implementations
///
/// # Example
///
/// ```rust
/// # use orchard_core::define_uuid;
/// define_uuid!(UserUuid);
/// define_uuid!(OrderUuid);
///
/// let user = UserUuid::random();
/// let order = OrderUuid::random();
///
/// // These are different types, so this won't compile:
/// // let _: UserUuid = order;
/// ```
#[macro_export]
macro_rules! define_uuid {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Wrap an existing uuid.
            #[must_use]
            pub const fn new(id: ::uuid::Uuid) -> Self {
                Self(id)
            }

            /// Generate a fresh random (v4) identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// Get the underlying uuid.
            #[must_use]
            pub const fn as_uuid(&self) -> ::uuid::Uuid {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::uuid::Error;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.parse::<::uuid::Uuid>().map(Self)
            }
        }

        impl From<::uuid::Uuid> for $name {
            fn from(id: ::uuid::Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for ::uuid::Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_uuid!(UserUuid);
define_uuid!(PaymentMethodUuid);
define_uuid!(OrderUuid);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_random_ids_differ() {
        assert_ne!(UserUuid::random(), UserUuid::random());
    }

    #[test]
    fn test_display_round_trip() {
        let id = UserUuid::random();
        let parsed: UserUuid = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("not-a-uuid".parse::<PaymentMethodUuid>().is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let id = OrderUuid::random();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));

        let back: OrderUuid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
