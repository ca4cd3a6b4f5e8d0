//! Newtype IDs for type-safe entity references.
//!
//! Shopify identifies everything with opaque global IDs such as
//! `gid://shopify/ProductVariant/4242`. Use the `define_id!` macro to create
//! type-safe wrappers that prevent accidentally mixing IDs from different
//! entity types.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`, `legacy_id()`
/// - `From<String>`, `From<&str>`, and `Into<String>` implementations
///
/// # Example
///
/// ```rust
/// # use guitar_shop_core::define_id;
/// define_id!(ShirtId);
/// define_id!(HatId);
///
/// let shirt = ShirtId::new("gid://shopify/Product/1");
/// let hat = HatId::new("gid://shopify/Product/1");
///
/// // These are different types, so this won't compile:
/// // let _: ShirtId = hat;
/// assert_eq!(shirt.legacy_id(), "1");
/// # let _ = hat;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying ID string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the ID string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }

            /// The trailing numeric segment of a Shopify global ID.
            ///
            /// Returns the whole ID when it is not in `gid://` form.
            #[must_use]
            pub fn legacy_id(&self) -> &str {
                self.0.rsplit('/').next().unwrap_or(&self.0)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(ProductId);
define_id!(VariantId);
define_id!(CheckoutId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_id_from_gid() {
        let id = VariantId::new("gid://shopify/ProductVariant/4242");
        assert_eq!(id.legacy_id(), "4242");
    }

    #[test]
    fn test_legacy_id_plain() {
        let id = VariantId::new("v1");
        assert_eq!(id.legacy_id(), "v1");
    }

    #[test]
    fn test_id_serializes_transparently() {
        let id = ProductId::new("gid://shopify/Product/1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"gid://shopify/Product/1\"");
    }

    #[test]
    fn test_id_display() {
        let id = CheckoutId::from("gid://shopify/Cart/abc");
        assert_eq!(id.to_string(), "gid://shopify/Cart/abc");
    }
}
