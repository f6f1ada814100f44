//! Macros for defining kind enums.

/// Macro for defining a kind enum.
///
/// Variants are represented on the wire (and parsed from user input) in
/// `SCREAMING_SNAKE_CASE`.
///
/// # Example
///
/// ```rust,ignore
/// use common::define_kind;
///
/// define_kind! {
///     #[doc = "Payment method."]
///     enum Method {
///         #[doc = "Cash payment."]
///         Cash = 1,
///
///         #[doc = "Wallet payment."]
///         Wallet = 2,
///     }
/// }
///
/// assert_eq!(Method::Cash.to_string(), "CASH");
/// assert_eq!("wallet".parse::<Method>().unwrap(), Method::Wallet);
/// ```
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            PartialEq,
        )]
        #[derive(
            $crate::private::serde::Deserialize,
            $crate::private::serde::Serialize,
        )]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        #[doc = $doc]
        #[repr(u8)]
        #[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $variant = $value,
            )*
        }

        impl $name {
            /// All the variants of this kind, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];
        }
    };
}
