//! [`Client`] read model definition.
//!
//! [`Client`]: crate::domain::Client

pub mod list {
    //! [`Client`]s list definitions.

    use common::define_pagination;

    use crate::domain::Client;

    define_pagination!(Client, Filter);

    /// Filter for [`Selector`].
    #[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
    pub struct Filter {
        /// Name or document (or their part) to search for.
        pub search: Option<String>,
    }
}
