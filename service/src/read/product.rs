//! [`Product`] read model definition.
//!
//! [`Product`]: crate::domain::Product

pub mod list {
    //! [`Product`]s list definitions.

    use common::define_pagination;

    use crate::domain::Product;

    define_pagination!(Product, Filter);

    /// Filter for [`Selector`].
    #[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
    pub struct Filter {
        /// Name (or its part) to search for.
        pub search: Option<String>,
    }
}
