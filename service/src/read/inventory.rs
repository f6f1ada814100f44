//! Inventory [`Movement`] read model definition.
//!
//! [`Movement`]: crate::domain::Movement

pub mod list {
    //! Inventory [`Movement`]s list definitions.

    use common::define_pagination;

    use crate::domain::{product, Movement};

    define_pagination!(Movement, Filter);

    /// Filter for [`Selector`].
    #[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
    pub struct Filter {
        /// Only [`Movement`]s of the product with this ID.
        pub product_id: Option<product::Id>,

        /// Product name or description (or their part) to search for.
        pub search: Option<String>,
    }
}
