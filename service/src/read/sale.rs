//! [`Sale`] read model definition.
//!
//! [`Sale`]: crate::domain::Sale

pub mod list {
    //! [`Sale`]s list definitions.

    use common::define_pagination;

    use crate::domain::{client, Sale};

    define_pagination!(Sale, Filter);

    /// Filter for [`Selector`].
    #[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
    pub struct Filter {
        /// Code or client name (or their part) to search for.
        pub search: Option<String>,

        /// Only [`Sale`]s of the client with this ID.
        pub client_id: Option<client::Id>,
    }
}
