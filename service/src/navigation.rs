//! [`Route`]s of the application and the [`Navigator`] switching them.

use std::{fmt, str::FromStr, sync::Arc};

use derive_more::{Display, Error};
use tokio::sync::watch;
use tracing as log;

use crate::{
    domain::{client, sale},
    session::Session,
};

/// Screen of the application.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Route {
    /// Login entry point.
    Login,

    /// Home screen.
    Home,

    /// List of clients.
    Clients,

    /// Details of a single client.
    Client(client::Id),

    /// List of products.
    Products,

    /// List of sales.
    Sales,

    /// Details of a single sale.
    Sale(sale::Id),

    /// Registration of a new sale.
    NewSale,

    /// Inventory movements.
    Inventory,

    /// List of users.
    Users,

    /// Sales reports.
    Reports,

    /// Business activity overview.
    Dashboard,
}

impl Route {
    /// Indicates whether this [`Route`] is accessible without a [`Session`].
    #[must_use]
    pub const fn is_public(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// Returns the list [`Route`] owning this detail [`Route`], if it's one.
    #[must_use]
    pub const fn owner(&self) -> Option<Self> {
        match self {
            Self::Client(_) => Some(Self::Clients),
            Self::Sale(_) | Self::NewSale => Some(Self::Sales),
            Self::Login
            | Self::Home
            | Self::Clients
            | Self::Products
            | Self::Sales
            | Self::Inventory
            | Self::Users
            | Self::Reports
            | Self::Dashboard => None,
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => f.write_str("/login"),
            Self::Home => f.write_str("/"),
            Self::Clients => f.write_str("/clients"),
            Self::Client(id) => write!(f, "/clients/{id}"),
            Self::Products => f.write_str("/products"),
            Self::Sales => f.write_str("/sales"),
            Self::Sale(id) => write!(f, "/sales/{id}"),
            Self::NewSale => f.write_str("/sales/new"),
            Self::Inventory => f.write_str("/inventory"),
            Self::Users => f.write_str("/users"),
            Self::Reports => f.write_str("/reports"),
            Self::Dashboard => f.write_str("/dashboard"),
        }
    }
}

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments = s
            .trim()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        Ok(match segments.as_slice() {
            [] => Self::Home,
            ["login"] => Self::Login,
            ["clients"] => Self::Clients,
            ["clients", id] => Self::Client((*id).into()),
            ["products"] => Self::Products,
            ["sales"] => Self::Sales,
            ["sales", "new"] => Self::NewSale,
            ["sales", id] => Self::Sale((*id).into()),
            ["inventory"] => Self::Inventory,
            ["users"] => Self::Users,
            ["reports"] => Self::Reports,
            ["dashboard"] => Self::Dashboard,
            _ => return Err(UnknownRoute(s.to_owned())),
        })
    }
}

/// Error of parsing an unknown [`Route`].
#[derive(Clone, Debug, Display, Error)]
#[display("unknown route `{_0}`")]
pub struct UnknownRoute(#[error(not(source))] String);

/// Returns the [`Route`] to actually show instead of the requested one,
/// considering the provided [`Session`].
///
/// Protected [`Route`]s redirect to [`Route::Login`] without an
/// authenticated [`Session`], while [`Route::Login`] redirects to
/// [`Route::Home`] with one.
#[must_use]
pub fn guard(route: Route, session: &Session) -> Route {
    match (route.is_public(), session.is_authenticated()) {
        (false, false) => Route::Login,
        (true, true) => Route::Home,
        (false, true) | (true, false) => route,
    }
}

/// Holder of the current [`Route`], notifying subscribers about changes.
///
/// Clones share the same current [`Route`].
#[derive(Clone, Debug)]
pub struct Navigator(Arc<watch::Sender<Route>>);

impl Navigator {
    /// Creates a new [`Navigator`] showing the provided [`Route`].
    #[must_use]
    pub fn new(initial: Route) -> Self {
        let (tx, _) = watch::channel(initial);
        Self(Arc::new(tx))
    }

    /// Returns the current [`Route`].
    #[must_use]
    pub fn current(&self) -> Route {
        self.0.borrow().clone()
    }

    /// Subscribes to the [`Route`] changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.0.subscribe()
    }

    /// Navigates to the provided [`Route`], [`guard`]ed by the provided
    /// [`Session`].
    ///
    /// Returns the [`Route`] actually navigated to.
    pub fn navigate(&self, route: Route, session: &Session) -> Route {
        let route = guard(route, session);
        self.redirect(route.clone());
        route
    }

    /// Switches to the provided [`Route`] unconditionally.
    pub fn redirect(&self, route: Route) {
        log::debug!("navigating to `{route}`");
        _ = self.0.send_replace(route);
    }

    /// Leaves the current detail [`Route`] whose resource doesn't exist,
    /// returning to its owning list.
    ///
    /// Does nothing if the current [`Route`] is not a detail one.
    pub fn not_found(&self) {
        let current = self.current();
        if let Some(owner) = current.owner() {
            log::info!("`{current}` doesn't exist, returning to `{owner}`");
            self.redirect(owner);
        }
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        session::{Session, Token},
        testing::jwt,
    };

    use super::{guard, Navigator, Route};

    fn signed_in() -> Session {
        Session {
            user: None,
            token: Some(Token::new("opaque").unwrap()),
        }
    }

    #[test]
    fn guards_protected_routes() {
        assert_eq!(guard(Route::Sales, &Session::default()), Route::Login);
        assert_eq!(guard(Route::Login, &Session::default()), Route::Login);
        assert_eq!(guard(Route::Sales, &signed_in()), Route::Sales);
        assert_eq!(guard(Route::Login, &signed_in()), Route::Home);
    }

    #[test]
    fn expired_session_is_not_authenticated() {
        let expired = Session {
            user: None,
            token: Some(jwt(common::DateTime::now().unix_timestamp() - 1)),
        };
        assert_eq!(guard(Route::Dashboard, &expired), Route::Login);
    }

    #[test]
    fn parses_and_displays_paths() {
        for path in ["/", "/login", "/clients/c1", "/sales/new", "/sales/s1"] {
            assert_eq!(path.parse::<Route>().unwrap().to_string(), path);
        }
        assert_eq!("/sales/new".parse::<Route>().unwrap(), Route::NewSale);
        assert!("/nowhere".parse::<Route>().is_err());
    }

    #[test]
    fn not_found_returns_to_owning_list() {
        let nav = Navigator::new(Route::Client("c1".into()));
        let mut rx = nav.subscribe();

        nav.not_found();
        assert_eq!(nav.current(), Route::Clients);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), Route::Clients);

        nav.not_found();
        assert_eq!(nav.current(), Route::Clients);
    }

    #[test]
    fn navigate_applies_guard() {
        let nav = Navigator::new(Route::Login);
        assert_eq!(nav.navigate(Route::Users, &Session::default()), Route::Login);
        assert_eq!(nav.navigate(Route::Users, &signed_in()), Route::Users);
        assert_eq!(nav.current(), Route::Users);
    }
}
