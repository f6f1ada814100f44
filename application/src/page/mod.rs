//! Pages of the back-office, rendered as plain text.

mod clients;
mod dashboard;
mod inventory;
mod invite;
mod products;
mod reports;
mod sales;
mod session;
mod table;
mod users;

use std::future::Future;

use common::pagination::{Page as ItemsPage, Selector};
use futures::TryFutureExt as _;
use service::{
    domain::Identify,
    listing::{Listing, State},
};

use tracing as log;

use crate::{args::Page, define_error, Context, Error};

use self::table::Table;

/// Shows the provided [`Page`], returning its rendered text.
///
/// # Errors
///
/// If the [`Page`] fails to load or its action fails.
pub async fn show(ctx: &Context, page: Page) -> Result<String, Error> {
    match page {
        Page::Login { email, password } => {
            session::login(ctx, email, password).await
        }
        Page::Logout => Ok(session::logout(ctx).await),
        Page::Me => session::me(ctx).await,
        Page::Dashboard => dashboard::show(ctx).await,
        Page::Clients(page) => clients::show(ctx, page).await,
        Page::Products(page) => products::show(ctx, page).await,
        Page::Sales(page) => sales::show(ctx, page).await,
        Page::Inventory(page) => inventory::show(ctx, page).await,
        Page::Users(page) => users::show(ctx, page).await,
        Page::Reports(report) => reports::show(ctx, report).await,
        Page::Invite { expires_at } => invite::create(ctx, expires_at).await,
    }
}

/// Loads up to the provided number of `pages` of a [`Listing`] with the
/// provided `fetch`.
///
/// A failed page is requested again only if `retry` is set. Items loaded
/// before a failure are kept and shown along with it.
async fn browse<T, F, Fut>(
    ctx: &Context,
    filter: F,
    pages: u32,
    retry: bool,
    fetch: impl Fn(Selector<F>) -> Fut,
) -> Result<Listing<T, F>, Error>
where
    T: Identify,
    F: Clone,
    Fut: Future<Output = Result<ItemsPage<T>, Error>>,
{
    define_error! {
        enum Error {
            #[code = "INVALID_PAGE_SIZE"]
            #[kind = Validation]
            #[message = "`listing.page_size` must be positive"]
            InvalidPageSize,
        }
    }

    let mut listing = ctx
        .service()
        .listing(filter)
        .ok_or_else(|| Error::InvalidPageSize.into())
        .map_err(ctx.error())?;

    match scroll(&mut listing, pages, retry, fetch).await {
        Some(e) if listing.is_empty() => Err((ctx.error())(e)),
        Some(e) => {
            log::warn!("showing {} items loaded before: {e}", listing.len());
            _ = (ctx.error())(e);
            Ok(listing)
        }
        None => Ok(listing),
    }
}

/// Scrolls the provided [`Listing`] until `pages` pages are loaded, it's
/// exhausted or a page fails.
///
/// Returns the [`Error`] of the failed page, if any.
async fn scroll<T, F, Fut>(
    listing: &mut Listing<T, F>,
    pages: u32,
    mut retry: bool,
    fetch: impl Fn(Selector<F>) -> Fut,
) -> Option<Error>
where
    T: Identify,
    F: Clone,
    Fut: Future<Output = Result<ItemsPage<T>, Error>>,
{
    let fetch = &fetch;
    let mut failure = None;
    let mut requested = 1;
    let mut ticket = listing.start();
    while let Some(t) = ticket {
        let slot = &mut failure;
        _ = listing
            .load(t, move |s| {
                fetch(s).inspect_err(move |e| *slot = Some(e.clone()))
            })
            .await;

        ticket = match listing.state() {
            State::Error if retry => {
                retry = false;
                listing.retry()
            }
            State::Loaded if requested < pages => {
                requested += 1;
                listing.on_scroll_proximity()
            }
            State::Idle
            | State::Resetting
            | State::Loading
            | State::Loaded
            | State::Exhausted
            | State::Error => None,
        };
    }

    failure.filter(|_| listing.state() == State::Error)
}

/// Renders the provided [`Listing`] as a [`Table`] with a summary footer.
fn render_listing<T: Identify, F>(
    listing: &Listing<T, F>,
    table: Table,
) -> String {
    if table.is_empty() {
        return "Nothing found.\n".into();
    }
    let total = listing
        .total()
        .map_or_else(|| "?".to_owned(), |t| t.to_string());
    let more = if listing.has_more() {
        ", pass a larger --pages to see more"
    } else {
        ""
    };
    let failed = listing.error().map_or_else(String::new, |e| {
        format!("Failed to load more: {e}. Pass --retry to try again.\n")
    });
    format!(
        "{table}\nShowing {} of {total}{more}.\n{failed}",
        listing.len(),
    )
}

#[cfg(test)]
mod spec {
    use std::{cell::RefCell, future};

    use common::pagination::{Page, Selector};
    use service::{
        domain::Identify,
        listing::{Listing, State},
    };

    use crate::Error;

    use super::scroll;

    #[derive(Debug)]
    struct Row(u32);

    impl Identify for Row {
        type Id = u32;

        fn id(&self) -> u32 {
            self.0
        }
    }

    /// Serves pages of 2 out of 6 rows, failing the listed requests.
    fn backend<'a>(
        requests: &'a RefCell<Vec<u32>>,
        failing: &'a [usize],
    ) -> impl Fn(Selector<()>) -> future::Ready<Result<Page<Row>, Error>> + 'a
    {
        move |s| {
            let page = s.arguments.page();
            let mut requests = requests.borrow_mut();
            requests.push(page);
            future::ready(if failing.contains(&requests.len()) {
                Err(Error::internal(&"backend is down"))
            } else {
                Ok(Page {
                    items: vec![Row(page * 2 - 1), Row(page * 2)],
                    total: 6,
                })
            })
        }
    }

    #[tokio::test]
    async fn failed_page_is_not_requested_again() {
        let requests = RefCell::new(vec![]);
        let mut listing = Listing::<Row, ()>::new((), 2).unwrap();

        let failure =
            scroll(&mut listing, 3, false, backend(&requests, &[2])).await;

        assert_eq!(*requests.borrow(), [1, 2]);
        assert_eq!(failure.unwrap().message, "backend is down");
        assert_eq!(listing.state(), State::Error);
        assert_eq!(listing.len(), 2);
    }

    #[tokio::test]
    async fn retry_requests_failed_page_once() {
        let requests = RefCell::new(vec![]);
        let mut listing = Listing::<Row, ()>::new((), 2).unwrap();

        let failure =
            scroll(&mut listing, 3, true, backend(&requests, &[2])).await;

        assert!(failure.is_none());
        assert_eq!(*requests.borrow(), [1, 2, 2, 3]);
        assert_eq!(listing.state(), State::Exhausted);
        assert_eq!(listing.len(), 6);

        let requests = RefCell::new(vec![]);
        let mut listing = Listing::<Row, ()>::new((), 2).unwrap();

        let failure =
            scroll(&mut listing, 3, true, backend(&requests, &[2, 3])).await;

        assert!(failure.is_some());
        assert_eq!(*requests.borrow(), [1, 2, 2]);
        assert_eq!(listing.len(), 2);
    }
}
