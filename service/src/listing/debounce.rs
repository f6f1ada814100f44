//! [`Debouncer`] of rapidly changing inputs.

use std::{
    sync::{Mutex, PoisonError},
    time::Duration,
};

/// Debouncer letting through only the last of the values pushed within a
/// fixed delay window.
#[derive(Debug)]
pub struct Debouncer<T> {
    /// Quiet period a value must survive to be let through.
    delay: Duration,

    /// Sequence number and the latest pushed value.
    latest: Mutex<(u64, Option<T>)>,
}

impl<T> Debouncer<T> {
    /// Creates a new [`Debouncer`] with the provided delay window.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            latest: Mutex::new((0, None)),
        }
    }

    /// Pushes the provided value and waits for the delay window to pass.
    ///
    /// Returns the value if nothing else was pushed meanwhile, or [`None`]
    /// if it was superseded.
    pub async fn settle(&self, value: T) -> Option<T> {
        let seq = {
            let mut latest =
                self.latest.lock().unwrap_or_else(PoisonError::into_inner);
            latest.0 += 1;
            latest.1 = Some(value);
            latest.0
        };

        tokio::time::sleep(self.delay).await;

        let mut latest =
            self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        if latest.0 == seq {
            latest.1.take()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use tokio::time::{sleep, Instant};

    use crate::listing::{Listing, State};

    use super::Debouncer;

    #[tokio::test(start_paused = true)]
    async fn lets_through_last_value_only() {
        let debouncer = Debouncer::new(Duration::from_millis(400));
        let started = Instant::now();

        let (a, b, c) = tokio::join!(
            debouncer.settle("r"),
            async {
                sleep(Duration::from_millis(100)).await;
                debouncer.settle("ro").await
            },
            async {
                sleep(Duration::from_millis(200)).await;
                debouncer.settle("ros").await
            },
        );

        assert_eq!((a, b, c), (None, None, Some("ros")));
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(600), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(700), "{elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn settled_term_resets_listing() {
        let debouncer = Debouncer::new(Duration::from_millis(400));
        let mut listing = Listing::<crate::domain::Client, _>::new(
            String::new(),
            10,
        )
        .unwrap();
        _ = listing.start();

        if let Some(term) = debouncer.settle("rosa".to_owned()).await {
            listing.reset(term);
        }

        assert_eq!(listing.state(), State::Resetting);
        assert_eq!(listing.filter(), "rosa");
        assert_eq!(listing.start().unwrap().arguments().page(), 1);
    }
}
