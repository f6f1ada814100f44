use std::{io, process::ExitCode, sync::OnceLock};

use application::{error::exit_status, page, Args, Config, Context, Service};
use service::{
    infra::{Gateway, Http},
    navigation::{self, Navigator, Route},
    session::{storage, Store},
};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::WARN)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::WARN)
                                >= *meta.level()
                })),
        )
        .init();

    start().await.unwrap_or_else(|code| code)
}

async fn start() -> Result<ExitCode, ExitCode> {
    let Args { config, page } = Args::parse().map_err(|e| {
        // Help and version requests end up here too.
        _ = e.print();
        ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2))
    })?;

    let conf = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
        ExitCode::FAILURE
    })?;

    LOG_LEVEL
        .set(conf.log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let http = Http::new(&conf.api.clone().into()).map_err(|e| {
        log::error!("failed to initialize `Http` client: {e}");
        ExitCode::FAILURE
    })?;

    let session = Store::restore(storage::File::new(
        &conf.storage.dir,
        &conf.storage.key,
    ));
    let navigator = Navigator::new(navigation::guard(Route::Home, &session.get()));
    let service = Service::new(
        conf.service(),
        Gateway::new(http, session.clone(), navigator.clone()),
        session,
        navigator,
    );

    let ctx = Context::new(service);
    match page::show(&ctx, page).await {
        Ok(out) => {
            print!("{out}");
            log::debug!("ended at `{}`", ctx.service().navigator().current());
            // Partially shown pages still report their failure.
            ctx.failure()
                .map_or(Ok(ExitCode::SUCCESS), |kind| {
                    Err(ExitCode::from(exit_status(kind)))
                })
        }
        Err(e) => {
            if let Some(trace) = e.trace() {
                log::debug!("{e}\n{trace}");
            }
            eprintln!("{e}");
            if ctx.service().navigator().current() == Route::Login {
                eprintln!("Sign in with `gasdist login --email .. --password ..`.");
            }
            Err(ExitCode::from(exit_status(ctx.failure().unwrap_or(e.kind))))
        }
    }
}
