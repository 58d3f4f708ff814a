use std::{io, process::ExitCode, sync::OnceLock};

use application::{config, report, Args, Config, Service};
use common::DateTime;
use service::{
    command::{reserve_session, ReserveSession, SendText},
    domain::{session, workflow},
    infra::{PayByPhone, Textbelt},
    query, Command,
};
use time::UtcOffset;
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

/// Exit code of a session workflow resolved with a failure.
const WORKFLOW_FAILED: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Must be read while the process is still single-threaded.
    let offset = UtcOffset::current_local_offset();

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
                                .unwrap_or(log::Level::INFO)
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
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    let offset = offset.unwrap_or_else(|e| {
        log::warn!("cannot determine local UTC offset, using UTC: {e}");
        UtcOffset::UTC
    });

    start(offset).await.unwrap_or(ExitCode::FAILURE)
}

async fn start(offset: UtcOffset) -> Result<ExitCode, ()> {
    let Args {
        config: path,
        days,
        start,
        list,
        quota,
    } = Args::parse().unwrap_or_else(|e| e.exit());

    let conf = Config::new(&path).map_err(|e| {
        log::error!("failed to load `Config` from `{path}`: {e}");
    })?;

    LOG_LEVEL
        .set(conf.log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let notify_number = match &conf.textbelt {
        config::Textbelt {
            notify: true,
            number: None,
            ..
        } => {
            log::error!("`textbelt.number` is required to notify");
            return Err(());
        }
        config::Textbelt {
            notify: true,
            number: Some(number),
            ..
        } => Some(number.clone()),
        config::Textbelt { notify: false, .. } => None,
    };

    let textbelt = Textbelt::new((&conf.textbelt).into(), conf.textbelt.key())
        .map_err(|e| {
            log::error!("failed to initialize `Textbelt` client: {e}");
        })?;

    if quota {
        let service = service::Service::new(conf.service(), (), textbelt);
        let remaining = service
            .execute(query::text::Quota::by(()))
            .await
            .map_err(|e| log::error!("failed to get Textbelt quota: {e}"))?;
        println!("Textbelt quota: {remaining}");
        return Ok(ExitCode::SUCCESS);
    }

    let parking = PayByPhone::login(
        conf.paybyphone.api.clone().into(),
        &conf.paybyphone.credentials(),
    )
    .await
    .map_err(|e| log::error!("failed to log in to PayByPhone: {e}"))?;
    let service = Service::new(conf.service(), parking, textbelt);

    let account_id = service
        .execute(query::account::Id::by(()))
        .await
        .map_err(|e| log::error!("failed to resolve parking account: {e}"))?;
    println!("Account ID: {account_id}");

    let tickets = service
        .execute(query::ticket::Current)
        .await
        .map_err(|e| log::error!("failed to list current tickets: {e}"))?;
    println!("{}", report::Tickets::new(&tickets, offset));

    if list {
        return Ok(ExitCode::SUCCESS);
    }

    let reserve_session::Output {
        outcome, tickets, ..
    } = service
        .execute(ReserveSession {
            duration: session::Duration::days(days),
            start_time: start
                .unwrap_or_else(|| DateTime::now().truncate_subsec().coerce()),
        })
        .await
        .map_err(|e| log::error!("failed to reserve parking session: {e}"))?;
    println!("{}", report::Tickets::new(&tickets, offset));

    match outcome {
        workflow::Outcome::Failed { .. } => {
            return Ok(ExitCode::from(WORKFLOW_FAILED));
        }
        workflow::Outcome::Created => {}
    }

    if let Some(number) = notify_number {
        notify(&service, number, conf.textbelt.message).await?;
    }

    Ok(ExitCode::SUCCESS)
}

/// Sends the booking notification and waits for its delivery.
async fn notify(
    service: &Service,
    number: String,
    message: String,
) -> Result<(), ()> {
    let text = Command::execute(
        &service,
        SendText {
            number: number.into(),
            body: message,
        },
    )
    .await
    .map_err(|e| log::error!("failed to send text message: {e}"))?;
    log::info!("text message `{}` sent", text.id());

    let delivery = text
        .wait_until_received()
        .await
        .map_err(|e| log::error!("failed to check text message: {e}"))?;
    if !delivery.received {
        log::warn!(
            "text message not received in time, status was `{}`",
            delivery.status,
        );
    }
    Ok(())
}
