use clap::{Parser, Subcommand};
use newsdesk_core::backend::http::HttpBackend;
use newsdesk_core::backend::AnalysisBackend;
use newsdesk_core::domain::market::Market;
use newsdesk_core::search::SearchController;
use newsdesk_core::session::{AnalysisSession, Settlement};
use newsdesk_core::view::SessionView;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod render;

#[derive(Debug, Parser)]
#[command(name = "newsdesk", about = "AI stock news analysis from the terminal")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyze news for comma-separated keywords (e.g. "반도체, 2차전지, HBM").
    Analyze {
        #[arg(long)]
        keywords: String,

        /// Uncheck a market (KRX or US). Both are checked by default.
        #[arg(long = "skip", value_name = "MARKET")]
        skip: Vec<Market>,

        /// Forward the analysis to the notification channel after it succeeds.
        #[arg(long)]
        forward: bool,

        /// Print the analysis as JSON instead of the rendered view.
        #[arg(long)]
        json: bool,
    },

    /// Check that the analysis backend is reachable.
    Health,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    let settings = newsdesk_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let res = match args.command {
        Command::Analyze {
            keywords,
            skip,
            forward,
            json,
        } => run_analyze(&settings, keywords, &skip, forward, json).await,
        Command::Health => run_health(&settings).await,
    };

    if let Err(err) = &res {
        sentry_anyhow::capture_anyhow(err);
    }
    res
}

async fn run_analyze(
    settings: &newsdesk_core::config::Settings,
    keywords: String,
    skip: &[Market],
    forward: bool,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let backend = HttpBackend::from_settings(settings)?;
    let origin = backend.origin().clone();
    let mut session = AnalysisSession::new(backend);

    let mut controller = SearchController::new();
    controller.set_keywords(keywords);
    for market in skip {
        controller.set_market(*market, false);
    }

    let request = match controller.submit_current(session.is_loading()) {
        Ok(request) => request,
        Err(err) => {
            println!("{}", render::notice(&err.notice()));
            return Ok(ExitCode::FAILURE);
        }
    };

    let Some(ticket) = session.begin_search(request) else {
        return Ok(ExitCode::FAILURE);
    };
    eprintln!(
        "{}",
        render::loading(&SessionView::new(session.state(), &origin))
    );

    let outcome = tokio::select! {
        outcome = session.backend().analyze(ticket.request()) => Some(outcome),
        _ = shutdown_signal() => None,
    };
    let Some(outcome) = outcome else {
        session.dispose();
        let settled = session.settle_search(ticket, Err(anyhow::anyhow!("interrupted")));
        tracing::warn!(?settled, "interrupted; analysis discarded");
        return Ok(ExitCode::from(130));
    };

    let settled = session.settle_search(ticket, outcome);
    let view = SessionView::new(session.state(), &origin);

    if settled != Settlement::Succeeded {
        println!("{}", render::session(&view));
        return Ok(ExitCode::FAILURE);
    }

    match session.result() {
        Some(result) if json => println!("{}", serde_json::to_string_pretty(result)?),
        _ => println!("{}", render::session(&view)),
    }

    if forward {
        if let Some(notice) = session.forward().await {
            println!("{}", render::notice(&notice));
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn run_health(settings: &newsdesk_core::config::Settings) -> anyhow::Result<ExitCode> {
    let backend = HttpBackend::from_settings(settings)?;
    let message = backend.health().await?;
    tracing::info!(origin = %backend.origin(), "backend reachable");
    println!("{message}");
    Ok(ExitCode::SUCCESS)
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &newsdesk_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
