use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use error_stack::{Report, ResultExt};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use application::service::CatalogService;
use kernel::KernelError;

use crate::error::StackTrace;
use crate::handler::{AppModule, CatalogHandler};
use crate::route::{AdminRouter, AuthRouter, CourseRouter, UserRouter};

mod catalog;
mod controller;
mod error;
mod extract;
mod handler;
mod request;
mod response;
mod route;

static PORT: &str = "PORT";
const DEFAULT_PORT: u16 = 8080;

fn port() -> error_stack::Result<u16, KernelError> {
    match dotenvy::var(PORT) {
        Ok(port) => port
            .parse::<u16>()
            .map_err(Report::from)
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| format!("Malformed `{PORT}`: {port}")),
        Err(_) => Ok(DEFAULT_PORT),
    }
}

#[derive(Debug, Parser)]
#[command(name = "server", about = "Course registration backend", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the HTTP API. The default when no command is given.
    Serve,
    /// Import courses from a catalog CSV file.
    SeedCourses {
        #[arg(value_name = "path", default_value = "./data/coursedata.csv")]
        path: PathBuf,
    },
    /// Delete every course.
    ClearCourses,
}

#[tokio::main]
async fn main() -> Result<(), StackTrace> {
    let cli = Cli::parse();
    let appender = tracing_appender::rolling::daily(std::path::Path::new("./logs/"), "debug.log");
    let (non_blocking_appender, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_filter(tracing_subscriber::EnvFilter::new(
                    std::env::var("RUST_LOG").unwrap_or_else(|_| {
                        "driver=debug,server=debug,application=debug,tower_http=debug,sqlx=info"
                            .into()
                    }),
                ))
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_writer(non_blocking_appender)
                .with_ansi(false)
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .init();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await?,
        Command::SeedCourses { path } => seed_courses(path).await?,
        Command::ClearCourses => {
            let removed = CatalogHandler::init().await?.clear_courses().await?;
            tracing::info!("removed {removed} courses");
        }
    }
    Ok(())
}

async fn seed_courses(path: PathBuf) -> error_stack::Result<(), KernelError> {
    let file = std::fs::File::open(&path)
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| format!("Failed to open {}", path.display()))?;
    let entries = catalog::read_catalog(std::io::BufReader::new(file))?;
    let imported = CatalogHandler::init().await?.import_courses(entries).await?;
    tracing::info!("imported {imported} courses from {}", path.display());
    Ok(())
}

async fn serve() -> error_stack::Result<(), KernelError> {
    let app = AppModule::new().await?;

    let router = axum::Router::new()
        .route_auth()
        .route_course()
        .route_user()
        .route_admin()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app);

    let bind = SocketAddr::from(([0, 0, 0, 0], port()?));
    let tcp = TcpListener::bind(bind)
        .await
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| "Failed to listen tcp")?;
    tracing::info!("listening on {bind}");

    axum::serve(tcp, router.into_make_service())
        .await
        .change_context_lazy(|| KernelError::Internal)?;

    Ok(())
}
