mod config;
mod dtos;
mod error;
mod handler;
mod mail;
mod models;
mod routes;
mod service;

use std::sync::Arc;

use config::Config;
use dotenv::dotenv;
use mail::sendmail::{MailTransport, SmtpMailer};
use routes::create_router;
use service::{content_service::ContentService, eoi_service::EoiService};
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;

#[derive(Clone)]
pub struct AppState {
    pub env: Config,
    pub eoi_service: Arc<EoiService>,
    pub content_service: Arc<ContentService>,
}

impl AppState {
    pub fn new(
        config: Config,
        transport: Arc<dyn MailTransport>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let eoi_service = Arc::new(EoiService::new(&config, transport)?);
        let content_service = Arc::new(ContentService::new(&config.cms_url)?);

        Ok(Self {
            env: config,
            eoi_service,
            content_service,
        })
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .init();

    dotenv().ok();

    let config = Config::init();

    let mailer = match SmtpMailer::from_config(&config) {
        Ok(mailer) => mailer,
        Err(err) => {
            error!("🔥 Failed to configure the SMTP transport: {}", err);
            std::process::exit(1);
        }
    };

    let app_state = match AppState::new(config.clone(), Arc::new(mailer)) {
        Ok(state) => state,
        Err(err) => {
            error!("🔥 Failed to build application state: {}", err);
            std::process::exit(1);
        }
    };

    info!(
        "EOI submissions go to {} recipient(s) via {}:{}",
        app_state.eoi_service.recipients().len(),
        config.smtp_host,
        config.smtp_port
    );

    let app = create_router(Arc::new(app_state));

    info!("🚀 Server is running on http://localhost:{}", config.port);

    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("🔥 Failed to bind port {}: {}", config.port, err);
            std::process::exit(1);
        }
    };

    if let Err(err) = axum::serve(listener, app).await {
        error!("Server error: {}", err);
    }
}
