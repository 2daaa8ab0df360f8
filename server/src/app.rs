//! Core application

use anyhow::{Context, Result};

use crate::api::ApiServer;
use crate::core::banner;
use crate::core::cli::{self, CliConfig, Commands, FilterCommands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::core::shutdown::ShutdownService;
use crate::domain::filters::{self, FilterClause, HeaderFilterForm};
use crate::utils::terminal::status_mark;

pub struct CoreApp {
    pub shutdown: ShutdownService,
    pub config: AppConfig,
}

impl CoreApp {
    /// Entry point: parse the command line and run the chosen command
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        let (cli_config, command) = cli::parse();
        Self::init_logging(cli_config.debug);

        match command {
            Some(Commands::Filter { command }) => Self::handle_filter_command(command),
            Some(Commands::Start) | None => {
                let app = Self::init(&cli_config)?;
                Self::start_server(app).await
            }
        }
    }

    fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;
        if config.debug && !cli.debug {
            tracing::info!("Debug enabled in config file; start with --debug for verbose logs");
        }
        let shutdown = ShutdownService::new();
        Ok(Self { shutdown, config })
    }

    fn handle_filter_command(cmd: FilterCommands) -> Result<()> {
        match cmd {
            FilterCommands::Validate { expression } => {
                let result = filters::check(&expression);
                println!("{}", status_mark(result.is_ok()));
                result.map_err(anyhow::Error::from)
            }
            FilterCommands::Decode { expression } => {
                let forms: Vec<HeaderFilterForm> = filters::decode_expression(&expression)
                    .into_iter()
                    .map(HeaderFilterForm::from)
                    .collect();
                println!("{}", serde_json::to_string_pretty(&forms)?);
                Ok(())
            }
            FilterCommands::Encode { clauses } => {
                let forms: Vec<HeaderFilterForm> = serde_json::from_str(&clauses)
                    .context("Failed to parse clauses, expected a JSON array of form rows")?;
                let clauses: Vec<FilterClause> =
                    forms.into_iter().map(FilterClause::from).collect();
                println!("{}", filters::encode_expression(&clauses));
                Ok(())
            }
        }
    }

    /// Compact stderr logging; `CITRUS_CONSOLE_LOG` wins over `RUST_LOG`
    fn init_logging(debug: bool) {
        let level = if debug { "debug" } else { "info" };
        let filter = [ENV_LOG, "RUST_LOG"]
            .into_iter()
            .find_map(|var| std::env::var(var).ok())
            .unwrap_or_else(|| format!("info,{}={}", APP_NAME_LOWER, level));

        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    async fn start_server(app: Self) -> Result<()> {
        app.shutdown.install_signal_handlers();
        banner::print_banner(
            &app.config.server.host,
            app.config.server.port,
            app.config.filters.max_clauses,
        );

        let app = ApiServer::new(app).start().await?;
        tracing::debug!(
            signalled = app.shutdown.is_triggered(),
            "Server stopped"
        );
        Ok(())
    }
}
