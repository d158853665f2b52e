use anyhow::Context;
use roc_weather::{
    AgentOrchestrator, AppState, BridgeClient, ProviderRegistry, RocConfig,
    agent::create_runtime,
    api::routes::{Service, create_router},
    cli::{Cli, Commands, ServeTarget, output::Output},
    utils::toml_config::{LogFormat, ServerConfig},
};
use tokio::{net::TcpListener, task::JoinSet};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    let config = match RocConfig::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            output.error(&format!("Failed to load {}: {}", cli.config.display(), e));
            std::process::exit(1);
        }
    };

    let using_defaults = !cli.config.exists();

    match cli.command() {
        Commands::Config { validate } => {
            if validate {
                if using_defaults {
                    warn_defaults(&output, &cli);
                }
                output.config_summary(&config);
                output.success("Configuration is valid");
            } else {
                print!("{}", toml::to_string_pretty(&config)?);
            }
            Ok(())
        }
        Commands::Serve { target } => {
            init_tracing(&config.server, cli.verbose);
            output.banner();
            if using_defaults {
                warn_defaults(&output, &cli);
            }
            serve(config, target, &output).await
        }
    }
}

fn warn_defaults(output: &Output, cli: &Cli) {
    output.warning(&format!("{} not found, using defaults", cli.config.display()));
}

fn init_tracing(server: &ServerConfig, verbose: bool) {
    let default_level = if verbose {
        "debug"
    } else {
        server.log_level.as_str()
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);
    match server.log_format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

fn port_for(config: &RocConfig, service: Service) -> u16 {
    match service {
        Service::Weather => config.weather.port,
        Service::Bridge => config.bridge.port,
        Service::Frontend => config.frontend.port,
    }
}

async fn serve(config: RocConfig, target: ServeTarget, output: &Output) -> anyhow::Result<()> {
    let services = target.services();
    let registry = ProviderRegistry::from_config(&config.weather)?;
    tracing::info!("Weather sources: {}", registry.ids().join(", "));

    let mut state = AppState::new(&config, registry);

    if services.contains(&Service::Frontend) {
        let runtime = create_runtime(&config.agent).await?;
        output.info(&format!("Agent runtime: {}", runtime.name()));
        let orchestrator = AgentOrchestrator::new(
            runtime,
            BridgeClient::new(config.frontend.bridge_url.clone()),
            config.agent_id()?,
            config.agent_alias_id()?,
        );
        state = state.with_orchestrator(orchestrator);
    }

    let mut servers = JoinSet::new();
    for service in services {
        let addr = format!("{}:{}", config.server.host, port_for(&config, service));
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {} service to {}", service, addr))?;

        let app = create_router(service)
            .with_state(state.clone())
            .layer(TraceLayer::new_for_http())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );

        output.listening(&service.to_string(), &addr);
        tracing::info!("{} service listening on {}", service, addr);

        servers.spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await
                .with_context(|| format!("{} service failed", service))
        });
    }

    output.hint("Press Ctrl+C to stop");

    while let Some(joined) = servers.join_next().await {
        joined??;
    }

    tracing::info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
