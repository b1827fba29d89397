//! `infinistream`: webhook listener and terminal host for the shower widget.

mod cli;
mod error_fmt;
mod logging;
mod present;
mod send;
mod serve;

use clap::Parser;
use cli::{Cli, Commands, JSON_MODE};
use error_fmt::{CliError, exit_code_for_error, format_error_json, humanize};
use infinistream_config::Config;
use infinistream_core::{Presenter, RenderCfg, ReportedMode, WidgetState, render};

fn main() {
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    if let Err(err) = run(cli) {
        tracing::error!(error = %err, "command failed");
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", format_error_json(&err));
        } else {
            eprintln!("{}", humanize(&err));
        }
        std::process::exit(exit_code_for_error(&err));
    }
}

fn run(cli: Cli) -> eyre::Result<()> {
    let _ = color_eyre::install();

    let cfg = infinistream_config::load_file(&cli.config)
        .map_err(|e| CliError::Config(e.to_string()))?;
    cfg.validate()
        .map_err(|e| CliError::Config(e.to_string()))?;
    logging::init_tracing(cli.json, cli.log_level.as_deref(), &cfg.logging)?;
    tracing::debug!(config = %cli.config.display(), "config loaded");

    let render_cfg = RenderCfg::from(&cfg);

    match cli.cmd {
        Commands::Serve { port, bind } => {
            let opts = serve::ServeOpts {
                bind: bind.unwrap_or_else(|| cfg.webhook.bind.clone()),
                port: port.unwrap_or(cfg.webhook.port),
            };
            if opts.port == 0 {
                return Err(CliError::Config("--port must be >= 1".into()).into());
            }
            serve::run_serve(opts, render_cfg, present::stdout_presenter(cli.json))
        }
        Commands::Render { mode, turbidity } => {
            if !(turbidity.is_finite() && turbidity >= 0.0) {
                return Err(CliError::NegativeTurbidity(turbidity).into());
            }
            let state = WidgetState {
                mode: ReportedMode::classify(&mode),
                turbidity,
            };
            let mut presenter = present::stdout_presenter(cli.json);
            presenter.present(&render(&state, &render_cfg));
            Ok(())
        }
        Commands::Send {
            mode,
            turbidity,
            host,
            port,
        } => send::send_update(
            &host,
            port.unwrap_or(cfg.webhook.port),
            mode.into(),
            turbidity,
        ),
        Commands::CheckConfig => {
            print_config(&cfg, cli.json);
            Ok(())
        }
    }
}

fn print_config(cfg: &Config, json: bool) {
    let levels = cfg.display.levels();
    if json {
        let obj = serde_json::json!({
            "turbidity_levels": levels,
            "slow_spinner": cfg.display.slow_spinner,
            "turbidity_icons": cfg.display.turbidity_icons,
            "webhook_bind": cfg.webhook.bind,
            "webhook_port": cfg.webhook.port,
        });
        println!("{obj}");
    } else {
        println!("config ok");
        println!("turbidity_levels = {levels:?}");
        println!("slow_spinner = {}", cfg.display.slow_spinner);
        println!("turbidity_icons = {:?}", cfg.display.turbidity_icons);
        println!("webhook = {}:{}", cfg.webhook.bind, cfg.webhook.port);
    }
}
