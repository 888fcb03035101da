//! scopelog demo
//!
//! Walks a simulated request through nested calls and prints every record
//! through the tracing sink.
//!
//! ```text
//! handle_request ──branch──▶ load_user ──leaf──▶ record
//!        │                        │
//!        │                        └─detach──▶ audit ──release──▶ lineage
//!        │                                                          │
//!        └──────────────────────────────────────── leaf ◀───────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use scopelog::config::loader::load_config;
use scopelog::config::watcher::{apply_updates, ConfigWatcher};
use scopelog::observability::logging::init_logging;
use scopelog::{global, Context, LocalMethod, LogConfig};

#[derive(Parser)]
#[command(name = "scopelog")]
#[command(about = "Context-propagating structured logging demo", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of simulated requests.
    #[arg(short, long, default_value_t = 2)]
    requests: usize,

    /// Keep running and reload the configuration file on change.
    #[arg(short, long)]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LogConfig::default(),
    };
    init_logging(&config.logging);
    global::apply_config(&config)?;

    LocalMethod::Init.log(["main"]).info("scopelog demo starting");

    for _ in 0..cli.requests {
        handle_request(&Context::background());
    }

    if let (true, Some(path)) = (cli.watch, &cli.config) {
        let (watcher, updates) = ConfigWatcher::new(path);
        let _watcher = watcher.run()?;
        tokio::select! {
            _ = apply_updates(updates) => {}
            _ = tokio::signal::ctrl_c() => {}
        }
    }

    LocalMethod::Exit.log(["main"]).info("scopelog demo finished");
    Ok(())
}

fn handle_request(ctx: &Context) {
    let request_id = uuid::Uuid::new_v4().to_string();
    let (log, ctx) = global::builder(ctx)
        .name(["api", "handle_request"])
        .field("request_id", request_id)
        .branch();
    log.info("request received");

    load_user(&ctx, "u-1001");

    let lineage = audit(&ctx);
    global::leaf(&lineage, ["after_audit"]).info("audit lineage carried over");
}

fn load_user(ctx: &Context, user: &str) {
    let log = global::builder(ctx)
        .name(["load_user"])
        .field("user", user)
        .leaf();
    log.debug("loading user");
    log.dev().debug("dev copy of the load_user record");
}

fn audit(ctx: &Context) -> Context {
    let (log, audit_ctx) = global::detach(ctx, ["audit"]);
    let log = log.with_fp_appends(["audit", "write"]);
    log.info("independent audit trace");

    global::leaf(&audit_ctx, ["flush"]).info("audit flushed");
    log.release(ctx)
}
