use clap::Parser;

use snaplink::cli::{Cli, Commands};
use snaplink::config::{StaticConfig, get_config, init_config_from};
use snaplink::runtime;
use snaplink::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if cli.command == Some(Commands::GenerateConfig) {
        println!("{}", StaticConfig::generate_sample_config());
        return Ok(());
    }

    init_config_from(&cli.config);
    let config = get_config();

    // guard 必须存活到进程结束
    let _log_guard = init_logging(&config.logging)?;

    runtime::run_server().await
}
