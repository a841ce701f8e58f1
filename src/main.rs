use clap::Parser;
use colored::Colorize;

use ipinfo::cli::{Cli, Commands, generate_config};
use ipinfo::config::{StaticConfig, init_config};
use ipinfo::runtime::modes::run_server;
use ipinfo::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::GenerateConfig { output, force }) = &cli.command {
        match generate_config(output.as_deref(), *force) {
            Ok(Some(sample)) => print!("{}", sample),
            Ok(None) => println!(
                "{} Configuration written to {}",
                "✓".green(),
                output.as_deref().unwrap_or_default()
            ),
            Err(e) => {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    // 配置优先级：命令行 > ENV > 配置文件 > 默认值
    let mut config = StaticConfig::load(cli.config.as_deref());
    cli.apply_overrides(&mut config);
    let logging = config.logging.clone();
    init_config(config);

    // guard 需要存活到进程结束
    let _log_guard = init_logging(&logging)?;

    run_server().await
}
