mod commands;
mod terminal;

use commands::{CommandLine, roast};
use roast_common::config::ScanConfig;
use terminal::{print, spinner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    spinner::init_logging();

    let cfg: ScanConfig = commands.to_config();
    print::banner(commands.no_banner, commands.quiet);

    roast::roast(
        &commands.dc,
        commands.rids,
        commands.output.as_deref(),
        &cfg,
        commands.quiet,
    )
    .await
}
