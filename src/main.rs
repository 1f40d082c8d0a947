use watchtower::console::*;
use watchtower::logger::*;
use watchtower::server::*;
use watchtower::settings::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command.clone() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let logger = Logger::new_bootstrap();

    let project_settings = parse_settings(cli.settings.as_deref())?;
    debug!(?project_settings);
    logger.reload_from_config(&LogConfig::from(&project_settings.log))?;

    let server = Server::try_new(&project_settings).await?;

    let result = Console::new(&server)
        .execute(cli.user.as_deref(), cli.password.as_deref(), command)
        .await;

    server.shutdown().await;

    let output = result?;
    if cli.json {
        println!("{}", output.to_json()?);
    } else {
        for line in output.lines() {
            println!("{line}");
        }
    }

    Ok(())
}
