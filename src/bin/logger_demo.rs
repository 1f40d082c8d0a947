use watchtower::logger::*;

fn main() -> anyhow::Result<()> {
    let logger = Logger::new_bootstrap();
    trace!("bootstrap trace log");
    debug!("bootstrap debug log");
    info!("bootstrap info log");

    let config = LogConfig {
        filter: "debug,sqlx=warn".to_string(),
    };
    logger.reload_from_config(&config)?;
    trace!("application trace log");
    debug!("application debug log");
    info!("application info log");

    let bad = LogConfig {
        filter: "=[".to_string(),
    };
    if let Err(e) = logger.reload_from_config(&bad) {
        warn!(error = %e, "invalid filter rejected, previous filter kept");
    }
    debug!("still at debug");

    Ok(())
}
