//! Scripted console session against the in-memory backend.
//! $ cargo run --bin console_demo

use watchtower::console::*;
use watchtower::logger::*;
use watchtower::server::*;
use watchtower::settings::*;

async fn show(console: &Console<'_>, user: &str, password: &str, command: Command) {
    println!("\n$ --user {user} {command:?}");
    match console.execute(Some(user), Some(password), command).await {
        Ok(output) => {
            for line in output.lines() {
                println!("  {line}");
            }
        }
        Err(e) => println!("  error: {e}"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let logger = Logger::new_bootstrap();
    logger.reload_from_config(&LogConfig {
        filter: "warn".to_string(),
    })?;

    let settings = Settings {
        log: Log {
            filter: "warn".to_string(),
        },
        storage: Storage {
            backend: "memory".to_string(),
            url: String::new(),
            max_connections: 1,
            bootstrap_admin: Some("root".to_string()),
        },
        credentials: Credentials::default(),
        limits: Limits::default(),
    };
    let server = Server::try_new(&settings).await?;
    if let Backend::Memory(store) = server.backend() {
        store.add_system("vpn", "Remote access gateway").await;
        store.add_system("erp", "Billing and inventory").await;
    }
    let console = Console::new(&server);

    show(&console, "root", "1234", Command::Roles).await;
    show(
        &console,
        "root",
        "1234",
        Command::AddUser {
            name: "ines".to_string(),
            role: "auditor".to_string(),
            credential: Some("audit-pw".to_string()),
        },
    )
    .await;
    show(
        &console,
        "root",
        "1234",
        Command::AddUser {
            name: "leo".to_string(),
            role: "usuario".to_string(),
            credential: None,
        },
    )
    .await;
    show(
        &console,
        "root",
        "1234",
        Command::RecordAccess {
            user_id: 3,
            system_id: 1,
            ip: "10.0.0.7".to_string(),
            failed: true,
        },
    )
    .await;
    show(
        &console,
        "root",
        "1234",
        Command::CreateAlert {
            user_id: 3,
            message: "Repeated failed logins".to_string(),
        },
    )
    .await;
    show(&console, "leo", "1234", Command::MyAlerts { limit: None }).await;
    show(&console, "leo", "1234", Command::Users).await;
    show(&console, "ines", "audit-pw", Command::Block { user_id: 3 }).await;
    show(&console, "root", "1234", Command::Block { user_id: 3 }).await;
    show(&console, "leo", "1234", Command::Login).await;
    show(&console, "ines", "audit-pw", Command::Accesses { limit: None }).await;
    show(&console, "ines", "audit-pw", Command::Audit { limit: None }).await;

    server.shutdown().await;
    Ok(())
}
