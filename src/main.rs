use std::io;
use std::sync::Arc;

use eyre::Result;
use ragchat::app::services::{ActionService, EventService};
use ragchat::backend::new_backend;
use ragchat::client::ChatClient;
use ragchat::config::{Configuration, init_logger, init_theme, verbose};
use ragchat::models::Action;
use ragchat::{
    app::{App, destruct_terminal_for_panic},
    cli::Command,
};
use tokio::{sync::mpsc, task};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Command::new();
    if cmd.version() {
        cmd.print_version();
        return Ok(());
    }

    std::panic::set_hook(Box::new(|panic_info| {
        destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let config = cmd.get_config()?;
    init_logger(&config.log)?;
    Configuration::init(config)?;
    let config = Configuration::instance();
    verbose!("[+] Logger initialized");

    let theme = init_theme(&config.theme)?;
    verbose!("[+] Theme initialized");

    verbose!("[+] Connecting to {}...", config.backend.endpoint);
    let backend = new_backend(&config.backend)?;

    let token = CancellationToken::new();
    let mut client =
        ChatClient::from_config(Arc::clone(&backend), config).with_cancel_token(token.clone());

    if cmd.is_one_shot() {
        return cmd.run_one_shot(&mut client, &mut io::stdout()).await;
    }

    let (action_tx, action_rx) = mpsc::unbounded_channel::<Action>();
    let mut events = EventService::default();

    let mut task_set = task::JoinSet::new();
    let mut action_service = ActionService::new(
        backend,
        action_rx,
        Arc::new(events.event_tx()),
        token.clone(),
        config.backend.timeout(),
    );
    task_set.spawn(async move { action_service.run().await });

    let mut app = App::new(theme, client, action_tx, &mut events, token.clone());
    if let Err(err) = app.run().await {
        eprintln!("Error: {}", err);
    }

    token.cancel();
    while let Some(res) = task_set.join_next().await {
        match res {
            Ok(Err(err)) => log::error!("Action service error: {}", err),
            Err(err) => log::error!("Task error: {}", err),
            Ok(Ok(())) => {}
        }
    }

    Ok(())
}
