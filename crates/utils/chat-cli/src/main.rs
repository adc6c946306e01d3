//! # Chat CLI
//!
//! Terminal front-end for the First-Aid Assistant. Drives a [`ChatSession`] and a
//! [`ConversationList`] against a running gateway and renders the simulated
//! stream to stdout.
//!
//! ```bash
//! cargo run --package chat-cli --bin chat_cli -- --user alice
//! ```

#[macro_use]
extern crate tracing;

mod command;
mod input;
mod render;

use anyhow::Context;
use clap::Parser;
use command::{Command, HELP};
use input::Input;
use lib_client::{
    ApiClient, ChatBackend, ChatSession, ClientConfig, ClientError, ConversationList, Identity,
    RefreshToken, SessionConfig,
};
use owo_colors::OwoColorize;
use shared::HospitalSearchRequest;
use std::sync::Arc;
use tokio::io::AsyncBufRead;

#[derive(Parser)]
#[command(name = "chat_cli")]
#[command(about = "First-Aid Assistant terminal client", long_about = None)]
struct Cli {
    /// Username or email to sign in with; omit to browse anonymously
    #[arg(long)]
    user: Option<String>,

    /// Create the account first, using this email
    #[arg(long, requires = "user")]
    signup_email: Option<String>,

    /// Gateway origin (overrides FIRST_AID_API_URL)
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.api_url {
        config.base_url = url.trim_end_matches('/').to_string();
    }
    let api = Arc::new(ApiClient::new(&config)?);
    let mut input = Input::stdin();

    let identity = match cli.user {
        Some(user) => Some(sign_in(&api, &mut input, user, cli.signup_email).await?),
        None => {
            println!("{}", "Browsing anonymously: sign in with --user to chat.".dimmed());
            None
        }
    };

    let refresh = RefreshToken::new();
    let (session, events) = ChatSession::new(
        api.clone(),
        identity.clone(),
        SessionConfig::default(),
        refresh.clone(),
    );
    let sidebar = ConversationList::new(api.clone(), identity.clone(), refresh.clone())
        .with_observer(Arc::new(session.clone()));
    tokio::spawn(render::print_events(events));

    println!("{}", "First-Aid Assistant. Not a substitute for emergency services.".bold());
    println!("{}", "Type /help for commands.".dimmed());

    loop {
        let Some(line) = input.prompt("> ").await else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match command::parse(&line) {
            Ok(command) => command,
            Err(usage) => {
                println!("{}", usage.yellow());
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{}", HELP),
            Command::Send(text) => match session.send(&text).await {
                Ok(report) => {
                    session.wait_reveal().await;
                    if report.created {
                        if let Some(identity) = &identity {
                            spawn_title(
                                api.clone(),
                                identity.clone(),
                                refresh.clone(),
                                report.conversation_id,
                                text,
                            );
                        }
                    }
                }
                Err(ClientError::Busy) => println!("{}", "Still waiting for the last reply.".yellow()),
                // Turn failures are printed from the event stream
                Err(err) => debug!(error = %err, "send failed"),
            },
            Command::New => {
                session.load(None).await?;
                println!("{}", "New chat.".dimmed());
            }
            Command::List => match sidebar.list().await {
                Ok(items) => render::print_conversations(&items, session.active_id().as_deref()),
                Err(err) => print_error(&err),
            },
            Command::Open(target) => {
                let id = resolve(&sidebar, &target);
                match session.load(Some(&id)).await {
                    Ok(()) if session.active_id().as_deref() == Some(id.as_str()) => {
                        render::print_transcript(&session.state());
                    }
                    Ok(()) => println!("{}", "Could not open that conversation; started a new chat.".yellow()),
                    Err(err) => print_error(&err),
                }
            }
            Command::Rename { target, title } => {
                let id = resolve(&sidebar, &target);
                match sidebar.rename(&id, &title).await {
                    Ok(updated) => println!("Renamed to {}", updated.title.bold()),
                    Err(err) => print_error(&err),
                }
            }
            Command::Delete(target) => {
                let id = resolve(&sidebar, &target);
                let prompt = &mut input;
                let confirm = move |title: String| async move {
                    prompt.confirm(&format!("Delete \"{}\"? [y/N]: ", title)).await
                };

                match sidebar.delete(&id, confirm).await {
                    Ok(true) => println!("Deleted."),
                    Ok(false) => println!("{}", "Kept.".dimmed()),
                    Err(err) => print_error(&err),
                }
            }
            Command::Hospitals {
                latitude,
                longitude,
                search_term,
            } => {
                let request = HospitalSearchRequest {
                    latitude: Some(latitude),
                    longitude: Some(longitude),
                    search_term,
                };
                match api.find_hospitals(&request).await {
                    Ok(hospitals) => render::print_hospitals(&hospitals),
                    Err(err) => print_error(&err),
                }
            }
        }

        if let Err(err) = sidebar.refresh_if_stale().await {
            debug!(error = %err, "sidebar refresh failed");
        }
    }

    Ok(())
}

async fn sign_in<R: AsyncBufRead + Unpin>(
    api: &ApiClient,
    input: &mut Input<R>,
    user: String,
    signup_email: Option<String>,
) -> anyhow::Result<Identity> {
    let password = input
        .prompt(&format!("Password for {}: ", user))
        .await
        .context("no password given")?
        .trim()
        .to_string();

    let auth = match signup_email {
        Some(email) => api.signup(user, email, password).await?,
        None => api.login(user, password).await?,
    };

    println!("Signed in as {}.", auth.user.username.bold());
    Ok(Identity::from(&auth))
}

/// `#` indexes into the last listed conversations; anything else is an id.
fn resolve(sidebar: &ConversationList, target: &str) -> String {
    target
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| sidebar.items().get(i).map(|c| c.id.clone()))
        .unwrap_or_else(|| target.to_string())
}

/// Ask the AI for a better title for a freshly created conversation.
fn spawn_title(
    api: Arc<ApiClient>,
    identity: Identity,
    refresh: RefreshToken,
    conversation_id: String,
    message: String,
) {
    tokio::spawn(async move {
        match api.generate_title(&identity, &conversation_id, &message).await {
            Ok(response) => {
                debug!(title = %response.title, "conversation retitled");
                refresh.bump();
            }
            Err(err) => warn!(error = %err, "title generation failed"),
        }
    });
}

fn print_error(err: &ClientError) {
    println!("{} {}", "error:".bright_red().bold(), err);
}
