//! Terminal output for session events and lists.

use lib_client::{MessageBody, SessionEvent, SessionState, UiMessage};
use lib_client::session::{EMERGENCY_ACTION_LABEL, EMERGENCY_NOTICE, HOSPITALS_ROUTE};
use owo_colors::OwoColorize;
use shared::{ConversationSummary, Hospital, Role};
use std::io::Write as _;

const BAR_CHAR: &str = "▎";

/// Print session events as they arrive until the channel closes.
pub async fn print_events(events: async_channel::Receiver<SessionEvent>) {
    let mut streaming = false;

    while let Ok(event) = events.recv().await {
        match event {
            SessionEvent::Typing(true) => {
                println!("{}", "… thinking".dimmed());
            }
            SessionEvent::Revealed { chunk, .. } => {
                if !streaming {
                    print!("{}🩺 ", BAR_CHAR.bright_cyan());
                    streaming = true;
                }
                print!("{}", chunk.bright_white());
                let _ = std::io::stdout().flush();
            }
            SessionEvent::EmergencyPrompt { .. } => {
                end_line(&mut streaming);
                print_affordance();
            }
            SessionEvent::MessagesChanged => {}
            SessionEvent::Navigate(id) => {
                end_line(&mut streaming);
                println!("{}", format!("(saved as {})", id).dimmed());
            }
            SessionEvent::TurnFailed(error) | SessionEvent::LoadFailed(error) => {
                end_line(&mut streaming);
                println!("{} {}", "error:".bright_red().bold(), error);
            }
            SessionEvent::RefreshSidebar(_) | SessionEvent::Typing(false) | SessionEvent::Reset => {
                end_line(&mut streaming);
            }
        }
    }
}

fn end_line(streaming: &mut bool) {
    if *streaming {
        println!();
        *streaming = false;
    }
}

pub fn print_affordance() {
    let bar = BAR_CHAR.bright_red();
    println!("{bar}⚠️  {}", EMERGENCY_NOTICE.bright_red().bold());
    println!(
        "{bar}   {} {}",
        EMERGENCY_ACTION_LABEL.bright_white().bold(),
        format!("({} or /hospitals <lat> <lon>)", HOSPITALS_ROUTE).dimmed()
    );
}

pub fn print_message(message: &UiMessage) {
    match (&message.body, message.role) {
        (MessageBody::EmergencyAffordance, _) => print_affordance(),
        (MessageBody::Text(text), Role::User) => {
            println!("{}🧑 {}", BAR_CHAR.bright_green(), text);
        }
        (MessageBody::Text(text), Role::Assistant) => {
            println!("{}🩺 {}", BAR_CHAR.bright_cyan(), text.bright_white());
        }
    }
}

pub fn print_transcript(state: &SessionState) {
    if state.messages.is_empty() {
        println!("{}", "(empty conversation)".dimmed());
    }
    for message in &state.messages {
        print_message(message);
    }
}

pub fn print_conversations(items: &[ConversationSummary], active: Option<&str>) {
    if items.is_empty() {
        println!("{}", "(no conversations)".dimmed());
        return;
    }
    for (index, item) in items.iter().enumerate() {
        let marker = if active == Some(item.id.as_str()) { "*" } else { " " };
        println!(
            "{marker}{:>3}. {}  {}",
            index + 1,
            item.title.bold(),
            item.id.dimmed()
        );
    }
}

pub fn print_hospitals(hospitals: &[Hospital]) {
    if hospitals.is_empty() {
        println!("{}", "(no hospitals found)".dimmed());
        return;
    }
    for hospital in hospitals {
        println!(
            "{:>7.1} km  {}  {}",
            hospital.distance_meters / 1000.0,
            hospital.name.bold(),
            hospital.address
        );
        if let Some(phone) = &hospital.phone {
            println!("            {}", phone.dimmed());
        }
    }
}
