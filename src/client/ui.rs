use crate::session::{ResultsView, View};
use crate::status::{DismissTrigger, StatusKind, StatusLine};

/// A parsed line of visitor input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search(String),
    /// Zero-based result position.
    Select(usize),
    /// Zero-based party member position.
    Toggle(usize),
    SetAttending(usize, bool),
    Submit,
    Status,
    Reload,
    Help,
    Quit,
    Dismiss(DismissTrigger),
}

pub struct UserInterface {
    name: String,
}

impl Default for UserInterface {
    fn default() -> Self {
        Self::new()
    }
}

impl UserInterface {
    pub fn new() -> Self {
        Self {
            name: "RSVP".to_string(),
        }
    }

    pub fn show_prompt(&self, view: &View) -> String {
        if view.acknowledgment_visible {
            format!("{} [OK]> ", self.name)
        } else if !view.party.is_empty() {
            format!("{} [{}]> ", self.name, view.query)
        } else {
            format!("{}> ", self.name)
        }
    }

    pub fn show_welcome(&self) {
        println!("💍 Wedding RSVP");
        println!("===============");
        println!("Type your name to search, then '/select <n>' to pick yourself.");
        println!("Type '/help' for help, '/quit' to exit");
        println!();
    }

    pub fn show_help(&self) {
        println!("📋 Commands:");
        println!("  <name>, /search <name>  - Search the guest list");
        println!("  /select <n>, <n>        - Select result number n");
        println!("  /toggle <n>             - Flip attendance of party member n");
        println!("  /yes <n>, /no <n>       - Set attendance of party member n");
        println!("  /submit                 - Send your confirmation");
        println!("  /status                 - Show the current page again");
        println!("  /reload                 - Load the guest list again");
        println!("  /help, /h               - Show this help");
        println!("  /quit, /q               - Exit");
    }

    pub fn show_status(&self, status: &StatusLine) {
        if status.is_empty() {
            return;
        }

        let time = status
            .updated_at()
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_default();

        match status.kind() {
            StatusKind::Info => println!("ℹ️  [{}] {}", time, status.message()),
            StatusKind::Success => println!("✅ [{}] {}", time, status.message()),
            StatusKind::Error => println!("❌ [{}] {}", time, status.message()),
        }
    }

    pub fn render(&self, view: &View) {
        match &view.results {
            ResultsView::Hidden => {}
            ResultsView::Hint(hint) => println!("🔎 {}", hint),
            ResultsView::Names(names) => {
                println!("🔎 Results:");
                for (i, name) in names.iter().enumerate() {
                    println!("  {}. {}", i + 1, name);
                }
            }
        }

        if !view.party.is_empty() {
            println!("👥 Your party:");
            for (i, member) in view.party.iter().enumerate() {
                let mark = if member.attending { "x" } else { " " };
                println!("  {}. [{}] {}", i + 1, mark, member.name);
            }
            if view.submit_enabled {
                println!("  Type /submit to confirm.");
            }
        }

        if view.acknowledgment_visible {
            println!();
            println!("🎉 Thank you! Your confirmation was received.");
            println!("   Press Enter to continue.");
        }
    }

    /// Parses one input line. `acknowledging` is true while the success
    /// acknowledgment is on screen, where input only dismisses it.
    pub fn parse_command(&self, input: &str, acknowledging: bool) -> Option<Command> {
        let input = input.trim();

        if acknowledging {
            return Some(Command::Dismiss(match input {
                "" => DismissTrigger::Control,
                "/esc" => DismissTrigger::Escape,
                _ => DismissTrigger::Click {
                    inside_content: false,
                },
            }));
        }

        if input.is_empty() {
            return None;
        }

        match input {
            "/help" | "/h" => return Some(Command::Help),
            "/quit" | "/q" => return Some(Command::Quit),
            "/submit" => return Some(Command::Submit),
            "/status" => return Some(Command::Status),
            "/reload" => return Some(Command::Reload),
            _ => {}
        }

        if let Ok(n) = input.parse::<usize>() {
            return self.position(n, "<n>").map(Command::Select);
        }

        let (command, argument) = input.split_once(' ').unwrap_or((input, ""));
        let argument = argument.trim();

        match command {
            "/search" => Some(Command::Search(argument.to_string())),
            "/select" => self.parse_position(argument, "/select").map(Command::Select),
            "/toggle" => self.parse_position(argument, "/toggle").map(Command::Toggle),
            "/yes" => self
                .parse_position(argument, "/yes")
                .map(|i| Command::SetAttending(i, true)),
            "/no" => self
                .parse_position(argument, "/no")
                .map(|i| Command::SetAttending(i, false)),
            _ if command.starts_with('/') => {
                println!("❌ Unknown command '{}'. Type /help for available commands", command);
                None
            }
            _ => Some(Command::Search(input.to_string())),
        }
    }

    fn parse_position(&self, argument: &str, usage: &str) -> Option<usize> {
        match argument.parse::<usize>() {
            Ok(n) => self.position(n, usage),
            Err(_) => {
                println!("❌ Usage: {} <n>", usage);
                None
            }
        }
    }

    fn position(&self, n: usize, usage: &str) -> Option<usize> {
        if n == 0 {
            println!("❌ Usage: {} <n> (numbers start at 1)", usage);
            None
        } else {
            Some(n - 1)
        }
    }
}
