use std::io::{self, Write};

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::backend::GuestBackend;
use crate::client::ui::{Command, UserInterface};
use crate::session::Session;
use crate::status::Navigation;

/// What the input loop does after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Continue,
    Navigate(Navigation),
    Quit,
}

/// Terminal front-end driving one [`Session`] against a backend.
pub struct RsvpClient<B> {
    backend: B,
    redirect: String,
    session: Session,
    ui: UserInterface,
}

impl<B: GuestBackend> RsvpClient<B> {
    pub fn new(backend: B, redirect: impl Into<String>) -> Self {
        let redirect = redirect.into();
        Self {
            backend,
            session: Session::new(redirect.clone()),
            redirect,
            ui: UserInterface::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Starts a fresh session and loads the guest list.
    pub async fn start(&mut self) {
        self.session = Session::new(self.redirect.clone());
        self.session.load(&self.backend).await;
        self.show();
    }

    pub async fn run(&mut self) -> io::Result<Option<Navigation>> {
        self.ui.show_welcome();
        self.start().await;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            print!("{}", self.ui.show_prompt(&self.session.view()));
            io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            let acknowledging = self.session.acknowledgment().is_visible();
            let Some(command) = self.ui.parse_command(&line, acknowledging) else {
                continue;
            };

            match self.handle(command).await {
                Flow::Continue => {}
                Flow::Navigate(navigation) => {
                    println!("➡️  Redirecting to {}", navigation.destination);
                    return Ok(Some(navigation));
                }
                Flow::Quit => break,
            }
        }

        println!("👋 Goodbye!");
        Ok(None)
    }

    pub async fn handle(&mut self, command: Command) -> Flow {
        match command {
            Command::Search(query) => {
                self.session.search(&query);
                self.show();
            }
            Command::Select(position) => match self.session.select(position) {
                Ok(_) => self.show(),
                Err(_) => self.ui.show_status(self.session.status()),
            },
            Command::Toggle(index) => {
                if self.session.toggle(index).is_none() {
                    println!("❌ No party member {}", index + 1);
                }
                self.show();
            }
            Command::SetAttending(index, attending) => {
                if !self.session.set_attending(index, attending) {
                    println!("❌ No party member {}", index + 1);
                }
                self.show();
            }
            Command::Submit => {
                if let Some(payload) = self.session.begin_submit() {
                    self.ui.show_status(self.session.status());
                    let result = self.backend.send_confirmation(&payload).await;
                    self.session.finish_submit(result);
                }
                self.show();
            }
            Command::Dismiss(trigger) => {
                if let Some(navigation) = self.session.dismiss(trigger) {
                    info!("Acknowledgment dismissed with {trigger:?}");
                    return Flow::Navigate(navigation);
                }
            }
            Command::Status => self.show(),
            Command::Reload => self.start().await,
            Command::Help => self.ui.show_help(),
            Command::Quit => return Flow::Quit,
        }

        Flow::Continue
    }

    fn show(&self) {
        self.ui.show_status(self.session.status());
        self.ui.render(&self.session.view());
    }
}
