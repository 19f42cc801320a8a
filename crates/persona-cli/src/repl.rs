//! Line-oriented driver for one conversation session.

use std::sync::Arc;

use persona_ai::{group_models, ApiClient, ConversationSession};
use persona_common::PersonaError;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::commands::{self, Command, HELP};
use crate::render;

pub struct Repl {
    client: Arc<ApiClient>,
    session: Arc<ConversationSession>,
}

enum Flow {
    Continue,
    Quit,
}

impl Repl {
    pub fn new(client: Arc<ApiClient>, session: Arc<ConversationSession>) -> Self {
        Self { client, session }
    }

    /// Read stdin until EOF or `/quit`.
    pub async fn run(&self) -> Result<(), PersonaError> {
        println!("Connected to {}. Type /help for commands.", self.client.config().base_url);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        while let Some(line) = lines.next_line().await? {
            let command = match commands::parse(&line) {
                Ok(command) => command,
                Err(e) => {
                    println!("[error] {e}");
                    continue;
                }
            };
            match self.execute(command).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => println!("[error] {e}"),
            }
        }

        info!(session = %self.session.id(), "leaving");
        Ok(())
    }

    async fn execute(&self, command: Command) -> persona_common::Result<Flow> {
        match command {
            Command::Say(text) => {
                // Outcome and failures reach the user through the event renderer.
                if let Err(e) = self.session.submit_turn(&text).await {
                    debug!("turn not completed: {e}");
                }
            }
            Command::Attach(path) => {
                // Rejections are rendered from the event stream too.
                if let Err(e) = self.session.attach_file(&path).await {
                    debug!("attachment not staged: {e}");
                }
            }
            Command::Detach => {
                if self.session.clear_attachment() {
                    println!("[attachment removed]");
                } else {
                    println!("(no file attached)");
                }
            }
            Command::Clear => self.session.clear_history(),
            Command::History => print_lines(render::format_history(&self.session.history())),
            Command::Instructions => {
                let instructions = self.client.list_instructions().await?;
                print_lines(render::format_instructions(&instructions));
            }
            Command::Teach(text) => {
                let added = self.client.add_instruction(&text).await?;
                println!("[instruction {} added]", added.id);
            }
            Command::Memory => {
                let facts = self.client.list_memory().await?;
                print_lines(render::format_memory(&facts));
            }
            Command::Remember(text) => {
                let fact = self.client.add_memory(&text).await?;
                println!("[fact {} remembered]", fact.id);
            }
            Command::Forget(id) => {
                self.client.delete_memory(id).await?;
                println!("[fact {id} forgotten]");
            }
            Command::Model(None) => {
                println!("Current model: {}", self.client.current_model().await?);
            }
            Command::Model(Some(id)) => {
                let model = self.client.set_model(&id).await?;
                println!("Model set to {model}");
            }
            Command::Models(search) => {
                let models = self.client.list_models().await?;
                let current = self.client.current_model().await.ok();
                let groups = group_models(&models, search.as_deref().unwrap_or(""));
                print_lines(render::format_model_groups(&groups, current.as_deref()));
            }
            Command::Key(key) => {
                let message = self
                    .client
                    .save_api_key(key.as_deref().unwrap_or(""))
                    .await?;
                println!("{message}");
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}
