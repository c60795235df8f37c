use clap::{Parser, Subcommand};
use color_eyre::Result;
use serde::Serialize;
use std::path::PathBuf;

use notevault::{logging, shared, Config, Note, NoteService, User};

#[derive(Parser, Debug)]
#[command(name = "notevault")]
#[command(about = "Command-line client for the NoteVault notes API")]
#[command(version)]
struct Args {
  /// Path to config file (default: ./notevault.yaml or $XDG_CONFIG_HOME/notevault/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Base URL of the API (overrides config and NOTEVAULT_API_BASE_URL)
  #[arg(long)]
  base_url: Option<String>,

  /// Verbosity level (-v, -vv, -vvv)
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Log in with a username and password
  Login { username: String, password: String },
  /// Register a new user
  Register { username: String, password: String },
  /// Create a note
  Create {
    #[arg(long)]
    user: u64,
    #[arg(long)]
    title: String,
    #[arg(long, default_value = "")]
    content: String,
  },
  /// List a user's notes
  List {
    #[arg(long)]
    user: u64,
    /// List this many times; repeats are served from the cache
    #[arg(long, default_value_t = 1)]
    repeat: u32,
  },
  /// Update an existing note
  Update {
    #[arg(long)]
    id: u64,
    #[arg(long)]
    user: u64,
    #[arg(long)]
    title: String,
    #[arg(long, default_value = "")]
    content: String,
  },
  /// Delete a note
  Delete {
    #[arg(long)]
    id: u64,
    /// Owner of the note, whose cached list is dropped
    #[arg(long)]
    user: u64,
  },
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();
  let _guard = logging::init(args.verbose)?;

  let config = Config::load(args.config.as_deref())?.with_base_url(args.base_url)?;
  let service = shared::install(NoteService::from_config(&config)?);

  run(service, args.command).await
}

async fn run(service: &NoteService, command: Command) -> Result<()> {
  match command {
    Command::Login { username, password } => {
      print_json(&service.login(&User::new(username, password)).await?)
    }
    Command::Register { username, password } => {
      print_json(&service.register(&User::new(username, password)).await?)
    }
    Command::Create {
      user,
      title,
      content,
    } => print_json(&service.create_note(&Note::new(title, content, user)).await?),
    Command::List { user, repeat } => {
      for _ in 0..repeat.max(1) {
        let result = service.list_notes_with_source(user).await?;
        tracing::info!("Listed notes for user {} ({:?})", user, result.source);
        print_json(&result.data)?;
      }
      Ok(())
    }
    Command::Update {
      id,
      user,
      title,
      content,
    } => {
      let note = Note::new(title, content, user).with_id(id);
      print_json(&service.update_note(&note).await?)
    }
    Command::Delete { id, user } => print_json(&service.delete_note(Some(id), user).await?),
  }
}

fn print_json(value: &impl Serialize) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}
