use crate::config::{Config, ConfigStore};
use crate::db::{Database, UserStore};
use crate::error::{AppError, Result};
use clap::Parser;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, info};

use super::handlers::{handler_init_db, handler_login, handler_register};

/// CLI tool for the gator aggregator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Command to run (register, login, init-db)
    pub command: Option<String>,

    /// Arguments passed to the command
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// Splits the parsed arguments into a [`Command`].
    ///
    /// # Errors
    ///
    /// Returns `AppError::Usage` if no command name was given.
    pub fn into_command(self) -> Result<Command> {
        match self.command {
            Some(name) if !name.is_empty() => Ok(Command::new(name, self.args)),
            _ => Err(AppError::Usage("gator <command> [args...]".to_string())),
        }
    }
}

/// One parsed invocation: a command name and its positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub args: Vec<String>,
}

impl Command {
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// Everything a handler may touch during one invocation.
pub struct State<S> {
    /// In-memory copy of the configuration file.
    pub config: Config,
    /// Where `config` was loaded from; mutations are written back here.
    pub config_store: ConfigStore,
    /// Persistence backend.
    pub db: S,
}

/// Future returned by a [`Handler`], borrowing the state for its whole run.
pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + 'a>>;

/// A command implementation.
pub type Handler<S> = for<'a> fn(&'a mut State<S>, Command) -> HandlerFuture<'a>;

/// Flat name-to-handler table.
pub struct Commands<S> {
    registered: HashMap<String, Handler<S>>,
}

impl<S> Commands<S> {
    pub fn new() -> Self {
        Self {
            registered: HashMap::new(),
        }
    }

    /// Binds `name` to `handler`, replacing any earlier binding.
    pub fn register(&mut self, name: impl Into<String>, handler: Handler<S>) {
        let name = name.into();
        debug!("Registering command {}", name);
        self.registered.insert(name, handler);
    }

    /// Runs the handler bound to `cmd.name`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::CommandNotFound` without touching `state` if nothing is bound
    /// to the name; otherwise whatever the handler returns.
    pub async fn run(&self, state: &mut State<S>, cmd: Command) -> Result<()> {
        let handler = *self
            .registered
            .get(&cmd.name)
            .ok_or_else(|| AppError::CommandNotFound(cmd.name.clone()))?;

        handler(state, cmd).await
    }
}

impl<S> Default for Commands<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the registry with every command this binary understands.
pub fn registry<S: UserStore>() -> Commands<S> {
    let mut cmds = Commands::new();
    cmds.register("register", handler_register::<S>);
    cmds.register("login", handler_login::<S>);
    cmds.register("init-db", handler_init_db::<S>);
    cmds
}

/// CLI application: the loaded state plus the command table.
pub struct App<S> {
    state: State<S>,
    commands: Commands<S>,
}

impl App<Database> {
    /// Loads `~/.gatorconfig.json` and prepares the database pool it points at.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ConfigUnavailable` if the configuration cannot be loaded and
    /// `AppError::Persistence` if its `db_url` is not a usable connection string.
    pub fn new() -> Result<Self> {
        let config_store = ConfigStore::from_home()?;
        let config = config_store.load()?;
        info!("Loaded config from {}", config_store.path().display());

        let db = Database::new(&config.db_url)?;

        Ok(Self::with_state(State {
            config,
            config_store,
            db,
        }))
    }
}

impl<S: UserStore> App<S> {
    pub fn with_state(state: State<S>) -> Self {
        Self {
            state,
            commands: registry(),
        }
    }

    /// Run a single command to completion.
    pub async fn run(&mut self, cmd: Command) -> Result<()> {
        info!("Running command {} with {} argument(s)", cmd.name, cmd.args.len());
        self.commands.run(&mut self.state, cmd).await
    }

    #[cfg(test)]
    pub fn state(&self) -> &State<S> {
        &self.state
    }
}
