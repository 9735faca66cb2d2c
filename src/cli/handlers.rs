//! One function per command name.
//!
//! Each handler validates its own arguments before touching the backend or the
//! configuration, so a usage error never has side effects.

use super::commands::{Command, HandlerFuture, State};
use crate::db::UserStore;
use crate::error::{AppError, Result};
use crate::models::{CreateUserParams, User};
use colored::*;
use tracing::{info, warn};

/// `register <name>`: creates the user and makes it current.
///
/// The backend row is not rolled back if recording the current user fails afterwards;
/// `login <name>` recovers the session.
pub fn handler_register<S: UserStore>(state: &mut State<S>, cmd: Command) -> HandlerFuture<'_> {
    Box::pin(async move {
        let name = single_arg(&cmd)?;

        let user = state.db.create_user(CreateUserParams::new(name)).await?;

        state
            .config_store
            .set_current_user(&mut state.config, &user.name)
            .map_err(|e| {
                warn!("User {} was created but could not be made current", user.name);
                AppError::CurrentUser(Box::new(e))
            })?;

        println!("{}", "User created successfully:".green());
        print_user(&user);
        Ok(())
    })
}

/// `login <name>`: switches the current user to an existing one.
pub fn handler_login<S: UserStore>(state: &mut State<S>, cmd: Command) -> HandlerFuture<'_> {
    Box::pin(async move {
        let name = single_arg(&cmd)?;

        let user = state
            .db
            .get_user(name)
            .await?
            .ok_or_else(|| AppError::UserNotFound(name.to_string()))?;

        state
            .config_store
            .set_current_user(&mut state.config, &user.name)
            .map_err(|e| AppError::CurrentUser(Box::new(e)))?;

        println!("{}", "User switched successfully!".green());
        Ok(())
    })
}

/// `init-db`: creates the `users` table if needed.
pub fn handler_init_db<S: UserStore>(state: &mut State<S>, cmd: Command) -> HandlerFuture<'_> {
    Box::pin(async move {
        if !cmd.args.is_empty() {
            return Err(AppError::Usage(cmd.name.clone()));
        }

        state.db.init_schema().await?;
        info!("Database schema ready");
        println!("{}", "Database initialized successfully!".green());
        Ok(())
    })
}

/// The sole argument of a `<command> <name>` invocation.
fn single_arg(cmd: &Command) -> Result<&str> {
    match cmd.args.as_slice() {
        [name] => Ok(name),
        _ => Err(AppError::Usage(format!("{} <name>", cmd.name))),
    }
}

fn print_user(user: &User) {
    println!(" * ID:      {}", user.id);
    println!(" * Name:    {}", user.name);
}
