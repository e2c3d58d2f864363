//! Command-line front end for Life Gacha.
//!
//! # Responsibility
//! - Parse one user action, run it through `GameSession`, print the result.
//! - Resolve store and logging settings from flags and environment.
//!
//! # Invariants
//! - Each invocation performs at most one state-changing action.
//! - Rejections print a user-facing message and exit with status 1.

mod render;

use clap::{Parser, Subcommand};
use lifegacha_core::db::{open_db, DbError};
use lifegacha_core::{
    default_log_level, init_logging, Gacha, GachaConfigError, GameSession, NewTaskRequest,
    SessionError, SqliteStateRepository, Task,
};
use log::error;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const DEFAULT_DB_FILE_NAME: &str = "lifegacha.sqlite3";

/// Habit tracker with a gacha reward loop.
#[derive(Parser, Debug)]
#[command(name = "lifegacha", version)]
struct Cli {
    /// Store file holding the saved game.
    #[arg(long, env = "LIFEGACHA_DB", default_value = DEFAULT_DB_FILE_NAME)]
    db: PathBuf,

    /// Directory for rolling log files; logging is off when unset.
    #[arg(long, env = "LIFEGACHA_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "LIFEGACHA_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the save file with a fresh game if none exists.
    Init,
    /// Show player, tasks and collection.
    Show {
        /// Print the normalized save document instead.
        #[arg(long)]
        json: bool,
    },
    /// Add a task.
    Add {
        title: String,
        #[arg(long, short, default_value = "")]
        description: String,
        /// small|medium|big
        #[arg(long, short, default_value = "small")]
        reward: String,
    },
    /// Complete a task and collect its reward.
    Complete { task_id: String },
    /// Delete a task.
    Delete { task_id: String },
    /// Edit a task's title and description.
    Edit {
        task_id: String,
        /// New title; omitted or blank keeps the current one.
        #[arg(long, short)]
        title: Option<String>,
        /// New description; omitted keeps the current one.
        #[arg(long, short)]
        description: Option<String>,
    },
    /// Spend Gems on one character draw.
    Pull {
        /// Seed for a reproducible draw.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Feature an owned character.
    Main { character_id: String },
    /// List every collectible character and the draw rates.
    Catalog,
}

#[derive(Debug)]
enum CliError {
    Db(DbError),
    Catalog(GachaConfigError),
    Session(SessionError),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "cannot open save file: {err}"),
            Self::Catalog(err) => write!(f, "invalid character catalog: {err}"),
            Self::Session(err) => write!(f, "{err}"),
        }
    }
}

impl From<SessionError> for CliError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        let log_dir = absolute_dir(log_dir);
        if let Err(err) = init_logging(level, &log_dir.to_string_lossy()) {
            eprintln!("logging disabled: {err}");
        }
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Session(err)) if err.is_rejection() => {
            println!("{err}");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let conn = open_db(&cli.db).map_err(CliError::Db)?;
    let gacha = Gacha::standard().map_err(CliError::Catalog)?;
    let game = GameSession::new(SqliteStateRepository::new(&conn), gacha);

    match &cli.command {
        Command::Init => {
            if game.initialize()? {
                println!("Created a new save at {}.", cli.db.display());
            } else {
                println!("Save already exists at {}.", cli.db.display());
            }
        }
        Command::Show { json } => {
            let state = game.load_state()?;
            if *json {
                println!("{:#}", state.to_document());
            } else {
                print!("{}", render::state(&state, game.gacha().catalog()));
            }
        }
        Command::Add {
            title,
            description,
            reward,
        } => {
            let task = game.add_task(&NewTaskRequest {
                title: title.clone(),
                description: description.clone(),
                reward_preset: reward.clone(),
            })?;
            println!("Task added! ({})", task.id);
        }
        Command::Complete { task_id } => match game.complete_task(task_id)? {
            Some(report) => {
                println!("{}", report.reward_message());
                for level_up in report.level_ups.iter() {
                    println!("Level Up! Now level {}", level_up.level);
                }
                print!("{}", render::player(&game.load_state()?.player));
            }
            None => println!("Nothing to complete for {task_id}."),
        },
        Command::Delete { task_id } => {
            game.delete_task(task_id)?;
            print!("{}", render::tasks(&game.load_state()?.tasks));
        }
        Command::Edit {
            task_id,
            title,
            description,
        } => {
            let state = game.load_state()?;
            let Some(task) = state.find_task(task_id) else {
                println!("Nothing to edit for {task_id}.");
                return Ok(());
            };
            let (title, description) =
                edit_fields(task, title.as_deref(), description.as_deref());
            if game.edit_task(task_id, title, description)? {
                print!("{}", render::tasks(&game.load_state()?.tasks));
            } else {
                println!("Nothing to edit for {task_id}.");
            }
        }
        Command::Pull { seed } => {
            let result = match seed {
                Some(seed) => game.pull(&mut StdRng::seed_from_u64(*seed))?,
                None => game.pull(&mut rand::thread_rng())?,
            };
            print!("{}", render::pull_result(&result));
            print!("{}", render::player(&game.load_state()?.player));
        }
        Command::Main { character_id } => {
            if !game.set_main_character(character_id)? {
                println!("You do not own {character_id} yet.");
            }
            print!(
                "{}",
                render::collection(&game.load_state()?, game.gacha().catalog())
            );
        }
        Command::Catalog => {
            print!("{}", render::catalog(game.gacha()));
        }
    }
    Ok(())
}

/// Fills omitted edit flags with the task's current values.
fn edit_fields<'a>(
    task: &'a Task,
    title: Option<&'a str>,
    description: Option<&'a str>,
) -> (&'a str, &'a str) {
    (
        title.unwrap_or(&task.title),
        description.unwrap_or(&task.description),
    )
}

fn absolute_dir(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
