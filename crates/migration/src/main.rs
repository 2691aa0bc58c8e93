//! Applies the reviewers schema to a SQLite file.
//!
//! `migration [up|down|fresh|refresh|reset|status] [path]`, where `path`
//! defaults to the file named in the shipped `settings.toml`.

use std::process::ExitCode;

use migration::Migrator;
use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;

const DEFAULT_DB_FILE: &str = "reviewers.db";
const USAGE: &str = "usage: migration [up|down|fresh|refresh|reset|status] [sqlite file]";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Up,
    /// Rolls back the latest migration only.
    Down,
    Fresh,
    Refresh,
    Reset,
    Status,
}

impl Command {
    fn parse(arg: Option<&str>) -> Option<Self> {
        match arg.unwrap_or("up") {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "fresh" => Some(Self::Fresh),
            "refresh" => Some(Self::Refresh),
            "reset" => Some(Self::Reset),
            "status" => Some(Self::Status),
            _ => None,
        }
    }

    async fn run(self, db: &DatabaseConnection) -> Result<(), DbErr> {
        match self {
            Self::Up => Migrator::up(db, None).await,
            Self::Down => Migrator::down(db, Some(1)).await,
            Self::Fresh => Migrator::fresh(db).await,
            Self::Refresh => Migrator::refresh(db).await,
            Self::Reset => Migrator::reset(db).await,
            Self::Status => Migrator::status(db).await,
        }
    }
}

fn sqlite_url(path: Option<&str>) -> String {
    format!("sqlite:{}?mode=rwc", path.unwrap_or(DEFAULT_DB_FILE))
}

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = Command::parse(args.first().map(String::as_str)) else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };
    let url = sqlite_url(args.get(1).map(String::as_str));

    let outcome = match Database::connect(&url).await {
        Ok(db) => command.run(&db).await,
        Err(err) => Err(err),
    };
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("migration {command:?} on {url} failed: {err}");
            ExitCode::FAILURE
        }
    }
}
