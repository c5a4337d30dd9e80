use crate::error::Error;
use crate::Result;
use deadpool_sqlite::{Config, Pool, Runtime};
use directories::ProjectDirs;
use rusqlite::Connection;
use std::fs::create_dir_all;
use std::fs::remove_file;
use std::path::PathBuf;

pub fn run(args: &[String], db: Connection) -> Result<()> {
    let first_arg = match args.first() {
        Some(some) => some,
        None => Err(Error::CLI("No DB actions passed".into()))?,
    };

    match first_arg.as_str() {
        // Migrations run on every launch, so there's nothing left to do
        "migrate" => {}
        "drop" => drop(db)?,
        _ => Err(Error::CLI(format!("Unknown command: {first_arg}")))?,
    }

    Ok(())
}

pub fn open_connection() -> Result<Connection> {
    let conn = Connection::open(get_file_path()?)?;
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    Ok(conn)
}

pub fn pool() -> Result<Pool> {
    Config::new(get_file_path()?)
        .create_pool(Runtime::Tokio1)
        .map_err(|e| match e {
            deadpool_sqlite::CreatePoolError::Config(e) => Error::DeadpoolConfig(e),
            deadpool_sqlite::CreatePoolError::Build(e) => Error::DeadpoolBuild(e),
        })
}

pub fn get_file_path() -> Result<PathBuf> {
    let project_dirs = match ProjectDirs::from("jp", "cityplan", "cityplan") {
        Some(project_dirs) => project_dirs,
        None => Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Can't find home directory",
        ))?,
    };

    if !project_dirs.data_dir().exists() {
        create_dir_all(project_dirs.data_dir())?;
    }

    Ok(project_dirs.data_dir().join("cityplan.db"))
}

fn drop(db: Connection) -> Result<()> {
    let path = db
        .path()
        .ok_or(Error::CLI("Can't find database path".into()))?
        .to_string();
    db.close().map_err(|(_, e)| e)?;
    remove_file(path)?;
    Ok(())
}
