use std::{env, process};

use flatbase::{db::Database, repl};

fn main() {
    let dir = env::args().nth(1).unwrap_or_else(|| "data".to_string());

    let mut db = match Database::open(&dir) {
        Ok(db) => db,
        Err(err) => {
            eprintln!("failed to open database at {}: {}", dir, err);
            process::exit(1);
        }
    };

    if let Err(err) = repl::run(&mut db) {
        eprintln!("fatal: {}", err);
        process::exit(1);
    }
}
