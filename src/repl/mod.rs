//! Interactive command interpreter
//!
//! Parses one command per line, dispatches onto the database session, and
//! prints results. Malformed commands are rejected here with a usage
//! message before anything reaches the core; destructive commands are
//! gated behind a y/n confirmation. Every error is printed and the loop
//! continues; nothing here terminates the process.

use std::{
    io::{self, BufRead, Write},
    time::Instant,
};

use crate::{
    db::{Database, clause::parse_clause},
    error::{Error, Result},
};

pub mod render;

/// One parsed interactive command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateTable { name: String, column_specs: Vec<String> },
    ListTables,
    DropTable { name: String },
    Insert { table: String, raw_values: Vec<String> },
    Select { table: String, filter: String },
    Update { table: String, set_clause: String, filter: String },
    Delete { table: String, filter: String },
    Info { name: String },
    Help,
    Exit,
}

const HELP: &str = "\
commands:
  create_table <name> <column:type> ...   column types: int, str, bool
  list_tables
  drop_table <name>
  insert into <table> values (<v1>, <v2>, ...)
  select from <table> [where <column> = <value>]
  update <table> set <column> = <value> [where <column> = <value>]
  delete from <table> [where <column> = <value>]
  info <table>
  help
  exit";

/// Runs the interactive loop until `exit` or end of input
pub fn run(db: &mut Database) -> Result<()> {
    println!("flatbase - type `help` for commands, `exit` to quit");
    let stdin = io::stdin();
    loop {
        print!("db> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_command(line) {
            Ok(Command::Exit) => break,
            Ok(command) => {
                if let Err(err) = execute(db, command) {
                    println!("error: {}", err);
                }
            }
            Err(err) => println!("error: {}", err),
        }
    }
    Ok(())
}

/// Executes one command against the session, printing its outcome
fn execute(db: &mut Database, command: Command) -> Result<()> {
    match command {
        Command::Help => println!("{}", HELP),
        Command::Exit => {}
        Command::ListTables => {
            let names = db.list_tables();
            if names.is_empty() {
                println!("no tables");
            }
            for name in names {
                println!("{}", name);
            }
        }
        Command::Info { name } => {
            let table = db.table_info(&name)?;
            println!("{}", render::render_schema(table));
        }
        Command::CreateTable { name, column_specs } => {
            let started = Instant::now();
            db.create_table(&name, &column_specs)?;
            println!("table {} created ({:.3}s)", name, started.elapsed().as_secs_f64());
        }
        Command::DropTable { name } => {
            if !confirm(&format!("drop table {}", name))? {
                println!("cancelled");
                return Ok(());
            }
            db.drop_table(&name)?;
            println!("table {} dropped", name);
        }
        Command::Insert { table, raw_values } => {
            let started = Instant::now();
            let id = db.insert(&table, &raw_values)?;
            println!("inserted record {} ({:.3}s)", id, started.elapsed().as_secs_f64());
        }
        Command::Select { table, filter } => {
            let filter = parse_clause(&filter)?;
            let columns: Vec<String> = db
                .table_info(&table)?
                .columns
                .iter()
                .map(|c| c.name.clone())
                .collect();
            let records = db.select(&table, &filter)?;
            print!("{}", render::render_records(&columns, &records));
            println!("{} record(s)", records.len());
        }
        Command::Update { table, set_clause, filter } => {
            let set_clause = parse_clause(&set_clause)?;
            if set_clause.is_empty() {
                return Err(Error::Command(
                    "usage: update <table> set <column> = <value> [where ...]".to_string(),
                ));
            }
            let filter = parse_clause(&filter)?;
            let started = Instant::now();
            let matched = db.update(&table, &set_clause, &filter)?;
            println!("{} record(s) updated ({:.3}s)", matched, started.elapsed().as_secs_f64());
        }
        Command::Delete { table, filter } => {
            if !confirm(&format!("delete from table {}", table))? {
                println!("cancelled");
                return Ok(());
            }
            let filter = parse_clause(&filter)?;
            let started = Instant::now();
            let removed = db.delete(&table, &filter)?;
            println!("{} record(s) deleted ({:.3}s)", removed, started.elapsed().as_secs_f64());
        }
    }
    Ok(())
}

/// Asks a y/n question; anything but `y` declines
fn confirm(action: &str) -> Result<bool> {
    print!("are you sure you want to {}? [y/n]: ", action);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

/// Parses one input line into a command
pub fn parse_command(line: &str) -> Result<Command> {
    let mut words = line.split_whitespace();
    let head = words.next().unwrap_or("").to_lowercase();
    match head.as_str() {
        "help" => Ok(Command::Help),
        "exit" | "quit" => Ok(Command::Exit),
        "list_tables" => Ok(Command::ListTables),
        "create_table" => {
            let name = words
                .next()
                .ok_or_else(|| usage("create_table <name> <column:type> ..."))?;
            Ok(Command::CreateTable {
                name: name.to_string(),
                column_specs: words.map(String::from).collect(),
            })
        }
        "drop_table" => {
            let name = words.next().ok_or_else(|| usage("drop_table <name>"))?;
            Ok(Command::DropTable { name: name.to_string() })
        }
        "info" => {
            let name = words.next().ok_or_else(|| usage("info <name>"))?;
            Ok(Command::Info { name: name.to_string() })
        }
        "insert" => parse_insert(line),
        "select" => parse_select(line),
        "update" => parse_update(line),
        "delete" => parse_delete(line),
        _ => Err(Error::Command(format!("unknown command: {}", head))),
    }
}

fn usage(text: &str) -> Error {
    Error::Command(format!("usage: {}", text))
}

/// `insert into <table> values (<v1>, <v2>, ...)`
fn parse_insert(line: &str) -> Result<Command> {
    let open = line.find('(');
    let close = line.rfind(')');
    let (open, close) = match (open, close) {
        (Some(open), Some(close)) if open < close => (open, close),
        _ => return Err(usage("insert into <table> values (<v1>, <v2>, ...)")),
    };

    let head: Vec<&str> = line[..open].split_whitespace().collect();
    if head.len() != 4
        || !head[1].eq_ignore_ascii_case("into")
        || !head[3].eq_ignore_ascii_case("values")
    {
        return Err(usage("insert into <table> values (<v1>, <v2>, ...)"));
    }

    Ok(Command::Insert {
        table: head[2].to_string(),
        raw_values: split_values(&line[open + 1..close])?,
    })
}

/// `select from <table> [where <column> = <value>]`
fn parse_select(line: &str) -> Result<Command> {
    let (head, filter) = split_where(line);
    let words: Vec<&str> = head.split_whitespace().collect();
    if words.len() != 3 || !words[1].eq_ignore_ascii_case("from") {
        return Err(usage("select from <table> [where <column> = <value>]"));
    }
    Ok(Command::Select {
        table: words[2].to_string(),
        filter,
    })
}

/// `update <table> set <column> = <value> [where <column> = <value>]`
fn parse_update(line: &str) -> Result<Command> {
    let set_pos = find_keyword(line, "set")
        .ok_or_else(|| usage("update <table> set <column> = <value> [where ...]"))?;
    let words: Vec<&str> = line[..set_pos].split_whitespace().collect();
    if words.len() != 2 {
        return Err(usage("update <table> set <column> = <value> [where ...]"));
    }

    let (set_clause, filter) = split_where(&line[set_pos + "set".len()..]);
    Ok(Command::Update {
        table: words[1].to_string(),
        set_clause: set_clause.trim().to_string(),
        filter,
    })
}

/// `delete from <table> [where <column> = <value>]`
fn parse_delete(line: &str) -> Result<Command> {
    let (head, filter) = split_where(line);
    let words: Vec<&str> = head.split_whitespace().collect();
    if words.len() != 3 || !words[1].eq_ignore_ascii_case("from") {
        return Err(usage("delete from <table> [where <column> = <value>]"));
    }
    Ok(Command::Delete {
        table: words[2].to_string(),
        filter,
    })
}

/// Splits a command at its WHERE keyword; the clause text may be empty
fn split_where(line: &str) -> (&str, String) {
    match find_keyword(line, "where") {
        Some(pos) => (
            &line[..pos],
            line[pos + "where".len()..].trim().to_string(),
        ),
        None => (line, String::new()),
    }
}

/// Finds a whitespace-delimited keyword, case-insensitively
fn find_keyword(line: &str, word: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let len = word.len();
    let mut pos = 0;
    while pos + len <= bytes.len() {
        if line.is_char_boundary(pos)
            && line.is_char_boundary(pos + len)
            && line[pos..pos + len].eq_ignore_ascii_case(word)
            && (pos == 0 || bytes[pos - 1].is_ascii_whitespace())
            && (pos + len == bytes.len() || bytes[pos + len].is_ascii_whitespace())
        {
            return Some(pos);
        }
        pos += 1;
    }
    None
}

/// Splits a parenthesized value list on commas outside quotes
///
/// Quotes are kept on the pieces; coercion strips them later, so quoted
/// text values may contain commas.
fn split_values(inner: &str) -> Result<Vec<String>> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for ch in inner.chars() {
        match quote {
            Some(q) if ch == q => {
                quote = None;
                current.push(ch);
            }
            Some(_) => current.push(ch),
            None => match ch {
                '"' | '\'' => {
                    quote = Some(ch);
                    current.push(ch);
                }
                ',' => {
                    values.push(current.trim().to_string());
                    current.clear();
                }
                _ => current.push(ch),
            },
        }
    }
    if quote.is_some() {
        return Err(Error::Command("unterminated quote in values".to_string()));
    }

    let last = current.trim();
    if !last.is_empty() || !values.is_empty() {
        values.push(last.to_string());
    }
    Ok(values)
}
