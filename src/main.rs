//! sdbtool - inspect shim databases

use anyhow::{bail, Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use std::path::PathBuf;
use shimdb::{tag_to_name, Database, Tag, TagId, TagType};

/// Maximum list nesting printed by `dump`.
const MAX_DEPTH: usize = 64;

/// sdbtool - Inspect shim databases
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the record tree of a database
    Dump {
        /// Database file
        path: PathBuf,
    },
    /// Print the header version of a database
    Version {
        /// Database file
        path: PathBuf,
    },
    /// Print the name of a tag (hex with 0x prefix, or decimal)
    TagName { tag: String },
    /// Find the EXE entry matching an executable
    Match {
        /// Database file
        database: PathBuf,
        /// Executable to match
        executable: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match args.command {
        Command::Dump { path } => {
            let db = Database::open(&path)
                .with_context(|| format!("Failed to open database {}", path.display()))?;
            dump(&db, TagId::ROOT, 0);
            db.close();
        }
        Command::Version { path } => {
            let (major, minor) = Database::database_version(&path)
                .with_context(|| format!("Failed to read header of {}", path.display()))?;
            println!("{}.{}", major, minor);
        }
        Command::TagName { tag } => {
            let tag = parse_tag(&tag)?;
            println!("{}", tag_to_name(tag));
        }
        Command::Match {
            database,
            executable,
        } => {
            let db = Database::open(&database)
                .with_context(|| format!("Failed to open database {}", database.display()))?;
            match db.find_matching_executable(&executable) {
                Ok(result) => {
                    println!("✅ {} matched EXE entry at {}", executable.display(), result.exe);
                    dump(&db, result.exe, 1);
                }
                Err(e) => println!("❌ No match for {}: {}", executable.display(), e),
            }
        }
    }

    Ok(())
}

fn dump(db: &Database, parent: TagId, depth: usize) {
    if depth > MAX_DEPTH {
        println!("{:indent$}...", "", indent = depth * 2);
        return;
    }

    for child in db.children(parent) {
        let tag = db.tag_at(child);
        let indent = depth * 2;
        let label = format!("{:indent$}{} [{}] @ {}", "", tag_to_name(tag), tag, child);

        match tag.tag_type() {
            Some(TagType::Null) | None => println!("{}", label),
            Some(TagType::Byte) => println!("{} = 0x{:02X}", label, db.read_byte_tag(child, 0)),
            Some(TagType::Word) => println!("{} = 0x{:04X}", label, db.read_word_tag(child, 0)),
            Some(TagType::Dword) => println!("{} = 0x{:08X}", label, db.read_dword_tag(child, 0)),
            Some(TagType::Qword) => println!("{} = 0x{:016X}", label, db.read_qword_tag(child, 0)),
            Some(TagType::String) | Some(TagType::StringRef) => match db.string_tag(child) {
                Some(text) => println!("{} = {:?}", label, text),
                None => println!("{} = <unresolved>", label),
            },
            Some(TagType::Binary) => {
                let length = db.binary_tag_data(child).map_or(0, <[u8]>::len);
                println!("{} = <{} bytes>", label, length);
            }
            Some(TagType::List) => {
                println!("{}", label);
                dump(db, child, depth + 1);
            }
        }
    }
}

fn parse_tag(text: &str) -> Result<Tag> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => text.parse::<u16>(),
    };
    match parsed {
        Ok(raw) => Ok(Tag(raw)),
        Err(e) => bail!("Invalid tag {:?}: {}", text, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag() -> Result<()> {
        assert_eq!(parse_tag("0x7007")?, Tag(0x7007));
        assert_eq!(parse_tag("0X4001")?, Tag(0x4001));
        assert_eq!(parse_tag("16385")?, Tag(0x4001));
        assert!(parse_tag("0xZZ").is_err());
        assert!(parse_tag("70000").is_err());
        Ok(())
    }
}
