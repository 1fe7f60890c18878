/// Shell command parsing and execution.
///
/// Parsing is pure; execution runs one [`Command`] against a [`Profile`] and
/// writes the reply to any `Write`, so both halves are testable without a
/// terminal.
use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use profile::{ByteStore, Profile, ProfileError};

pub const HELP: &str = "\
Commands: GET s k | GETN n s k | SET s k v | SETN n s k v
          RM s | RMN n s | COUNT s | SECTIONS | DUMP | FLUSH | EXIT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Get { section: String, key: String },
    GetN { order: usize, section: String, key: String },
    Set { section: String, key: String, value: String },
    SetN { order: usize, section: String, key: String, value: String },
    Rm { section: String },
    RmN { order: usize, section: String },
    Count { section: String },
    Sections,
    Dump,
    Flush,
    Exit,
}

/// What the shell loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
///
/// The command word is case-insensitive. Everything after the key of
/// `SET`/`SETN` is the value, joined with single spaces; it may be empty.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(None);
    };

    let cmd = match word.to_uppercase().as_str() {
        "GET" => match (parts.next(), parts.next()) {
            (Some(s), Some(k)) => Command::Get {
                section: s.to_string(),
                key: k.to_string(),
            },
            _ => bail!("usage: GET section key"),
        },
        "GETN" => match (parts.next(), parts.next(), parts.next()) {
            (Some(n), Some(s), Some(k)) => Command::GetN {
                order: order(n)?,
                section: s.to_string(),
                key: k.to_string(),
            },
            _ => bail!("usage: GETN order section key"),
        },
        "SET" => match (parts.next(), parts.next()) {
            (Some(s), Some(k)) => Command::Set {
                section: s.to_string(),
                key: k.to_string(),
                value: parts.collect::<Vec<_>>().join(" "),
            },
            _ => bail!("usage: SET section key value"),
        },
        "SETN" => match (parts.next(), parts.next(), parts.next()) {
            (Some(n), Some(s), Some(k)) => Command::SetN {
                order: order(n)?,
                section: s.to_string(),
                key: k.to_string(),
                value: parts.collect::<Vec<_>>().join(" "),
            },
            _ => bail!("usage: SETN order section key value"),
        },
        "RM" => match parts.next() {
            Some(s) => Command::Rm {
                section: s.to_string(),
            },
            None => bail!("usage: RM section"),
        },
        "RMN" => match (parts.next(), parts.next()) {
            (Some(n), Some(s)) => Command::RmN {
                order: order(n)?,
                section: s.to_string(),
            },
            _ => bail!("usage: RMN order section"),
        },
        "COUNT" => match parts.next() {
            Some(s) => Command::Count {
                section: s.to_string(),
            },
            None => bail!("usage: COUNT section"),
        },
        "SECTIONS" => Command::Sections,
        "DUMP" => Command::Dump,
        "FLUSH" => Command::Flush,
        "EXIT" | "QUIT" => Command::Exit,
        other => bail!("unknown command: {}", other),
    };
    Ok(Some(cmd))
}

fn order(raw: &str) -> Result<usize> {
    raw.parse()
        .with_context(|| format!("order must be a non-negative integer, got {:?}", raw))
}

/// Runs `cmd` and writes its reply to `out`.
///
/// Profile errors become `ERR ...` lines; only a failing `out` is returned
/// as an error.
pub fn execute<S, W>(
    profile: &mut Profile<S>,
    cmd: Command,
    capacity: usize,
    out: &mut W,
) -> io::Result<Flow>
where
    S: ByteStore,
    W: Write,
{
    match cmd {
        Command::Get { section, key } => {
            let res = profile.get_string(&section, &key, capacity);
            print_value(out, res)?;
        }
        Command::GetN {
            order,
            section,
            key,
        } => {
            let res = profile.get_string_by_order(order, &section, &key, capacity);
            print_value(out, res)?;
        }
        Command::Set {
            section,
            key,
            value,
        } => print_status(out, profile.set_string(&section, &key, &value))?,
        Command::SetN {
            order,
            section,
            key,
            value,
        } => print_status(
            out,
            profile.set_string_by_order(order, &section, &key, &value),
        )?,
        Command::Rm { section } => print_status(out, profile.remove_section(&section))?,
        Command::RmN { order, section } => {
            print_status(out, profile.remove_section_by_order(order, &section))?
        }
        Command::Count { section } => match profile.get_order_num(&section) {
            Ok(n) => writeln!(out, "{}", n)?,
            Err(e) => writeln!(out, "ERR {}", e)?,
        },
        Command::Sections => {
            let names: Vec<&str> = profile.sections().collect();
            if names.is_empty() {
                writeln!(out, "(empty)")?;
            } else {
                for name in &names {
                    writeln!(out, "{}", name)?;
                }
                writeln!(out, "({} sections)", names.len())?;
            }
        }
        Command::Dump => {
            for line in profile.render().lines() {
                writeln!(out, "{}", line)?;
            }
            if profile.is_modified() {
                writeln!(out, "(unflushed changes)")?;
            }
        }
        Command::Flush => match profile.flush() {
            Ok(()) => writeln!(out, "OK")?,
            Err(e) => writeln!(out, "ERR flush failed: {}", e)?,
        },
        Command::Exit => {
            writeln!(out, "bye")?;
            return Ok(Flow::Exit);
        }
    }
    Ok(Flow::Continue)
}

fn print_value<W: Write>(out: &mut W, res: profile::Result<String>) -> io::Result<()> {
    match res {
        Ok(v) => writeln!(out, "{}", v),
        Err(ProfileError::NotFound) => writeln!(out, "(nil)"),
        Err(ProfileError::BufferTooSmall { partial, required }) => {
            writeln!(out, "ERR value needs capacity {} (got {:?})", required, partial)
        }
        Err(e) => writeln!(out, "ERR {}", e),
    }
}

fn print_status<W: Write>(out: &mut W, res: profile::Result<()>) -> io::Result<()> {
    match res {
        Ok(()) => writeln!(out, "OK"),
        Err(e) => writeln!(out, "ERR {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn run(profile: &mut Profile, line: &str) -> String {
        let cmd = parse(line).unwrap().unwrap();
        let mut out = Vec::new();
        execute(profile, cmd, 251, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    // --------------------- parse ---------------------

    #[test]
    fn blank_line_is_no_command() {
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn command_word_is_case_insensitive() {
        assert_eq!(
            parse("get Net port").unwrap(),
            Some(Command::Get {
                section: "Net".into(),
                key: "port".into()
            })
        );
        assert_eq!(parse("quit").unwrap(), Some(Command::Exit));
    }

    #[test]
    fn set_value_keeps_inner_words() {
        assert_eq!(
            parse("SET Boot title Hello   big world").unwrap(),
            Some(Command::Set {
                section: "Boot".into(),
                key: "title".into(),
                value: "Hello big world".into()
            })
        );
        assert_eq!(
            parse("SET Boot empty").unwrap(),
            Some(Command::Set {
                section: "Boot".into(),
                key: "empty".into(),
                value: String::new()
            })
        );
    }

    #[test]
    fn order_commands_parse_index() {
        assert_eq!(
            parse("RMN 2 A").unwrap(),
            Some(Command::RmN {
                order: 2,
                section: "A".into()
            })
        );
        assert!(parse("RMN -1 A").is_err());
        assert!(parse("GETN x A k").is_err());
    }

    #[test]
    fn missing_arguments_are_usage_errors() {
        let err = parse("GET onlysection").unwrap_err();
        assert!(err.to_string().starts_with("usage: GET"));
        assert!(parse("SETN 0 A").is_err());
        assert!(parse("RM").is_err());
    }

    #[test]
    fn unknown_command() {
        let err = parse("FROB x").unwrap_err();
        assert_eq!(err.to_string(), "unknown command: FROB");
    }

    // --------------------- execute ---------------------

    #[test]
    fn set_get_and_missing() {
        let dir = tempdir().unwrap();
        let mut p = Profile::create(dir.path().join("p.ini")).unwrap();

        assert_eq!(run(&mut p, "SET Net port 8080"), "OK\n");
        assert_eq!(run(&mut p, "GET net PORT"), "8080\n");
        assert_eq!(run(&mut p, "GET net host"), "(nil)\n");
    }

    #[test]
    fn get_reports_small_capacity() {
        let dir = tempdir().unwrap();
        let mut p = Profile::create(dir.path().join("p.ini")).unwrap();
        p.set_string("A", "k", "hello").unwrap();

        let mut out = Vec::new();
        let cmd = parse("GET A k").unwrap().unwrap();
        execute(&mut p, cmd, 3, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ERR value needs capacity 6 (got \"he\")\n"
        );
    }

    #[test]
    fn order_commands() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("p.ini");
        fs::write(&path, "[A]\nx=1\n[A]\ny=2\n[A]\nz=3\n").unwrap();
        let mut p = Profile::open(&path).unwrap();

        assert_eq!(run(&mut p, "COUNT a"), "3\n");
        assert_eq!(run(&mut p, "GETN 1 A y"), "2\n");
        assert_eq!(run(&mut p, "RMN 1 A"), "OK\n");
        assert_eq!(run(&mut p, "COUNT A"), "2\n");
        assert_eq!(run(&mut p, "RMN 5 A"), "ERR not found\n");
    }

    #[test]
    fn sections_and_dump() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("p.ini");
        fs::write(&path, "# hi\n[A]\nx=1\n[B]\n").unwrap();
        let mut p = Profile::open(&path).unwrap();

        assert_eq!(run(&mut p, "SECTIONS"), "A\nB\n(2 sections)\n");
        assert_eq!(run(&mut p, "DUMP"), "# hi\n[A]\nx=1\n\n[B]\n");

        run(&mut p, "RM a");
        run(&mut p, "RM b");
        assert_eq!(run(&mut p, "SECTIONS"), "(empty)\n");
        assert_eq!(run(&mut p, "DUMP"), "(unflushed changes)\n");
    }

    #[test]
    fn invalid_arguments_are_reported() {
        let dir = tempdir().unwrap();
        let mut p = Profile::create(dir.path().join("p.ini")).unwrap();
        let long = "k".repeat(300);
        let out = run(&mut p, &format!("SET A {} v", long));
        assert!(out.starts_with("ERR invalid parameter"));
    }

    #[test]
    fn flush_and_exit() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("p.ini");
        let mut p = Profile::create(&path).unwrap();
        run(&mut p, "SET A k v");
        assert_eq!(run(&mut p, "FLUSH"), "OK\n");
        assert!(!p.is_modified());

        let mut out = Vec::new();
        let flow = execute(&mut p, Command::Exit, 251, &mut out).unwrap();
        assert_eq!(flow, Flow::Exit);
        assert_eq!(out, b"bye\n");
    }
}
