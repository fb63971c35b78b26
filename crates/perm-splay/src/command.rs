//! Text command language driving a [`SeqTree`].
//!
//! Input is a stream of whitespace-separated integers:
//!
//! ```text
//! n a_0 .. a_{n-1}
//! q
//! <type> <args>...     (q times)
//! ```
//!
//! | type | args | effect |
//! |------|------|--------|
//! | 1 | `l r` | print the sum of `[l, r]` |
//! | 2 | `x pos` | insert `x` at `pos` |
//! | 3 | `pos` | delete at `pos` |
//! | 4 | `x l r` | assign `x` on `[l, r]` |
//! | 5 | `x l r` | add `x` on `[l, r]` |
//! | 6 | `l r` | next permutation of `[l, r]` |
//! | 7 | `l r` | previous permutation of `[l, r]` |

use std::str::{FromStr, SplitAsciiWhitespace};

use log::warn;
use thiserror::Error;

use crate::error::SeqError;
use crate::tree::SeqTree;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unexpected end of input, expected {0}")]
    UnexpectedEof(&'static str),
    #[error("invalid number {token:?} for {what}")]
    InvalidNumber { token: String, what: &'static str },
    #[error("unknown command type {0}")]
    UnknownCommand(i64),
    #[error("command {index}: {source}")]
    Seq {
        index: usize,
        #[source]
        source: SeqError,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Sum { begin: usize, end: usize },
    Insert { value: i64, pos: usize },
    Delete { pos: usize },
    Assign { value: i64, begin: usize, end: usize },
    Add { delta: i64, begin: usize, end: usize },
    NextPermutation { begin: usize, end: usize },
    PrevPermutation { begin: usize, end: usize },
}

impl Command {
    /// Applies the command. Returns the printed value for queries.
    pub fn apply(&self, tree: &mut SeqTree) -> Result<Option<i64>, SeqError> {
        match *self {
            Command::Sum { begin, end } => tree.sum(begin, end).map(Some),
            Command::Insert { value, pos } => tree.insert(value, pos).map(|_| None),
            Command::Delete { pos } => tree.delete(pos).map(|_| None),
            Command::Assign { value, begin, end } => tree.assign(value, begin, end).map(|_| None),
            Command::Add { delta, begin, end } => tree.add(delta, begin, end).map(|_| None),
            Command::NextPermutation { begin, end } => tree.next_permutation(begin, end).map(|_| None),
            Command::PrevPermutation { begin, end } => tree.prev_permutation(begin, end).map(|_| None),
        }
    }
}

/// A parsed input: the initial sequence and the commands to run on it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Script {
    pub initial: Vec<i64>,
    pub commands: Vec<Command>,
}

struct Tokens<'a> {
    inner: SplitAsciiWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            inner: input.split_ascii_whitespace(),
        }
    }

    fn next<T: FromStr>(&mut self, what: &'static str) -> Result<T, CommandError> {
        let token = self.inner.next().ok_or(CommandError::UnexpectedEof(what))?;
        token.parse().map_err(|_| CommandError::InvalidNumber {
            token: token.to_string(),
            what,
        })
    }

    fn int(&mut self, what: &'static str) -> Result<i64, CommandError> {
        self.next(what)
    }

    fn index(&mut self, what: &'static str) -> Result<usize, CommandError> {
        self.next(what)
    }
}

/// Parses a whole script.
pub fn parse(input: &str) -> Result<Script, CommandError> {
    let mut tokens = Tokens::new(input);
    let n = tokens.index("element count")?;
    let initial = (0..n)
        .map(|_| tokens.int("element"))
        .collect::<Result<Vec<_>, _>>()?;
    let q = tokens.index("command count")?;
    let commands = (0..q)
        .map(|_| parse_command(&mut tokens))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Script { initial, commands })
}

fn parse_command(tokens: &mut Tokens<'_>) -> Result<Command, CommandError> {
    let command = match tokens.int("command type")? {
        1 => Command::Sum {
            begin: tokens.index("range begin")?,
            end: tokens.index("range end")?,
        },
        2 => Command::Insert {
            value: tokens.int("value")?,
            pos: tokens.index("position")?,
        },
        3 => Command::Delete {
            pos: tokens.index("position")?,
        },
        4 => Command::Assign {
            value: tokens.int("value")?,
            begin: tokens.index("range begin")?,
            end: tokens.index("range end")?,
        },
        5 => Command::Add {
            delta: tokens.int("value")?,
            begin: tokens.index("range begin")?,
            end: tokens.index("range end")?,
        },
        6 => Command::NextPermutation {
            begin: tokens.index("range begin")?,
            end: tokens.index("range end")?,
        },
        7 => Command::PrevPermutation {
            begin: tokens.index("range begin")?,
            end: tokens.index("range end")?,
        },
        other => return Err(CommandError::UnknownCommand(other)),
    };
    Ok(command)
}

/// Result of running a [`Script`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// Values printed by query commands, in order.
    pub output: Vec<i64>,
    /// Commands rejected in lenient mode, by index.
    pub rejected: Vec<(usize, SeqError)>,
    /// Sequence after the last command.
    pub sequence: Vec<i64>,
}

impl Report {
    /// Formats the report the way the driver prints it: one line per query
    /// result, then the final sequence on one line unless `dump` is off.
    pub fn render(&self, dump: bool) -> String {
        let mut out = String::new();
        for v in &self.output {
            out.push_str(&v.to_string());
            out.push('\n');
        }
        if dump {
            let line: Vec<String> = self.sequence.iter().map(i64::to_string).collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
        out
    }
}

/// Runs `script`. With `strict`, the first rejected command aborts the run;
/// otherwise it is logged, recorded and skipped.
pub fn run(script: &Script, strict: bool) -> Result<Report, CommandError> {
    let mut tree = SeqTree::from_slice(&script.initial);
    let mut report = Report::default();
    for (index, command) in script.commands.iter().enumerate() {
        match command.apply(&mut tree) {
            Ok(Some(v)) => report.output.push(v),
            Ok(None) => {}
            Err(source) if strict => return Err(CommandError::Seq { index, source }),
            Err(source) => {
                warn!("command {index} ({command:?}) rejected: {source}");
                report.rejected.push((index, source));
            }
        }
    }
    report.sequence = tree.to_vec();
    Ok(report)
}
