//! Command loop: reads lines, drives the library service, renders results.

use crate::command::{parse_command, Command, HELP_TEXT};
use bookledger_core::{BookRecord, BookRepository, LibraryService};
use log::info;
use std::io::{self, BufRead, Write};

/// Runs commands from `input` until EOF or `quit`.
///
/// Command failures are printed and the loop continues; only I/O errors on
/// `input`/`output` end the session early.
pub fn run<R: BookRepository>(
    service: &LibraryService<R>,
    input: impl BufRead,
    mut output: impl Write,
) -> io::Result<()> {
    info!("event=shell_start module=cli status=ok");
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(output, "error: {err}")?;
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        execute(service, command, &mut output)?;
    }
    info!("event=shell_stop module=cli status=ok");
    output.flush()
}

fn execute<R: BookRepository>(
    service: &LibraryService<R>,
    command: Command,
    output: &mut impl Write,
) -> io::Result<()> {
    match command {
        Command::Add { title, author, id } => match service.add_book(&title, &author, id) {
            Ok(_) => writeln!(output, "{title} Added"),
            Err(err) => writeln!(output, "error: {err}"),
        },
        Command::Update { title, author, id } => {
            match service.update_book(&title, &author, id) {
                Ok(record) => write_book(output, &record),
                Err(err) => writeln!(output, "error: {err}"),
            }
        }
        Command::Remove(title) => match service.remove_book(&title) {
            Ok(_) => writeln!(output, "{title} Deleted"),
            Err(err) => writeln!(output, "error: {err}"),
        },
        Command::Get(title) => match service.find_book(&title) {
            Some((record, state)) => {
                write!(output, "[{state}] ")?;
                write_book(output, &record)
            }
            None => writeln!(output, "error: book does not exist: {title}"),
        },
        Command::Borrow(title) => match service.borrow_book(&title) {
            Ok(_) => writeln!(output, "{title} Borrowed"),
            Err(err) => writeln!(output, "error: {err}"),
        },
        Command::Return(title) => match service.return_book(&title) {
            Ok(_) => writeln!(output, "{title} Returned"),
            Err(err) => writeln!(output, "error: {err}"),
        },
        Command::List => write_books(output, &service.available_books()),
        Command::Borrowed => write_books(output, &service.borrowed_books()),
        Command::Reload => match service.load() {
            Ok(summary) => writeln!(
                output,
                "reloaded {} books ({} on loan kept)",
                summary.loaded, summary.skipped_on_loan
            ),
            Err(err) => writeln!(output, "error: {err}"),
        },
        Command::Help => writeln!(output, "{HELP_TEXT}"),
        Command::Quit => Ok(()),
    }
}

fn write_books(output: &mut impl Write, books: &[BookRecord]) -> io::Result<()> {
    if books.is_empty() {
        return writeln!(output, "(none)");
    }
    for book in books {
        write_book(output, book)?;
    }
    Ok(())
}

fn write_book(output: &mut impl Write, book: &BookRecord) -> io::Result<()> {
    writeln!(
        output,
        "Title: {}, Author: {}, ID: {}",
        book.title, book.author, book.id
    )
}
