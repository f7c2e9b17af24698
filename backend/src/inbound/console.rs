//! Interactive console menu over the catalog ports.
//!
//! Input is read line by line; end of input behaves like choosing `Exit`.
//! Every catalog failure is printed and the loop continues.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use crate::domain::ports::{CatalogCommand, CatalogQuery};
use crate::domain::{CatalogError, Isbn, Page};

const MENU: &str = "\n--- Library Menu ---\n\
1. Add Book (by ISBN)\n\
2. Remove Book\n\
3. List Books\n\
4. Find Book\n\
5. Exit";
const CHOICE_PROMPT: &str = "Enter your choice (1-5): ";
const GOODBYE: &str = "Exiting the application. Goodbye!";

/// Menu entries in the order they are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Remove,
    List,
    Find,
    Exit,
}

impl MenuChoice {
    /// Parse a raw menu selection; surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(Self::Add),
            "2" => Some(Self::Remove),
            "3" => Some(Self::List),
            "4" => Some(Self::Find),
            "5" => Some(Self::Exit),
            _ => None,
        }
    }

}

/// Menu entries that act on a single ISBN.
#[derive(Debug, Clone, Copy)]
enum IsbnAction {
    Add,
    Remove,
    Find,
}

impl IsbnAction {
    const fn prompt(self) -> &'static str {
        match self {
            Self::Add => "Enter the ISBN of the book to add: ",
            Self::Remove => "Enter the ISBN of the book to remove: ",
            Self::Find => "Enter the ISBN of the book to find: ",
        }
    }
}

/// Console front end bound to the catalog driving ports.
#[derive(Clone)]
pub struct ConsoleMenu {
    catalog: Arc<dyn CatalogCommand>,
    catalog_query: Arc<dyn CatalogQuery>,
}

impl ConsoleMenu {
    pub fn new(catalog: Arc<dyn CatalogCommand>, catalog_query: Arc<dyn CatalogQuery>) -> Self {
        Self {
            catalog,
            catalog_query,
        }
    }

    /// Run the menu loop until the user exits or `input` is exhausted.
    ///
    /// # Errors
    ///
    /// Only I/O failures on `input` or `output` end the loop early.
    pub async fn run<R, W>(&self, mut input: R, mut output: W) -> io::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        loop {
            writeln!(output, "{MENU}")?;
            let Some(line) = prompt(&mut input, &mut output, CHOICE_PROMPT)? else {
                writeln!(output)?;
                writeln!(output, "{GOODBYE}")?;
                return Ok(());
            };

            let Some(choice) = MenuChoice::parse(&line) else {
                writeln!(
                    output,
                    "Invalid choice. Please enter a number between 1 and 5."
                )?;
                continue;
            };

            let action = match choice {
                MenuChoice::Exit => {
                    writeln!(output, "{GOODBYE}")?;
                    return Ok(());
                }
                MenuChoice::List => {
                    self.list(&mut output).await?;
                    continue;
                }
                MenuChoice::Add => IsbnAction::Add,
                MenuChoice::Remove => IsbnAction::Remove,
                MenuChoice::Find => IsbnAction::Find,
            };
            let Some(raw) = prompt(&mut input, &mut output, action.prompt())? else {
                writeln!(output)?;
                writeln!(output, "{GOODBYE}")?;
                return Ok(());
            };
            match Isbn::new(&raw) {
                Ok(isbn) => self.dispatch(action, isbn, &mut output).await?,
                Err(err) => writeln!(output, "Error: {err}")?,
            }
        }
    }

    async fn dispatch<W: Write>(
        &self,
        action: IsbnAction,
        isbn: Isbn,
        output: &mut W,
    ) -> io::Result<()> {
        match action {
            IsbnAction::Add => match self.catalog.add(&isbn).await {
                Ok(book) => writeln!(output, "Book added: {book}"),
                Err(err) => report(output, &err),
            },
            IsbnAction::Remove => match self.catalog.remove(&isbn).await {
                Ok(book) => writeln!(output, "Book removed: {book}"),
                Err(err) => report(output, &err),
            },
            IsbnAction::Find => match self.catalog_query.find(&isbn).await {
                Ok(Some(book)) => writeln!(output, "\nBook found: {book}"),
                Ok(None) => writeln!(output, "No book found with this ISBN: {isbn}"),
                Err(err) => report(output, &err),
            },
        }
    }

    async fn list<W: Write>(&self, output: &mut W) -> io::Result<()> {
        let books = match self.catalog_query.list(Page::all()).await {
            Ok(books) => books,
            Err(err) => return report(output, &err),
        };
        if books.is_empty() {
            return writeln!(output, "\nThe library is currently empty.");
        }
        writeln!(output, "\n--- Books in Library ---")?;
        for book in books {
            writeln!(output, "{book}")?;
        }
        Ok(())
    }
}

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(output, "{label}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

fn report<W: Write>(output: &mut W, err: &CatalogError) -> io::Result<()> {
    match err {
        CatalogError::Unreachable { message } => {
            writeln!(output, "An error occurred with the Open Library API: {message}")
        }
        other => writeln!(output, "Error: {other}"),
    }
}
