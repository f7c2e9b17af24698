//! JSON file-backed `BookRepository`.
//!
//! The whole catalog lives in memory and is rewritten in full after every
//! mutation: serialised to a staged file beside the target, then renamed
//! over it. A missing, empty or unreadable-as-JSON file loads as an empty
//! catalog. Access is serialised with an in-process mutex only; separate
//! processes sharing one file are not coordinated.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::ports::{BookRepository, BookRepositoryError};
use crate::domain::{Book, Isbn, Page};

/// Catalog persisted as a pretty-printed JSON array of `{title, author, isbn}`.
#[derive(Clone)]
pub struct JsonFileBookRepository {
    store: Arc<FileStore>,
}

struct FileStore {
    dir: Dir,
    file_name: PathBuf,
    path: PathBuf,
    books: Mutex<Vec<Book>>,
}

impl JsonFileBookRepository {
    /// Open the catalog stored at `path`, creating parent directories as
    /// needed. The file itself is only created on the first mutation.
    ///
    /// # Errors
    ///
    /// Returns [`BookRepositoryError::Connection`] when the parent directory
    /// cannot be opened or the file exists but cannot be read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BookRepositoryError> {
        let path = path.as_ref().to_path_buf();
        let file_name = path
            .file_name()
            .map(PathBuf::from)
            .ok_or_else(|| io_error(&path, "path has no file name"))?;
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Dir::create_ambient_dir_all(&parent, ambient_authority())
            .map_err(|error| io_error(&parent, error))?;
        let dir = Dir::open_ambient_dir(&parent, ambient_authority())
            .map_err(|error| io_error(&parent, error))?;

        let books = load_books(&dir, &file_name, &path)?;
        info!(path = %path.display(), count = books.len(), "catalog file loaded");
        Ok(Self {
            store: Arc::new(FileStore {
                dir,
                file_name,
                path,
                books: Mutex::new(books),
            }),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.store.path
    }

    async fn run<T, F>(&self, operation: F) -> Result<T, BookRepositoryError>
    where
        T: Send + 'static,
        F: FnOnce(&FileStore) -> Result<T, BookRepositoryError> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || operation(&store))
            .await
            .map_err(|error| {
                BookRepositoryError::query(format!("file store task failed: {error}"))
            })?
    }
}

fn io_error(path: &Path, error: impl std::fmt::Display) -> BookRepositoryError {
    BookRepositoryError::connection(format!("{}: {error}", path.display()))
}

fn load_books(dir: &Dir, file_name: &Path, path: &Path) -> Result<Vec<Book>, BookRepositoryError> {
    let contents = match dir.read(file_name) {
        Ok(contents) => contents,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "catalog file missing; starting empty");
            return Ok(Vec::new());
        }
        Err(error) => return Err(io_error(path, error)),
    };
    if contents.iter().all(u8::is_ascii_whitespace) {
        warn!(path = %path.display(), "catalog file empty; starting empty");
        return Ok(Vec::new());
    }

    match serde_json::from_slice::<Vec<Book>>(&contents) {
        Ok(books) => Ok(dedupe(books, path)),
        Err(error) => {
            warn!(path = %path.display(), %error, "catalog file unreadable; starting empty");
            Ok(Vec::new())
        }
    }
}

fn dedupe(books: Vec<Book>, path: &Path) -> Vec<Book> {
    let mut unique: Vec<Book> = Vec::with_capacity(books.len());
    for book in books {
        if unique.iter().any(|kept| kept.isbn == book.isbn) {
            warn!(path = %path.display(), isbn = %book.isbn, "dropping duplicate catalog entry");
            continue;
        }
        unique.push(book);
    }
    unique
}

impl FileStore {
    fn lock(&self) -> MutexGuard<'_, Vec<Book>> {
        self.books.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, books: &[Book]) -> Result<(), BookRepositoryError> {
        let payload = serde_json::to_vec_pretty(books)
            .map_err(|error| BookRepositoryError::query(format!("encode catalog: {error}")))?;

        let staged = PathBuf::from(format!(
            ".{}.{}.tmp",
            self.file_name.display(),
            Uuid::new_v4().simple()
        ));
        let result = self
            .dir
            .write(&staged, &payload)
            .map_err(|error| self.query_error(error))
            .and_then(|()| self.replace_file(&staged));
        if result.is_err() {
            let _cleanup_result = self.dir.remove_file(&staged);
        }
        result
    }

    fn replace_file(&self, staged: &Path) -> Result<(), BookRepositoryError> {
        match self.dir.remove_file(&self.file_name) {
            Ok(()) => {}
            Err(error) if error.kind() == io::ErrorKind::NotFound => {}
            Err(error) => return Err(self.query_error(error)),
        }
        self.dir
            .rename(staged, &self.dir, &self.file_name)
            .map_err(|error| self.query_error(error))
    }

    fn query_error(&self, error: io::Error) -> BookRepositoryError {
        BookRepositoryError::query(format!("{}: {error}", self.path.display()))
    }

    fn insert(&self, book: Book) -> Result<(), BookRepositoryError> {
        let mut books = self.lock();
        if books.iter().any(|stored| stored.isbn == book.isbn) {
            return Err(BookRepositoryError::duplicate_isbn(book.isbn.as_str()));
        }
        books.push(book);
        if let Err(error) = self.persist(&books) {
            books.pop();
            return Err(error);
        }
        Ok(())
    }

    fn delete(&self, isbn: &Isbn) -> Result<Option<Book>, BookRepositoryError> {
        let mut books = self.lock();
        let Some(index) = books.iter().position(|stored| &stored.isbn == isbn) else {
            return Ok(None);
        };
        let removed = books.remove(index);
        if let Err(error) = self.persist(&books) {
            books.insert(index, removed);
            return Err(error);
        }
        Ok(Some(removed))
    }
}

#[async_trait]
impl BookRepository for JsonFileBookRepository {
    async fn list(&self, page: Page) -> Result<Vec<Book>, BookRepositoryError> {
        let books = self.store.lock();
        Ok(page.apply(books.iter().cloned()).collect())
    }

    async fn find_by_isbn(&self, isbn: &Isbn) -> Result<Option<Book>, BookRepositoryError> {
        let books = self.store.lock();
        Ok(books.iter().find(|book| &book.isbn == isbn).cloned())
    }

    async fn insert(&self, book: &Book) -> Result<(), BookRepositoryError> {
        let book = book.clone();
        self.run(move |store| store.insert(book)).await
    }

    async fn delete_by_isbn(&self, isbn: &Isbn) -> Result<Option<Book>, BookRepositoryError> {
        let isbn = isbn.clone();
        self.run(move |store| store.delete(&isbn)).await
    }
}
