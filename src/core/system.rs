use crate::core::address_book::AddressBook;
use crate::domain::model::{Contact, StorageFormat};
use crate::domain::ports::Storage;
use crate::utils::error::{AddressBookError, Result};
use crate::utils::validation::{validate_field, FieldRule};
use tracing::Span;

/// Outcome of saving one book during [`AddressBookSystem::save_all`].
#[derive(Debug)]
pub struct SaveReport {
    pub book: String,
    pub result: Result<String>,
}

/// Owns every address book of a session, keyed by unique (case-sensitive) name.
#[derive(Debug)]
pub struct AddressBookSystem {
    books: Vec<AddressBook>,
    span: Span,
}

impl Default for AddressBookSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressBookSystem {
    pub fn new() -> Self {
        Self {
            books: Vec::new(),
            span: tracing::info_span!("address_book_system"),
        }
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.books.iter().position(|b| b.name() == name)
    }

    fn not_found(name: &str) -> AddressBookError {
        AddressBookError::AddressBookNotFound {
            name: name.to_string(),
        }
    }

    fn new_book(&self, name: &str) -> Result<AddressBook> {
        validate_field("book_name", name, FieldRule::BookName)?;
        if self.index_of(name).is_some() {
            return Err(AddressBookError::AddressBookAlreadyExists {
                name: name.to_string(),
            });
        }

        let span = tracing::info_span!(parent: &self.span, "address_book", book = %name);
        Ok(AddressBook::with_span(name, span))
    }

    fn insert(&mut self, book: AddressBook) -> &mut AddressBook {
        tracing::debug!(parent: &self.span, "Created address book {}", book.name());
        self.books.push(book);
        let last = self.books.len() - 1;
        &mut self.books[last]
    }

    pub fn create_book(&mut self, name: &str) -> Result<&mut AddressBook> {
        let book = self.new_book(name)?;
        Ok(self.insert(book))
    }

    /// Creates the book and fills it from `<name>.<ext>` when that file exists.
    /// If the snapshot cannot be read the book is not added.
    pub fn open_book<S: Storage>(
        &mut self,
        name: &str,
        storage: &S,
        format: StorageFormat,
    ) -> Result<&mut AddressBook> {
        let mut book = self.new_book(name)?;
        book.load(storage, format)?;
        Ok(self.insert(book))
    }

    pub fn select_book(&self, name: &str) -> Result<&AddressBook> {
        self.index_of(name)
            .map(|i| &self.books[i])
            .ok_or_else(|| Self::not_found(name))
    }

    pub fn select_book_mut(&mut self, name: &str) -> Result<&mut AddressBook> {
        match self.index_of(name) {
            Some(i) => Ok(&mut self.books[i]),
            None => Err(Self::not_found(name)),
        }
    }

    pub fn book_names(&self) -> Vec<&str> {
        self.books.iter().map(|b| b.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Matches per book, in creation order. Books without matches appear with an empty list.
    pub fn search_across(&self, location: &str) -> Vec<(&str, Vec<&Contact>)> {
        self.books
            .iter()
            .map(|b| (b.name(), b.search_by_location(location)))
            .collect()
    }

    pub fn count_by_location(&self, location: &str) -> usize {
        self.books.iter().map(|b| b.count_by_location(location)).sum()
    }

    /// Saves every book; a failure on one book does not stop the others.
    pub fn save_all<S: Storage>(&self, storage: &S, format: StorageFormat) -> Vec<SaveReport> {
        let _enter = self.span.enter();

        self.books
            .iter()
            .map(|book| {
                let result = book.save(storage, format);
                if let Err(e) = &result {
                    tracing::error!("Failed to save address book {}: {}", book.name(), e);
                }
                SaveReport {
                    book: book.name().to_string(),
                    result,
                }
            })
            .collect()
    }
}
