use crate::core::formats;
use crate::domain::model::{Contact, ContactUpdate, SortKey, StorageFormat};
use crate::domain::ports::Storage;
use crate::utils::error::{AddressBookError, Result};
use tracing::Span;

/// A named, insertion-ordered collection of contacts with unique names.
#[derive(Debug)]
pub struct AddressBook {
    name: String,
    contacts: Vec<Contact>,
    span: Span,
}

impl AddressBook {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let span = tracing::info_span!("address_book", book = %name);
        Self::with_span(name, span)
    }

    /// Uses `span` as the logging context for every operation on this book.
    pub fn with_span(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            contacts: Vec::new(),
            span,
        }
    }

    /// Creates the book and loads `<name>.<ext>` if it exists.
    pub fn open<S: Storage>(name: impl Into<String>, storage: &S, format: StorageFormat) -> Result<Self> {
        let mut book = Self::new(name);
        book.load(storage, format)?;
        Ok(book)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    fn position(&self, first_name: &str, last_name: &str) -> Option<usize> {
        self.contacts
            .iter()
            .position(|c| c.matches_name(first_name, last_name))
    }

    fn not_found(first_name: &str, last_name: &str) -> AddressBookError {
        AddressBookError::ContactNotFound {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }

    pub fn find_contact(&self, first_name: &str, last_name: &str) -> Result<&Contact> {
        self.position(first_name, last_name)
            .map(|i| &self.contacts[i])
            .ok_or_else(|| Self::not_found(first_name, last_name))
    }

    pub fn add_contact(&mut self, contact: Contact) -> Result<&Contact> {
        let _enter = self.span.enter();

        if self.position(&contact.first_name, &contact.last_name).is_some() {
            tracing::warn!(
                "Duplicate contact {} {} rejected",
                contact.first_name,
                contact.last_name
            );
            return Err(AddressBookError::DuplicateContact {
                first_name: contact.first_name,
                last_name: contact.last_name,
            });
        }

        tracing::debug!("Added contact {} {}", contact.first_name, contact.last_name);
        self.contacts.push(contact);
        Ok(&self.contacts[self.contacts.len() - 1])
    }

    pub fn delete_contact(&mut self, first_name: &str, last_name: &str) -> Result<Contact> {
        let _enter = self.span.enter();

        let index = self
            .position(first_name, last_name)
            .ok_or_else(|| Self::not_found(first_name, last_name))?;
        let removed = self.contacts.remove(index);
        tracing::debug!("Deleted contact {} {}", removed.first_name, removed.last_name);
        Ok(removed)
    }

    /// Applies `changes` to the named contact. Renaming onto another contact's
    /// name fails with `DuplicateContact` and leaves the book untouched.
    pub fn edit_contact(
        &mut self,
        first_name: &str,
        last_name: &str,
        changes: ContactUpdate,
    ) -> Result<&Contact> {
        let _enter = self.span.enter();

        let index = self
            .position(first_name, last_name)
            .ok_or_else(|| Self::not_found(first_name, last_name))?;

        let (new_first, new_last) = changes.resulting_name(&self.contacts[index]);
        let collides = self
            .contacts
            .iter()
            .enumerate()
            .any(|(i, c)| i != index && c.matches_name(new_first, new_last));
        if collides {
            tracing::warn!("Edit would duplicate contact {} {}", new_first, new_last);
            return Err(AddressBookError::DuplicateContact {
                first_name: new_first.to_string(),
                last_name: new_last.to_string(),
            });
        }

        let contact = &mut self.contacts[index];
        contact.update(changes);
        tracing::debug!("Edited contact {} {}", contact.first_name, contact.last_name);
        Ok(contact)
    }

    /// Contacts in the requested order. An empty book yields `EmptyAddressBook`.
    pub fn display_contacts(&self, sort_key: SortKey) -> Result<Vec<&Contact>> {
        if self.contacts.is_empty() {
            return Err(AddressBookError::EmptyAddressBook {
                name: self.name.clone(),
            });
        }

        let mut view: Vec<&Contact> = self.contacts.iter().collect();
        match sort_key {
            SortKey::None => {}
            // sort_by_key 為穩定排序
            SortKey::Name => {
                view.sort_by_key(|c| (c.first_name.to_lowercase(), c.last_name.to_lowercase()))
            }
            SortKey::City => view.sort_by_key(|c| c.city.to_lowercase()),
        }
        Ok(view)
    }

    pub fn search_by_location(&self, location: &str) -> Vec<&Contact> {
        self.contacts
            .iter()
            .filter(|c| c.is_located_in(location))
            .collect()
    }

    pub fn count_by_location(&self, location: &str) -> usize {
        self.contacts.iter().filter(|c| c.is_located_in(location)).count()
    }

    /// Writes `<name>.<ext>`, replacing any previous snapshot. Returns the file name.
    pub fn save<S: Storage>(&self, storage: &S, format: StorageFormat) -> Result<String> {
        let _enter = self.span.enter();

        let file_name = format.file_name(&self.name);
        let data = formats::encode(format, &self.contacts)?;
        storage.write_file(&file_name, &data)?;

        tracing::info!("Saved {} contacts to {}", self.contacts.len(), file_name);
        Ok(file_name)
    }

    /// Replaces the contacts with the ones stored in `<name>.<ext>`.
    ///
    /// A missing file is not an error and leaves the contacts untouched.
    /// Malformed and duplicate records are skipped. Returns the number of
    /// contacts loaded.
    pub fn load<S: Storage>(&mut self, storage: &S, format: StorageFormat) -> Result<usize> {
        let _enter = self.span.enter();

        let file_name = format.file_name(&self.name);
        if !storage.exists(&file_name) {
            tracing::debug!("No snapshot at {}, keeping {} contacts", file_name, self.contacts.len());
            return Ok(0);
        }

        // 讀取或解析失敗時保持為空
        self.contacts.clear();

        let data = storage.read_file(&file_name)?;
        let decoded = formats::decode(format, &data)?;

        let mut skipped = decoded.skipped;
        for contact in decoded.contacts {
            if self.position(&contact.first_name, &contact.last_name).is_some() {
                skipped += 1;
                continue;
            }
            self.contacts.push(contact);
        }

        if skipped > 0 {
            tracing::warn!("Skipped {} unreadable or duplicate records in {}", skipped, file_name);
        }
        tracing::info!("Loaded {} contacts from {}", self.contacts.len(), file_name);
        Ok(self.contacts.len())
    }
}
