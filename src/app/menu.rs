//! Interactive console session on top of [`AddressBookSystem`].
//!
//! The menu only collects strings, re-prompts on invalid fields and renders
//! outcomes; every rule about contacts lives in the core.

use crate::app::prompt::Prompter;
use crate::core::address_book::AddressBook;
use crate::core::system::AddressBookSystem;
use crate::core::{ConfigProvider, Contact, ContactUpdate, SortKey, Storage, StorageFormat};
use crate::utils::error::{AddressBookError, Result};
use crate::utils::validation::FieldRule;
use std::io::{BufRead, Write};

const SYSTEM_MENU: &str = "\n===== Address Book System =====
1. Create address book
2. Open address book
3. List address books
4. Search contacts by city or state
5. Count contacts by city or state
6. Save all address books
0. Exit";

const BOOK_MENU: &str = "
1. Add contact
2. Add multiple contacts
3. Edit contact
4. Delete contact
5. Display contacts
6. Search by city or state
7. Save to file
8. Load from file
0. Back";

pub struct Menu<R, W, S> {
    system: AddressBookSystem,
    storage: S,
    format: StorageFormat,
    autoload: bool,
    prompter: Prompter<R, W>,
}

impl<R: BufRead, W: Write, S: Storage> Menu<R, W, S> {
    pub fn new<C: ConfigProvider>(config: &C, storage: S, input: R, output: W) -> Self {
        Self {
            system: AddressBookSystem::new(),
            storage,
            format: config.format(),
            autoload: config.autoload(),
            prompter: Prompter::new(input, output),
        }
    }

    pub fn system(&self) -> &AddressBookSystem {
        &self.system
    }

    pub fn into_parts(self) -> (AddressBookSystem, W) {
        (self.system, self.prompter.into_output())
    }

    /// Creates the configured books before the session starts. A book that
    /// cannot be created or loaded is reported and skipped. Returns how many
    /// books were created.
    pub fn preload<C: ConfigProvider>(&mut self, config: &C) -> Result<usize> {
        let mut created = 0;
        for name in config.preload_books() {
            match self.create_book(name) {
                Ok(loaded) => {
                    tracing::debug!("Preloaded address book {} with {} contacts", name, loaded);
                    created += 1;
                }
                Err(e) if e.is_recoverable() => {
                    tracing::warn!("Skipping preloaded address book {}: {}", name, e);
                    self.prompter
                        .say(format!("Could not preload '{}': {}", name, e.user_friendly_message()))?;
                    self.prompter.say(format!("Hint: {}", e.recovery_suggestion()))?;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(created)
    }

    fn create_book(&mut self, name: &str) -> Result<usize> {
        let book = if self.autoload {
            self.system.open_book(name, &self.storage, self.format)?
        } else {
            self.system.create_book(name)?
        };
        Ok(book.len())
    }

    /// Runs until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        match self.system_loop() {
            Err(AddressBookError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                tracing::debug!("Input closed, leaving menu");
                Ok(())
            }
            other => other,
        }
    }

    fn system_loop(&mut self) -> Result<()> {
        loop {
            self.prompter.say(SYSTEM_MENU)?;
            let choice = self.prompter.ask("Enter your choice: ")?;
            let outcome = match choice.as_str() {
                "1" => self.create_book_action(),
                "2" => self.open_book_action(),
                "3" => self.list_books_action(),
                "4" => self.search_across_action(),
                "5" => self.count_action(),
                "6" => self.save_all_action(),
                "0" => {
                    self.prompter.say("Goodbye!")?;
                    return Ok(());
                }
                _ => self.prompter.say("Invalid choice. Please try again."),
            };
            render_outcome(&mut self.prompter, outcome)?;
        }
    }

    fn create_book_action(&mut self) -> Result<()> {
        let name = self.prompter.ask_valid("Address book name: ", FieldRule::BookName)?;
        let loaded = self.create_book(&name)?;
        self.prompter.say(format!("Address book '{}' created.", name))?;
        if loaded > 0 {
            self.prompter
                .say(format!("Loaded {} contacts from {}.", loaded, self.format.file_name(&name)))?;
        }
        Ok(())
    }

    fn open_book_action(&mut self) -> Result<()> {
        let name = self.prompter.ask("Address book name: ")?;
        let book = self.system.select_book_mut(&name)?;
        book_loop(&mut self.prompter, book, &self.storage, self.format)
    }

    fn list_books_action(&mut self) -> Result<()> {
        if self.system.is_empty() {
            return self.prompter.say("No address books yet.");
        }
        let lines: Vec<String> = self
            .system
            .book_names()
            .into_iter()
            .map(|name| format!("- {}", name))
            .collect();
        self.prompter.say(lines.join("\n"))
    }

    fn search_across_action(&mut self) -> Result<()> {
        let location = self.prompter.ask_valid("City or state: ", FieldRule::NonEmpty)?;
        let mut text = String::new();
        for (book, contacts) in self.system.search_across(&location) {
            text.push_str(&format!("\n--- {} ({} found) ---\n", book, contacts.len()));
            for contact in contacts {
                text.push_str(&format!("{}\n\n", contact));
            }
        }
        if text.is_empty() {
            text.push_str("No address books yet.");
        }
        self.prompter.say(text)
    }

    fn count_action(&mut self) -> Result<()> {
        let location = self.prompter.ask_valid("City or state: ", FieldRule::NonEmpty)?;
        let count = self.system.count_by_location(&location);
        self.prompter
            .say(format!("{} contact(s) found in {}.", count, location))
    }

    fn save_all_action(&mut self) -> Result<()> {
        for report in self.system.save_all(&self.storage, self.format) {
            match report.result {
                Ok(file) => self.prompter.say(format!("Saved '{}' to {}.", report.book, file))?,
                Err(e) => self.prompter.say(format!(
                    "Could not save '{}': {}",
                    report.book,
                    e.user_friendly_message()
                ))?,
            }
        }
        Ok(())
    }
}

fn book_loop<R: BufRead, W: Write, S: Storage>(
    prompter: &mut Prompter<R, W>,
    book: &mut AddressBook,
    storage: &S,
    format: StorageFormat,
) -> Result<()> {
    loop {
        prompter.say(format!("\n===== {} ({} contacts) ====={}", book.name(), book.len(), BOOK_MENU))?;
        let choice = prompter.ask("Enter your choice: ")?;
        let outcome = match choice.as_str() {
            "1" => add_contact_action(prompter, book, false),
            "2" => add_multiple_action(prompter, book),
            "3" => edit_contact_action(prompter, book),
            "4" => delete_contact_action(prompter, book),
            "5" => display_action(prompter, book),
            "6" => search_action(prompter, book),
            "7" => book
                .save(storage, format)
                .and_then(|file| prompter.say(format!("Saved to {}.", file))),
            "8" => load_action(prompter, book, storage, format),
            "0" => return Ok(()),
            _ => prompter.say("Invalid choice. Please try again."),
        };

        render_outcome(prompter, outcome)?;
    }
}

fn load_action<R: BufRead, W: Write, S: Storage>(
    prompter: &mut Prompter<R, W>,
    book: &mut AddressBook,
    storage: &S,
    format: StorageFormat,
) -> Result<()> {
    let file_name = format.file_name(book.name());
    if !storage.exists(&file_name) {
        return prompter.say(format!("No saved file {}; contacts unchanged.", file_name));
    }
    let loaded = book.load(storage, format)?;
    prompter.say(format!("Loaded {} contacts from {}.", loaded, file_name))
}

/// Renders a recoverable failure and keeps the session going. Anything else,
/// end of input included, is passed up.
fn render_outcome<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>, outcome: Result<()>) -> Result<()> {
    match outcome {
        Ok(()) => Ok(()),
        Err(e) if !e.is_recoverable() => Err(e),
        Err(e) => {
            tracing::debug!("Operation failed: {}", e);
            prompter.say(e.user_friendly_message())?;
            prompter.say(format!("Hint: {}", e.recovery_suggestion()))
        }
    }
}

/// Reads a full contact. With `retry_on_duplicate`, a taken name is asked again
/// instead of aborting the add.
fn add_contact_action<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    book: &mut AddressBook,
    retry_on_duplicate: bool,
) -> Result<()> {
    let (first_name, last_name) = loop {
        let first = prompter.ask_valid("First Name: ", FieldRule::Name)?;
        let last = prompter.ask_valid("Last Name: ", FieldRule::Name)?;
        if book.find_contact(&first, &last).is_err() {
            break (first, last);
        }
        if !retry_on_duplicate {
            return Err(AddressBookError::DuplicateContact {
                first_name: first,
                last_name: last,
            });
        }
        prompter.say(format!(
            "{} {} already exists. Please enter a different name.",
            first, last
        ))?;
    };

    let contact = Contact::new(
        first_name,
        last_name,
        prompter.ask_valid("Address: ", FieldRule::NonEmpty)?,
        prompter.ask_valid("City: ", FieldRule::NonEmpty)?,
        prompter.ask_valid("State: ", FieldRule::NonEmpty)?,
        prompter.ask_valid("ZIP Code: ", FieldRule::ZipCode)?,
        prompter.ask_valid("Phone Number: ", FieldRule::PhoneNumber)?,
        prompter.ask_valid("Email: ", FieldRule::Email)?,
    );

    let added = book.add_contact(contact)?;
    let text = format!("\n--------------Contact Details:---------------\n{}", added);
    prompter.say(text)
}

fn add_multiple_action<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    book: &mut AddressBook,
) -> Result<()> {
    let count = loop {
        match prompter.ask("How many contacts? ")?.parse::<usize>() {
            Ok(n) => break n,
            Err(_) => prompter.say("Please enter a whole number.")?,
        }
    };

    for i in 1..=count {
        prompter.say(format!("\nContact {} of {}", i, count))?;
        add_contact_action(prompter, book, true)?;
    }
    Ok(())
}

fn ask_name<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<(String, String)> {
    let first = prompter.ask("First Name: ")?;
    let last = prompter.ask("Last Name: ")?;
    Ok((first, last))
}

fn edit_contact_action<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    book: &mut AddressBook,
) -> Result<()> {
    let (first, last) = ask_name(prompter)?;
    let current = book.find_contact(&first, &last)?.clone();

    prompter.say("Press Enter to keep the current value.")?;
    let changes = ContactUpdate {
        first_name: prompter.ask_change("First Name", &current.first_name, FieldRule::Name)?,
        last_name: prompter.ask_change("Last Name", &current.last_name, FieldRule::Name)?,
        address: prompter.ask_change("Address", &current.address, FieldRule::NonEmpty)?,
        city: prompter.ask_change("City", &current.city, FieldRule::NonEmpty)?,
        state: prompter.ask_change("State", &current.state, FieldRule::NonEmpty)?,
        zip_code: prompter.ask_change("ZIP Code", &current.zip_code, FieldRule::ZipCode)?,
        phone_number: prompter.ask_change("Phone Number", &current.phone_number, FieldRule::PhoneNumber)?,
        email: prompter.ask_change("Email", &current.email, FieldRule::Email)?,
    };

    if changes.is_empty() {
        return prompter.say("Nothing changed.");
    }
    let edited = book.edit_contact(&first, &last, changes)?;
    let text = format!("Contact updated.\n{}", edited);
    prompter.say(text)
}

fn delete_contact_action<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    book: &mut AddressBook,
) -> Result<()> {
    let (first, last) = ask_name(prompter)?;
    let removed = book.delete_contact(&first, &last)?;
    prompter.say(format!("Deleted {} {}.", removed.first_name, removed.last_name))
}

fn display_action<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    book: &AddressBook,
) -> Result<()> {
    let sort_key: SortKey = prompter.ask("Sort by (none/name/city): ")?.parse()?;
    let text = book
        .display_contacts(sort_key)?
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join("\n\n");
    prompter.say(text)
}

fn search_action<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    book: &AddressBook,
) -> Result<()> {
    let location = prompter.ask_valid("City or state: ", FieldRule::NonEmpty)?;
    let matches = book.search_by_location(&location);
    if matches.is_empty() {
        return prompter.say(format!("No contacts found in {}.", location));
    }
    let text = matches
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join("\n\n");
    prompter.say(text)
}
