use anyhow::Result;
use small_address_book::{AddressBook, AddressBookSystem, Contact, LocalStorage, StorageFormat};
use tempfile::TempDir;

fn contact(first: &str, last: &str, address: &str, city: &str, state: &str) -> Contact {
    Contact::new(
        first,
        last,
        address,
        city,
        state,
        "560001",
        "9876543210",
        "someone@example.com",
    )
}

fn sample_book() -> AddressBook {
    let mut book = AddressBook::new("Friends");
    book.add_contact(contact("Zoe", "Adams", "7 Park Lane", "Austin", "Texas"))
        .unwrap();
    book.add_contact(contact("Amy", "Young", "12 Lake Road", "Bengaluru", "Karnataka"))
        .unwrap();
    book.add_contact(contact("Raj", "Kumar", "\"Rose\" Villa", "Mysuru", "Karnataka"))
        .unwrap();
    book
}

/// 每種格式存檔後重新載入應得到相同的聯絡人與順序
#[test]
fn test_round_trip_every_format_on_disk() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path());
    let book = sample_book();

    for format in StorageFormat::ALL {
        let file_name = book.save(&storage, format)?;
        assert!(temp_dir.path().join(&file_name).is_file());

        let reloaded = AddressBook::open("Friends", &storage, format)?;
        assert_eq!(reloaded.contacts(), book.contacts(), "format {}", format);
    }
    Ok(())
}

#[test]
fn test_round_trip_empty_book() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path());
    let book = AddressBook::new("Empty");

    for format in StorageFormat::ALL {
        book.save(&storage, format)?;
        assert!(AddressBook::open("Empty", &storage, format)?.is_empty());
    }
    Ok(())
}

#[test]
fn test_csv_and_json_keep_commas_txt_does_not() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path());

    let mut book = AddressBook::new("Commas");
    book.add_contact(contact("Amy", "Young", "4, Hill Street", "Pune", "Maharashtra"))?;
    book.add_contact(contact("Bob", "Zane", "9 Elm Road", "Pune", "Maharashtra"))?;

    for format in [StorageFormat::Csv, StorageFormat::Json] {
        book.save(&storage, format)?;
        assert_eq!(AddressBook::open("Commas", &storage, format)?.contacts(), book.contacts());
    }

    book.save(&storage, StorageFormat::Txt)?;
    let reloaded = AddressBook::open("Commas", &storage, StorageFormat::Txt)?;
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.contacts()[0].first_name, "Bob");
    Ok(())
}

#[test]
fn test_txt_file_layout() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path());

    let mut book = AddressBook::new("Layout");
    book.add_contact(contact("Amy", "Young", "12 Lake Road", "Austin", "Texas"))?;
    book.save(&storage, StorageFormat::Txt)?;

    let content = std::fs::read_to_string(temp_dir.path().join("Layout.txt"))?;
    assert_eq!(
        content,
        "Amy,Young,12 Lake Road,Austin,Texas,560001,9876543210,someone@example.com\n"
    );
    Ok(())
}

#[test]
fn test_json_file_is_pretty_array() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path());
    sample_book().save(&storage, StorageFormat::Json)?;

    let content = std::fs::read_to_string(temp_dir.path().join("Friends.json"))?;
    assert!(content.starts_with("[\n"));
    let value: serde_json::Value = serde_json::from_str(&content)?;
    assert_eq!(value.as_array().map(|a| a.len()), Some(3));
    assert_eq!(value[0]["first_name"], "Zoe");
    assert_eq!(value[2]["address"], "\"Rose\" Villa");
    Ok(())
}

#[test]
fn test_hand_edited_files_skip_bad_records() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir.path().join("Club.csv"),
        "First Name,Last Name,Address,City,State,Zip Code,Phone Number,Email\n\
         Amy,Young,12 Lake Road,Austin,Texas,560001,9876543210\n\
         Bob,Zane,9 Elm Road,Pune,Maharashtra,411001,9123456780,bob@mail.in\n",
    )?;
    std::fs::write(
        temp_dir.path().join("Club.txt"),
        "Bob,Zane,9 Elm Road,Pune,Maharashtra,411001,9123456780,bob@mail.in\n\
         only,three,fields\n",
    )?;
    let storage = LocalStorage::new(temp_dir.path());

    for format in [StorageFormat::Csv, StorageFormat::Txt] {
        let book = AddressBook::open("Club", &storage, format)?;
        assert_eq!(book.len(), 1, "format {}", format);
        assert_eq!(book.contacts()[0].first_name, "Bob");
    }
    Ok(())
}

#[test]
fn test_missing_files_start_empty() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path().join("not-created-yet"));

    let mut system = AddressBookSystem::new();
    for format in StorageFormat::ALL {
        let name = format!("Book{}", format.extension());
        assert!(system.open_book(&name, &storage, format)?.is_empty());
    }
    Ok(())
}

#[test]
fn test_save_all_writes_one_file_per_book() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path().join("data"));

    let mut system = AddressBookSystem::new();
    system
        .create_book("Family")?
        .add_contact(contact("Amy", "Young", "12 Lake Road", "Austin", "Texas"))?;
    system.create_book("Work")?;

    let reports = system.save_all(&storage, StorageFormat::Csv);
    assert!(reports.iter().all(|r| r.result.is_ok()));
    assert!(temp_dir.path().join("data/Family.csv").is_file());
    assert!(temp_dir.path().join("data/Work.csv").is_file());
    Ok(())
}

#[test]
fn test_load_without_snapshot_keeps_contacts() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path());

    let mut book = sample_book();
    for format in StorageFormat::ALL {
        assert_eq!(book.load(&storage, format)?, 0);
        assert_eq!(book.len(), 3, "format {}", format);
    }
    Ok(())
}

#[test]
fn test_corrupt_snapshot_does_not_register_book() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("Family.json"), "{ broken")?;
    let storage = LocalStorage::new(temp_dir.path());

    let mut system = AddressBookSystem::new();
    assert!(system.open_book("Family", &storage, StorageFormat::Json).is_err());
    assert!(system.open_book("Work", &storage, StorageFormat::Json).is_ok());
    assert_eq!(system.book_names(), vec!["Work"]);
    Ok(())
}

#[test]
fn test_book_names_stay_inside_data_dir() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path().join("data"));

    let mut system = AddressBookSystem::new();
    assert!(system.create_book("../outside").is_err());
    assert!(system.create_book("nested/inside").is_err());

    // 直接建立的通訊錄仍由儲存層擋下
    let stray = AddressBook::new("../outside");
    assert!(stray.save(&storage, StorageFormat::Txt).is_err());
    assert!(!temp_dir.path().join("outside.txt").exists());
    Ok(())
}
