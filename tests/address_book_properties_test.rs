use small_address_book::{
    AddressBookError, AddressBookSystem, Contact, ContactUpdate, SortKey,
};

fn contact(first: &str, last: &str, city: &str, state: &str) -> Contact {
    Contact::new(
        first,
        last,
        "1 Main Street",
        city,
        state,
        "123456",
        "9876543210",
        "someone@example.com",
    )
}

fn system_with_books() -> AddressBookSystem {
    let mut system = AddressBookSystem::new();

    let family = system.create_book("Family").unwrap();
    family.add_contact(contact("Bob", "Zane", "Austin", "Texas")).unwrap();
    family.add_contact(contact("Amy", "Young", "Pune", "Maharashtra")).unwrap();

    let work = system.create_book("Work").unwrap();
    work.add_contact(contact("Cat", "Moss", "Dallas", "Austin")).unwrap();
    work.add_contact(contact("Dan", "Hill", "austin", "Texas")).unwrap();
    work.add_contact(contact("Eve", "Stone", "Leeds", "Yorkshire")).unwrap();

    system
}

#[test]
fn test_find_returns_exact_fields_in_any_case() {
    let system = system_with_books();
    let work = system.select_book("Work").unwrap();

    for (first, last) in [("cat", "moss"), ("CAT", "MOSS"), ("Cat", "Moss")] {
        let found = work.find_contact(first, last).unwrap();
        assert_eq!(*found, contact("Cat", "Moss", "Dallas", "Austin"));
    }
}

#[test]
fn test_duplicate_names_rejected_across_case() {
    let mut system = system_with_books();
    let family = system.select_book_mut("Family").unwrap();

    let err = family
        .add_contact(contact("AMY", "young", "Leeds", "Yorkshire"))
        .unwrap_err();
    assert!(matches!(err, AddressBookError::DuplicateContact { .. }));
    assert_eq!(family.len(), 2);
}

#[test]
fn test_same_name_allowed_in_different_books() {
    let mut system = system_with_books();
    let work = system.select_book_mut("Work").unwrap();
    assert!(work.add_contact(contact("Amy", "Young", "Leeds", "Yorkshire")).is_ok());
}

#[test]
fn test_edit_then_search_sees_new_city() {
    let mut system = system_with_books();
    system
        .select_book_mut("Family")
        .unwrap()
        .edit_contact(
            "amy",
            "young",
            ContactUpdate {
                city: Some("Austin".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    let family = system.select_book("Family").unwrap();
    let names: Vec<&str> = family
        .search_by_location("AUSTIN")
        .iter()
        .map(|c| c.first_name.as_str())
        .collect();
    assert_eq!(names, vec!["Bob", "Amy"]);
    assert_eq!(family.find_contact("Amy", "Young").unwrap().state, "Maharashtra");
}

#[test]
fn test_sorted_views_do_not_reorder_storage() {
    let system = system_with_books();
    let family = system.select_book("Family").unwrap();

    let by_name: Vec<&str> = family
        .display_contacts(SortKey::Name)
        .unwrap()
        .iter()
        .map(|c| c.first_name.as_str())
        .collect();
    assert_eq!(by_name, vec!["Amy", "Bob"]);

    let by_city: Vec<&str> = family
        .display_contacts(SortKey::City)
        .unwrap()
        .iter()
        .map(|c| c.city.as_str())
        .collect();
    assert_eq!(by_city, vec!["Austin", "Pune"]);

    assert_eq!(family.contacts()[0].first_name, "Bob");
}

#[test]
fn test_location_search_matches_city_or_state() {
    let system = system_with_books();
    let results = system.search_across("Austin");

    let family: Vec<&str> = results[0].1.iter().map(|c| c.first_name.as_str()).collect();
    let work: Vec<&str> = results[1].1.iter().map(|c| c.first_name.as_str()).collect();
    assert_eq!(results[0].0, "Family");
    assert_eq!(family, vec!["Bob"]);
    assert_eq!(results[1].0, "Work");
    assert_eq!(work, vec!["Cat", "Dan"]);
}

#[test]
fn test_count_equals_sum_of_book_searches() {
    let system = system_with_books();
    for location in ["Austin", "texas", "Yorkshire", "Nowhere"] {
        let expected: usize = system
            .book_names()
            .iter()
            .map(|name| system.select_book(name).unwrap().search_by_location(location).len())
            .sum();
        assert_eq!(system.count_by_location(location), expected, "{}", location);
    }
    assert_eq!(system.count_by_location("Austin"), 3);
}

#[test]
fn test_recreating_book_does_not_replace_contents() {
    let mut system = system_with_books();
    assert!(matches!(
        system.create_book("Work"),
        Err(AddressBookError::AddressBookAlreadyExists { .. })
    ));
    assert_eq!(system.select_book("Work").unwrap().len(), 3);
}

#[test]
fn test_delete_unknown_contact_keeps_collection() {
    let mut system = system_with_books();
    let work = system.select_book_mut("Work").unwrap();
    let before = work.contacts().to_vec();

    assert!(matches!(
        work.delete_contact("Amy", "Young"),
        Err(AddressBookError::ContactNotFound { .. })
    ));
    assert_eq!(work.contacts(), before.as_slice());
}
