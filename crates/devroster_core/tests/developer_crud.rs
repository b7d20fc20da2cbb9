use devroster_core::db::open_db_in_memory;
use devroster_core::{Developer, DeveloperRepository, RepoError, SqliteDeveloperRepository, Status};
use rusqlite::Connection;

fn john_doe() -> Developer {
    Developer::new("John", "Doe", "john.doe@mail.com", "Java")
}

fn mike_smith() -> Developer {
    Developer::new("Mike", "Smith", "mike.smith@mail.com", "Java")
}

fn frank_jones() -> Developer {
    let mut developer = Developer::new("Frank", "Jones", "frank.jones@mail.com", "Java");
    developer.deactivate();
    developer
}

#[test]
fn save_assigns_id_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDeveloperRepository::try_new(&conn).unwrap();

    let persisted = repo.save(&john_doe()).unwrap();
    let id = persisted.id.expect("save must assign an id");
    assert!(id > 0);

    let loaded = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(loaded, persisted);
    assert_eq!(loaded.email, "john.doe@mail.com");
    assert_eq!(loaded.status, Status::Active);
}

#[test]
fn save_assigns_distinct_increasing_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDeveloperRepository::try_new(&conn).unwrap();

    let first = repo.save(&john_doe()).unwrap();
    let second = repo.save(&mike_smith()).unwrap();

    assert!(second.id.unwrap() > first.id.unwrap());
}

#[test]
fn save_with_id_overwrites_all_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDeveloperRepository::try_new(&conn).unwrap();

    let mut persisted = repo.save(&john_doe()).unwrap();
    persisted.email = "updated@mail.com".to_string();
    persisted.specialty = "Rust".to_string();
    persisted.status = Status::Deleted;
    repo.save(&persisted).unwrap();

    let loaded = repo.find_by_id(persisted.id.unwrap()).unwrap().unwrap();
    assert_eq!(loaded.email, "updated@mail.com");
    assert_eq!(loaded.specialty, "Rust");
    assert_eq!(loaded.status, Status::Deleted);

    let all = repo.find_all().unwrap();
    assert_eq!(all.len(), 1);
}

#[test]
fn find_by_email_matches_exactly() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDeveloperRepository::try_new(&conn).unwrap();

    repo.save(&john_doe()).unwrap();

    let found = repo.find_by_email("john.doe@mail.com").unwrap().unwrap();
    assert_eq!(found.first_name, "John");

    assert!(repo.find_by_email("John.Doe@mail.com").unwrap().is_none());
    assert!(repo.find_by_email("absent@mail.com").unwrap().is_none());
}

#[test]
fn find_by_email_returns_deactivated_records() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDeveloperRepository::try_new(&conn).unwrap();

    repo.save(&frank_jones()).unwrap();

    let found = repo.find_by_email("frank.jones@mail.com").unwrap().unwrap();
    assert_eq!(found.status, Status::Deleted);
}

#[test]
fn exists_by_id_reflects_store_contents() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDeveloperRepository::try_new(&conn).unwrap();

    let persisted = repo.save(&john_doe()).unwrap();

    assert!(repo.exists_by_id(persisted.id.unwrap()).unwrap());
    assert!(!repo.exists_by_id(999).unwrap());
}

#[test]
fn find_all_returns_every_status_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDeveloperRepository::try_new(&conn).unwrap();

    let a = repo.save(&john_doe()).unwrap();
    let b = repo.save(&mike_smith()).unwrap();
    let c = repo.save(&frank_jones()).unwrap();

    let all = repo.find_all().unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(
        all.iter().map(|d| d.id).collect::<Vec<_>>(),
        vec![a.id, b.id, c.id]
    );
    assert_eq!(all[2].status, Status::Deleted);
}

#[test]
fn find_active_by_specialty_filters_status_and_specialty() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDeveloperRepository::try_new(&conn).unwrap();

    repo.save(&john_doe()).unwrap();
    repo.save(&mike_smith()).unwrap();
    repo.save(&frank_jones()).unwrap();
    repo.save(&Developer::new("Ada", "Young", "ada.young@mail.com", "Rust"))
        .unwrap();

    let java = repo.find_active_by_specialty("Java").unwrap();
    assert_eq!(java.len(), 2);
    assert!(java.iter().all(|d| d.specialty == "Java" && d.is_active()));

    // Exact match only.
    assert!(repo.find_active_by_specialty("java").unwrap().is_empty());
    assert!(repo.find_active_by_specialty("Cobol").unwrap().is_empty());
}

#[test]
fn delete_by_id_removes_row_and_tolerates_absent_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDeveloperRepository::try_new(&conn).unwrap();

    let persisted = repo.save(&john_doe()).unwrap();
    let id = persisted.id.unwrap();

    repo.delete_by_id(id).unwrap();
    assert!(repo.find_by_id(id).unwrap().is_none());
    assert!(repo.find_by_email("john.doe@mail.com").unwrap().is_none());

    // Absent id is a benign no-op at the store level.
    repo.delete_by_id(id).unwrap();
}

#[test]
fn unknown_persisted_status_is_rejected_on_read() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO developers (first_name, last_name, email, specialty, status)
         VALUES ('Bad', 'Row', 'bad.row@mail.com', 'Java', 'SUSPENDED');",
        [],
    )
    .unwrap();

    let repo = SqliteDeveloperRepository::try_new(&conn).unwrap();
    let err = repo.find_by_email("bad.row@mail.com").unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn try_new_requires_migrated_schema() {
    let conn = Connection::open_in_memory().unwrap();

    let err = SqliteDeveloperRepository::try_new(&conn).unwrap_err();
    assert!(matches!(err, RepoError::MissingRequiredTable("developers")));
}
