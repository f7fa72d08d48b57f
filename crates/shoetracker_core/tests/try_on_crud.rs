use shoetracker_core::db::open_db_in_memory;
use shoetracker_core::{
    RepoError, SqliteTryOnRepository, TryOn, TryOnDraft, TryOnRepository, TryOnValidationError,
};
use uuid::Uuid;

fn try_on_at(name: &str, date: i64) -> TryOn {
    let mut draft = TryOnDraft::new(name);
    draft.date = date;
    TryOn::create(draft).unwrap()
}

#[test]
fn create_and_get_roundtrip_preserves_every_field() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTryOnRepository::new(&conn);

    let draft = TryOnDraft {
        name: "Air Max 90".to_string(),
        details: "Runs half a size small".to_string(),
        rating: 8.0,
        purchased: true,
        size: "10.5 US".to_string(),
        date: 1_741_600_000_000,
        color: "Infrared".to_string(),
        width: "2E".to_string(),
        location: "Foot Locker".to_string(),
    };
    let try_on = TryOn::create(draft.clone()).unwrap();
    let id = repo.create_try_on(&try_on).unwrap();

    let loaded = repo.get_try_on(id).unwrap().unwrap();
    assert_eq!(loaded.id, try_on.id);
    assert_eq!(loaded.to_draft(), draft);
}

#[test]
fn get_missing_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTryOnRepository::new(&conn);

    assert!(repo.get_try_on(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn list_orders_by_date_descending() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTryOnRepository::new(&conn);

    let oldest = try_on_at("oldest", 1_000);
    let newest = try_on_at("newest", 3_000);
    let middle = try_on_at("middle", 2_000);
    for try_on in [&oldest, &newest, &middle] {
        repo.create_try_on(try_on).unwrap();
    }

    let names: Vec<String> = repo
        .list_try_ons()
        .unwrap()
        .into_iter()
        .map(|try_on| try_on.name)
        .collect();
    assert_eq!(names, vec!["newest", "middle", "oldest"]);
}

#[test]
fn list_breaks_date_ties_by_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTryOnRepository::new(&conn);

    let a = try_on_at("a", 5_000);
    let b = try_on_at("b", 5_000);
    repo.create_try_on(&a).unwrap();
    repo.create_try_on(&b).unwrap();

    let mut expected = vec![a.id.to_string(), b.id.to_string()];
    expected.sort();
    let actual: Vec<String> = repo
        .list_try_ons()
        .unwrap()
        .into_iter()
        .map(|try_on| try_on.id.to_string())
        .collect();
    assert_eq!(actual, expected);
}

#[test]
fn delete_removes_exactly_one_and_keeps_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTryOnRepository::new(&conn);

    let records: Vec<TryOn> = (0..4)
        .map(|index| try_on_at(&format!("shoe {index}"), 1_000 * (index + 1)))
        .collect();
    for try_on in &records {
        repo.create_try_on(try_on).unwrap();
    }

    repo.delete_try_on(records[1].id).unwrap();

    let remaining: Vec<_> = repo
        .list_try_ons()
        .unwrap()
        .into_iter()
        .map(|try_on| try_on.id)
        .collect();
    assert_eq!(remaining, vec![records[3].id, records[2].id, records[0].id]);
    assert_eq!(repo.count_try_ons().unwrap(), 3);
}

#[test]
fn delete_missing_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTryOnRepository::new(&conn);

    let id = Uuid::new_v4();
    let err = repo.delete_try_on(id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(missing) if missing == id));
}

#[test]
fn duplicate_id_is_rejected_by_store() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTryOnRepository::new(&conn);

    let try_on = try_on_at("Air Max", 1_000);
    repo.create_try_on(&try_on).unwrap();
    let err = repo.create_try_on(&try_on).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
}

#[test]
fn validation_failure_blocks_create() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTryOnRepository::new(&conn);

    let mut invalid = try_on_at("Air Max", 1_000);
    invalid.rating = 42.0;

    let err = repo.create_try_on(&invalid).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(TryOnValidationError::RatingOutOfRange(_))
    ));
    assert_eq!(repo.count_try_ons().unwrap(), 0);
}

#[test]
fn corrupted_row_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO try_ons (id, name, rating, date) VALUES ('not-a-uuid', 'Air Max', 5.0, 0);",
        [],
    )
    .unwrap();
    let repo = SqliteTryOnRepository::new(&conn);

    let err = repo.list_try_ons().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
