use catrecord_core::db::open_db_in_memory;
use catrecord_core::{Cat, CatRepository, RepoError, SqliteCatRepository};

fn names(cats: &[Cat]) -> Vec<&str> {
    cats.iter().map(|cat| cat.name.as_str()).collect()
}

#[test]
fn save_assigns_id_on_insert_and_get_roundtrips() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatRepository::new(&conn);

    let mut cat = Cat::new("Leo", 3);
    cat.identificator = Some("leo-3".to_string());
    let saved = repo.save(&cat).unwrap();

    let id = saved.id.expect("insert should assign an id");
    let loaded = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(loaded, saved);
    assert_eq!(loaded.name, "Leo");
    assert_eq!(loaded.age, 3);
    assert_eq!(loaded.identificator.as_deref(), Some("leo-3"));
}

#[test]
fn save_with_id_updates_in_place() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatRepository::new(&conn);

    let mut saved = repo.save(&Cat::new("Leo", 3)).unwrap();
    saved.name = "Milo".to_string();
    saved.age = 4;
    let updated = repo.save(&saved).unwrap();

    assert_eq!(updated.id, saved.id);
    assert_eq!(repo.find_all().unwrap().len(), 1);
    let loaded = repo.find_by_id(saved.id.unwrap()).unwrap().unwrap();
    assert_eq!(loaded.name, "Milo");
    assert_eq!(loaded.age, 4);
}

#[test]
fn find_by_id_returns_none_for_missing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatRepository::new(&conn);

    assert!(repo.find_by_id(42).unwrap().is_none());
}

#[test]
fn find_all_is_ordered_by_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatRepository::new(&conn);

    for name in ["Tom", "Leo", "Ada"] {
        repo.save(&Cat::new(name, 1)).unwrap();
    }

    let all = repo.find_all().unwrap();
    assert_eq!(names(&all), vec!["Tom", "Leo", "Ada"]);
    assert!(all.windows(2).all(|pair| pair[0].id < pair[1].id));
}

#[test]
fn find_by_name_is_exact_and_case_sensitive() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatRepository::new(&conn);

    for name in ["Leo", "leo", "Leonard"] {
        repo.save(&Cat::new(name, 1)).unwrap();
    }

    assert_eq!(names(&repo.find_by_name("Leo").unwrap()), vec!["Leo"]);
    assert!(repo.find_by_name("LEO").unwrap().is_empty());
}

#[test]
fn containing_ignore_case_matches_substrings_in_any_case() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatRepository::new(&conn);

    for name in ["tom", "TOM", "Tomcat", "Atom", "Leo", "Émile"] {
        repo.save(&Cat::new(name, 1)).unwrap();
    }

    let hits = repo.find_by_name_containing_ignore_case("Tom").unwrap();
    assert_eq!(names(&hits), vec!["tom", "TOM", "Tomcat", "Atom"]);

    let accented = repo.find_by_name_containing_ignore_case("éMI").unwrap();
    assert_eq!(names(&accented), vec!["Émile"]);

    let everything = repo.find_by_name_containing_ignore_case("").unwrap();
    assert_eq!(everything.len(), 6);
}

#[test]
fn find_by_age_is_exact() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatRepository::new(&conn);

    repo.save(&Cat::new("Leo", 3)).unwrap();
    repo.save(&Cat::new("Milo", 3)).unwrap();
    repo.save(&Cat::new("Tom", 13)).unwrap();

    assert_eq!(names(&repo.find_by_age(3).unwrap()), vec!["Leo", "Milo"]);
    assert!(repo.find_by_age(30).unwrap().is_empty());
}

#[test]
fn delete_all_removes_listed_and_ignores_unsaved() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatRepository::new(&conn);

    let leo = repo.save(&Cat::new("Leo", 3)).unwrap();
    let milo = repo.save(&Cat::new("Milo", 2)).unwrap();
    let unsaved = Cat::new("Ghost", 9);

    repo.delete_all(&[leo.clone(), unsaved]).unwrap();

    assert!(repo.find_by_id(leo.id.unwrap()).unwrap().is_none());
    assert_eq!(repo.find_all().unwrap(), vec![milo]);
}

#[test]
fn delete_all_with_empty_slice_is_noop() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatRepository::new(&conn);

    repo.save(&Cat::new("Leo", 3)).unwrap();
    repo.delete_all(&[]).unwrap();
    assert_eq!(repo.find_all().unwrap().len(), 1);
}

#[test]
fn out_of_range_age_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO cats (id, name, age) VALUES (7, 'Huge', ?1);",
        [i64::from(i32::MAX) + 1],
    )
    .unwrap();
    let repo = SqliteCatRepository::new(&conn);

    let err = repo.find_by_id(7).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("cats.age")));
}
