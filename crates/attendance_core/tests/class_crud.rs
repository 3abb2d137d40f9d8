use attendance_core::{
    ClassRecord, ClassRepository, ClassService, NewClass, RepoError, SqliteClassRepository,
    Store, ValidationError,
};

fn class_service() -> ClassService<SqliteClassRepository> {
    let store = Store::open_in_memory().unwrap();
    ClassService::new(SqliteClassRepository::new(store))
}

#[test]
fn insert_and_get_roundtrip() {
    let service = class_service();

    let id = service
        .insert_class(&NewClass::new("BSIT 3A", "ITEW3"))
        .unwrap();

    let loaded = service.get_class(id).unwrap().unwrap();
    assert_eq!(
        loaded,
        ClassRecord {
            id,
            name: "BSIT 3A".to_string(),
            subject: "ITEW3".to_string(),
        }
    );
}

#[test]
fn get_missing_class_returns_none() {
    let service = class_service();
    assert!(service.get_class(42).unwrap().is_none());
}

#[test]
fn generated_ids_are_unique() {
    let service = class_service();
    let first = service.insert_class(&NewClass::new("A", "Math")).unwrap();
    let second = service.insert_class(&NewClass::new("A", "Math")).unwrap();
    assert_ne!(first, second);
}

#[test]
fn update_replaces_full_record() {
    let service = class_service();
    let id = service.insert_class(&NewClass::new("Draft", "TBD")).unwrap();

    let changed = service
        .update_class(&ClassRecord {
            id,
            name: "BSCS 2B".to_string(),
            subject: "Data Structures".to_string(),
        })
        .unwrap();
    assert!(changed);

    let loaded = service.get_class(id).unwrap().unwrap();
    assert_eq!(loaded.name, "BSCS 2B");
    assert_eq!(loaded.subject, "Data Structures");
}

#[test]
fn update_and_delete_of_missing_class_report_false() {
    let service = class_service();
    let ghost = ClassRecord {
        id: 7,
        name: "Ghost".to_string(),
        subject: "None".to_string(),
    };

    assert!(!service.update_class(&ghost).unwrap());
    assert!(!service.delete_class(7).unwrap());
}

#[test]
fn list_is_ordered_by_name() {
    let service = class_service();
    for name in ["Zeta", "Alpha", "Mu"] {
        service.insert_class(&NewClass::new(name, "Subject")).unwrap();
    }

    let names: Vec<String> = service
        .list_classes()
        .unwrap()
        .into_iter()
        .map(|class| class.name)
        .collect();
    assert_eq!(names, vec!["Alpha", "Mu", "Zeta"]);
}

#[test]
fn blank_fields_are_rejected_before_sql() {
    let store = Store::open_in_memory().unwrap();
    let repo = SqliteClassRepository::new(store.clone());

    let err = repo.insert_class(&NewClass::new(" ", "Math")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyClassName)
    ));

    let rows: i64 = store.with_connection(|conn| {
        conn.query_row("SELECT COUNT(*) FROM classes;", [], |row| row.get(0))
            .unwrap()
    });
    assert_eq!(rows, 0);
}
