use attendance_core::{AttendanceApp, AttendanceStatus};

fn row_count(app: &AttendanceApp, table: &str) -> i64 {
    app.store().with_connection(|conn| {
        conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
            row.get(0)
        })
        .unwrap()
    })
}

#[test]
fn deleting_class_removes_its_students_and_attendance() {
    let app = AttendanceApp::open_in_memory().unwrap();
    let doomed = app.add_class("Doomed", "Math").unwrap();
    let kept = app.add_class("Kept", "Math").unwrap();
    let alice = app.add_student("Alice", "001", doomed).unwrap();
    let bob = app.add_student("Bob", "002", doomed).unwrap();
    let carol = app.add_student("Carol", "003", kept).unwrap();
    for student in [alice, bob, carol] {
        app.mark_attendance(student, "2024-03-01", AttendanceStatus::Present)
            .unwrap();
    }

    assert!(app.classes().delete_class(doomed).unwrap());

    assert!(app.classes().get_class(doomed).unwrap().is_none());
    assert!(app.students().get_student(alice).unwrap().is_none());
    assert!(app.students().get_student(bob).unwrap().is_none());
    assert_eq!(row_count(&app, "students"), 1);
    assert_eq!(row_count(&app, "attendance"), 1);
    assert!(app
        .attendance()
        .get_attendance(carol, "2024-03-01")
        .unwrap()
        .is_some());
}

#[test]
fn deleting_student_removes_only_their_attendance() {
    let app = AttendanceApp::open_in_memory().unwrap();
    let class_id = app.add_class("A", "Math").unwrap();
    let alice = app.add_student("Alice", "001", class_id).unwrap();
    let bob = app.add_student("Bob", "002", class_id).unwrap();
    app.mark_attendance(alice, "2024-03-01", AttendanceStatus::Present).unwrap();
    app.mark_attendance(alice, "2024-03-02", AttendanceStatus::Absent).unwrap();
    app.mark_attendance(bob, "2024-03-01", AttendanceStatus::Late).unwrap();

    assert!(app.students().delete_student(alice).unwrap());

    assert_eq!(row_count(&app, "attendance"), 1);
    assert_eq!(app.attendance_stats(alice).unwrap().total, 0);
    assert_eq!(app.attendance_stats(bob).unwrap().late, 1);
}

#[test]
fn no_orphans_remain_after_cascade() {
    let app = AttendanceApp::open_in_memory().unwrap();
    let class_id = app.add_class("A", "Math").unwrap();
    let alice = app.add_student("Alice", "001", class_id).unwrap();
    app.mark_attendance(alice, "2024-03-01", AttendanceStatus::Present).unwrap();

    app.classes().delete_class(class_id).unwrap();

    let orphans: i64 = app.store().with_connection(|conn| {
        conn.query_row(
            "SELECT
                (SELECT COUNT(*) FROM students s
                 LEFT JOIN classes c ON c.id = s.class_id WHERE c.id IS NULL)
              + (SELECT COUNT(*) FROM attendance a
                 LEFT JOIN students s ON s.id = a.student_id WHERE s.id IS NULL);",
            [],
            |row| row.get(0),
        )
        .unwrap()
    });
    assert_eq!(orphans, 0);
}
