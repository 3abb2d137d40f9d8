use attendance_core::{AttendanceApp, AttendanceStatus, NewClass, Store};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(5);
const QUIET: Duration = Duration::from_millis(50);

#[test]
fn first_item_is_current_snapshot() {
    let app = AttendanceApp::open_in_memory().unwrap();
    app.add_class("Existing", "Math").unwrap();

    let mut classes = app.classes().watch_classes();
    let first = classes.try_next().unwrap().unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].name, "Existing");

    assert!(classes.try_next().is_none());
}

#[test]
fn insert_triggers_new_snapshot() {
    let app = AttendanceApp::open_in_memory().unwrap();
    let mut classes = app.classes().watch_classes();
    assert!(classes.try_next().unwrap().unwrap().is_empty());

    app.add_class("BSIT 3A", "ITEW3").unwrap();

    let next = classes.next_timeout(WAIT).unwrap().unwrap();
    assert_eq!(next.len(), 1);
    assert_eq!(next[0].name, "BSIT 3A");
}

#[test]
fn unrelated_writes_do_not_emit() {
    let app = AttendanceApp::open_in_memory().unwrap();
    let class_id = app.add_class("A", "Math").unwrap();
    let student_id = app.add_student("Alice", "001", class_id).unwrap();

    let mut classes = app.classes().watch_classes();
    classes.try_next().unwrap().unwrap();

    app.add_student("Bob", "002", class_id).unwrap();
    app.mark_attendance(student_id, "2024-03-01", AttendanceStatus::Present)
        .unwrap();

    assert!(classes.next_timeout(QUIET).is_none());
}

#[test]
fn failed_writes_do_not_emit() {
    let app = AttendanceApp::open_in_memory().unwrap();
    let mut classes = app.classes().watch_classes();
    classes.try_next().unwrap().unwrap();

    assert!(app.classes().insert_class(&NewClass::new("", "Math")).is_err());

    assert!(classes.try_next().is_none());
}

#[test]
fn bursts_are_coalesced_into_latest_state() {
    let app = AttendanceApp::open_in_memory().unwrap();
    let class_id = app.add_class("A", "Math").unwrap();
    let mut students = app.students().watch_students_by_class(class_id);
    students.try_next().unwrap().unwrap();

    for (name, number) in [("Carol", "003"), ("Alice", "001"), ("Bob", "002")] {
        app.add_student(name, number, class_id).unwrap();
    }

    let latest = students.try_next().unwrap().unwrap();
    let names: Vec<String> = latest.into_iter().map(|student| student.name).collect();
    assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
    assert!(students.try_next().is_none());
}

#[test]
fn class_day_view_follows_marks() {
    let app = AttendanceApp::open_in_memory().unwrap();
    let class_id = app.add_class("A", "Math").unwrap();
    let alice = app.add_student("Alice", "001", class_id).unwrap();
    let mut day = app
        .attendance()
        .watch_attendance_by_date_and_class("2024-03-01", class_id);
    assert!(day.try_next().unwrap().unwrap().is_empty());

    app.mark_attendance(alice, "2024-03-01", AttendanceStatus::Present)
        .unwrap();
    let marked = day.next_timeout(WAIT).unwrap().unwrap();
    assert_eq!(marked.len(), 1);
    assert_eq!(marked[0].status, AttendanceStatus::Present);

    app.mark_attendance(alice, "2024-03-01", AttendanceStatus::Absent)
        .unwrap();
    let remarked = day.next_timeout(WAIT).unwrap().unwrap();
    assert_eq!(remarked[0].status, AttendanceStatus::Absent);
}

#[test]
fn student_history_is_newest_first_and_empties_after_delete() {
    let app = AttendanceApp::open_in_memory().unwrap();
    let class_id = app.add_class("A", "Math").unwrap();
    let alice = app.add_student("Alice", "001", class_id).unwrap();
    app.mark_attendance(alice, "2024-03-01", AttendanceStatus::Present).unwrap();
    app.mark_attendance(alice, "2024-03-02", AttendanceStatus::Late).unwrap();

    let mut history = app.attendance().watch_attendance_by_student(alice);
    let dates: Vec<String> = history
        .try_next()
        .unwrap()
        .unwrap()
        .into_iter()
        .map(|record| record.date)
        .collect();
    assert_eq!(dates, vec!["2024-03-02", "2024-03-01"]);

    app.classes().delete_class(class_id).unwrap();
    assert!(history.next_timeout(WAIT).unwrap().unwrap().is_empty());
}

#[test]
fn query_can_be_consumed_on_another_thread() {
    let app = AttendanceApp::open_in_memory().unwrap();
    let classes = app.classes().watch_classes();
    let (sender, receiver) = mpsc::channel();

    let worker = thread::spawn(move || {
        for snapshot in classes.take(2) {
            sender.send(snapshot.unwrap().len()).unwrap();
        }
    });

    assert_eq!(receiver.recv_timeout(WAIT).unwrap(), 0);
    app.add_class("A", "Math").unwrap();
    assert_eq!(receiver.recv_timeout(WAIT).unwrap(), 1);
    worker.join().unwrap();
}

#[test]
fn sequence_ends_when_store_is_dropped() {
    let app = AttendanceApp::open_in_memory().unwrap();
    let mut classes = app.classes().watch_classes();
    classes.try_next().unwrap().unwrap();

    drop(app);

    assert!(classes.next().is_none());
    assert!(classes.snapshot().is_err());
}

#[test]
fn dropped_queries_are_detached() {
    let store = Store::open_in_memory().unwrap();
    let app = AttendanceApp::from_store(store.clone());

    let classes = app.classes().watch_classes();
    let _kept = app.classes().watch_classes();
    assert_eq!(store.live_query_count(), 2);

    drop(classes);
    app.add_class("A", "Math").unwrap();
    assert_eq!(store.live_query_count(), 1);
}

#[test]
fn snapshot_does_not_consume_pending_change() {
    let app = AttendanceApp::open_in_memory().unwrap();
    let mut classes = app.classes().watch_classes();
    classes.try_next().unwrap().unwrap();

    app.add_class("A", "Math").unwrap();
    assert_eq!(classes.snapshot().unwrap().len(), 1);
    assert_eq!(classes.try_next().unwrap().unwrap().len(), 1);
}
