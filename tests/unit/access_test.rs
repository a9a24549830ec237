//! Unit tests for authentication and role-scoped visibility.

use runsuite::auth::{AccessController, AccessError, Page, RegisterError, Role, Session};
use runsuite::storage::models::PerformanceRecord;
use runsuite::storage::{Database, RecordStore};

fn login(access: &AccessController<'_, Database>, username: &str) -> Session {
    Session::login(access.authenticate(username, "pw").unwrap())
}

#[test]
fn test_duplicate_registration_rejected() {
    let db = Database::open_in_memory().unwrap();
    let access = AccessController::new(&db);

    assert!(access.register("alice", "pw", Role::Runner).is_ok());
    match access.register("alice", "other", Role::Coach) {
        Err(RegisterError::DuplicateUsername(name)) => assert_eq!(name, "alice"),
        other => panic!("expected duplicate error, got {:?}", other),
    }
    assert_eq!(db.count_users().unwrap(), 1);
}

#[test]
fn test_wrong_password_same_as_unknown_user() {
    let db = Database::open_in_memory().unwrap();
    let access = AccessController::new(&db);
    access.register("alice", "pw", Role::Runner).unwrap();

    let wrong_password = access.authenticate("alice", "nope");
    let unknown_user = access.authenticate("bob", "pw");
    assert!(wrong_password.is_none());
    assert_eq!(wrong_password, unknown_user);
}

#[test]
fn test_coach_sees_only_own_runners_and_records() {
    let db = Database::open_in_memory().unwrap();
    let access = AccessController::new(&db);
    access.register("admin", "pw", Role::Admin).unwrap();
    let coach_a = access.register("coach_a", "pw", Role::Coach).unwrap();
    let coach_b = access.register("coach_b", "pw", Role::Coach).unwrap();

    let admin = login(&access, "admin");
    let t01 = access.create_runner(&admin, "T01", Some(coach_a.id)).unwrap();
    let t02 = access.create_runner(&admin, "T02", Some(coach_b.id)).unwrap();
    access.create_runner(&admin, "T03", None).unwrap();

    db.insert_performance_record(&PerformanceRecord::new(t01.id, 9.1, 8.0, 12.0))
        .unwrap();
    db.insert_performance_record(&PerformanceRecord::new(t02.id, 9.5, 8.2, 12.0))
        .unwrap();

    let session_a = login(&access, "coach_a");
    let runners: Vec<String> = access
        .visible_runners(&session_a)
        .unwrap()
        .into_iter()
        .map(|l| l.runner.name)
        .collect();
    assert_eq!(runners, vec!["T01"]);

    let records = access.visible_records(&session_a).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].runner_name, "T01");
    assert!(access.can_record_for(&session_a, &t01.id).unwrap());
    assert!(!access.can_record_for(&session_a, &t02.id).unwrap());

    assert_eq!(access.visible_runners(&admin).unwrap().len(), 3);
    assert_eq!(access.visible_records(&admin).unwrap().len(), 2);
}

#[test]
fn test_runner_role_shares_default_view() {
    let db = Database::open_in_memory().unwrap();
    let access = AccessController::new(&db);
    access.register("admin", "pw", Role::Admin).unwrap();
    access.register("sprinter", "pw", Role::Runner).unwrap();

    let admin = login(&access, "admin");
    access.create_runner(&admin, "T01", None).unwrap();

    let runner = login(&access, "sprinter");
    assert_eq!(access.visible_runners(&runner).unwrap().len(), 1);
    assert!(matches!(
        access.list_users(&runner),
        Err(AccessError::Forbidden(Page::ManageUsers))
    ));
}

#[test]
fn test_only_coaches_are_assignable() {
    let db = Database::open_in_memory().unwrap();
    let access = AccessController::new(&db);
    access.register("admin", "pw", Role::Admin).unwrap();
    access.register("coach1", "pw", Role::Coach).unwrap();
    access.register("sprinter", "pw", Role::Runner).unwrap();

    let admin = login(&access, "admin");
    let coaches = access.assignable_coaches(&admin).unwrap();
    assert_eq!(coaches.len(), 1);
    assert_eq!(coaches[0].username, "coach1");
}

#[test]
fn test_my_runner_stats() {
    let db = Database::open_in_memory().unwrap();
    let access = AccessController::new(&db);
    access.register("admin", "pw", Role::Admin).unwrap();
    let coach = access.register("coach1", "pw", Role::Coach).unwrap();

    let admin = login(&access, "admin");
    let t01 = access.create_runner(&admin, "T01", Some(coach.id)).unwrap();
    access.create_runner(&admin, "T02", Some(coach.id)).unwrap();
    db.insert_performance_record(&PerformanceRecord::new(t01.id, 9.0, 8.0, 12.0))
        .unwrap();
    db.insert_performance_record(&PerformanceRecord::new(t01.id, 10.0, 8.5, 12.0))
        .unwrap();

    let session = login(&access, "coach1");
    let stats = access.my_runner_stats(&session).unwrap();
    assert_eq!(stats.len(), 2);

    let t01_stats = stats.iter().find(|s| s.name == "T01").unwrap();
    assert_eq!(t01_stats.total_tests, 2);
    assert_eq!(t01_stats.best_speed, 10.0);
    assert!((t01_stats.avg_speed - 8.25).abs() < 1e-9);

    let t02_stats = stats.iter().find(|s| s.name == "T02").unwrap();
    assert_eq!(t02_stats.total_tests, 0);
    assert_eq!(t02_stats.best_speed, 0.0);

    assert!(matches!(
        access.my_runner_stats(&admin),
        Err(AccessError::Forbidden(Page::MyRunners))
    ));
}
