use std::marker::PhantomData;

use stencil::{SyncStatus, create_table, sync, table_name};

#[create_table("users", "id")]
#[table_name("users")]
pub struct User {
    pub id: u64,
    pub name: String,
    pub score: f64,
    pub avatar: Vec<u8>,
    pub nickname: Option<String>,
    #[column(skip)]
    pub cache: Vec<String>,
}

#[create_table("events")]
pub struct Event<T> {
    pub at: i64,
    pub payload: String,
    pub marker: PhantomData<T>,
}

#[sync]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Note {
    pub body: String,
}

#[sync]
#[derive(Debug, Default)]
pub struct Flag;

#[sync]
#[create_table("tasks", "id")]
#[derive(Debug, Default)]
pub struct Task {
    pub id: i32,
    pub done: bool,
}

#[test]
fn table_name_binds_constant() {
    assert_eq!(User::TABLE_NAME, "users");
}

#[test]
fn create_table_maps_each_column() {
    assert_eq!(
        User::create_table_sql(),
        "CREATE TABLE users (id INTEGER, name TEXT, score REAL, avatar BLOB, nickname TEXT, PRIMARY KEY (id))"
    );
}

#[test]
fn create_table_without_primary_key_skips_phantom_fields() {
    assert_eq!(
        Event::<()>::create_table_sql(),
        "CREATE TABLE events (at INTEGER, payload TEXT)"
    );
}

#[test]
fn sync_starts_pending_and_marks_changed() {
    let mut note = Note {
        body: "draft".into(),
        sync_status: Note::INITIAL_SYNC_STATUS,
    };
    assert_eq!(note.sync_status, SyncStatus::Pending);
    assert_eq!(note.sync_status.to_string(), "pending");

    note.mark_changed();
    assert_eq!(note.sync_status, SyncStatus::Changed);
    assert_eq!(note.sync_status.as_str(), "changed");
}

#[test]
fn sync_default_matches_initial_status() {
    assert_eq!(Note::default().sync_status, Note::INITIAL_SYNC_STATUS);

    let mut flag = Flag::default();
    assert_eq!(flag.sync_status, SyncStatus::Pending);
    flag.mark_changed();
    assert!(flag.sync_status.is_changed());
}

#[test]
fn sync_field_becomes_a_column_when_expanded_first() {
    // `#[sync]` expands before `#[create_table]` and adds its field first
    assert_eq!(
        Task::create_table_sql(),
        "CREATE TABLE tasks (id INTEGER, done INTEGER, sync_status TEXT, PRIMARY KEY (id))"
    );
    let mut task = Task::default();
    task.mark_changed();
    assert_eq!(task.sync_status, SyncStatus::Changed);
}
