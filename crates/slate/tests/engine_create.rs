//! End-to-end tests for issue creation through the engine.
//!
//! Each test runs against a real JSON document in a scratch directory so
//! the persisted state is checked along with the returned issue.

use rstest::{fixture, rstest};
use slate::domain::{CreateIssueInput, Document, IssueKey, IssueStatus, IssueType};
use slate::engine::{ErrorClass, ErrorKind, IssueEngine};
use slate::key_generation::{key_prefix, parse_key};
use slate::storage::{JsonFileStore, load_document, lock_path};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

struct Harness {
    _dir: TempDir,
    path: PathBuf,
    engine: Arc<IssueEngine>,
}

impl Harness {
    async fn document(&self) -> Document {
        let (document, warning) = load_document(&self.path).await.unwrap();
        assert!(warning.is_none(), "unexpected warning: {warning:?}");
        document
    }

    async fn create(&self, title: &str, issue_type: &str, parent: Option<&str>) -> String {
        let mut input = CreateIssueInput::titled(title).with_type(issue_type);
        if let Some(parent) = parent {
            input = input.with_parent(parent);
        }
        self.engine
            .create_issue(input)
            .await
            .unwrap()
            .key()
            .to_string()
    }
}

#[fixture]
fn harness() -> Harness {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join(".slate").join("issues.json");
    let engine = Arc::new(IssueEngine::new(Arc::new(JsonFileStore::new(&path))));
    Harness {
        _dir: dir,
        path,
        engine,
    }
}

#[rstest]
#[tokio::test]
async fn keys_follow_type_prefix_and_prior_counter(harness: Harness) {
    let types = ["epic", "task", "bug", "story", "task"];

    for (expected_counter, name) in types.into_iter().enumerate() {
        let before = harness.document().await.issue_key_counter;
        let issue = harness
            .engine
            .create_issue(CreateIssueInput::titled("Item").with_type(name))
            .await
            .unwrap();

        let (issue_type, sequence) = parse_key(issue.key().as_str()).unwrap();
        assert_eq!(issue_type, issue.issue_type());
        assert!(issue.key().as_str().starts_with(key_prefix(issue_type)));
        assert_eq!(sequence, before);
        assert_eq!(sequence, expected_counter as u64);
    }

    assert_eq!(harness.document().await.issue_key_counter, 5);
}

#[rstest]
#[tokio::test]
async fn sequential_creations_never_collide(harness: Harness) {
    let mut keys = HashSet::new();
    for i in 0..20 {
        let name = ["task", "story", "bug", "epic"][i % 4];
        assert!(keys.insert(harness.create("Item", name, None).await));
    }

    let document = harness.document().await;
    assert_eq!(document.issues.len(), 20);
    assert_eq!(document.issue_key_counter, 20);
}

#[rstest]
#[case::under_epic("epic")]
#[case::under_story("story")]
#[tokio::test]
async fn subtask_is_recorded_once_on_its_parent(harness: Harness, #[case] parent_type: &str) {
    let parent_key = harness.create("Parent", parent_type, None).await;
    let parent_before = harness
        .document()
        .await
        .find(&IssueKey::new(parent_key.as_str()))
        .cloned()
        .unwrap();

    let child_key = harness
        .create("Child", "subtask", Some(parent_key.as_str()))
        .await;

    let document = harness.document().await;
    let parent_after = document.find(&IssueKey::new(parent_key.as_str())).unwrap();
    let child = document.find(&IssueKey::new(child_key.as_str())).unwrap();
    let children = parent_after.child_issue_keys().unwrap();

    assert_eq!(
        children
            .iter()
            .filter(|k| k.as_str() == child_key)
            .count(),
        1
    );
    assert_eq!(
        parent_after.fields().created_at,
        parent_before.fields().created_at
    );
    assert_ne!(
        parent_after.fields().updated_at,
        parent_before.fields().updated_at
    );
    assert_eq!(parent_after.fields().updated_at, child.fields().created_at);
    assert_eq!(child.parent_key().map(IssueKey::as_str), Some(parent_key.as_str()));
}

#[rstest]
#[tokio::test]
async fn tasks_and_stories_attach_to_epics(harness: Harness) {
    let epic = harness.create("Epic", "epic", None).await;
    let task = harness.create("Task", "task", Some(epic.as_str())).await;
    let story = harness.create("Story", "feature", Some(epic.as_str())).await;

    let document = harness.document().await;
    let epic_issue = document.find(&IssueKey::new(epic.as_str())).unwrap();
    assert_eq!(
        epic_issue.child_issue_keys().unwrap(),
        &[IssueKey::new(task.as_str()), IssueKey::new(story.as_str())][..]
    );
}

#[rstest]
#[case::task(IssueType::Task, IssueStatus::Todo)]
#[case::story(IssueType::Story, IssueStatus::Todo)]
#[case::epic(IssueType::Epic, IssueStatus::Todo)]
#[case::bug(IssueType::Bug, IssueStatus::InProgress)]
#[tokio::test]
async fn initial_status_depends_on_type(
    harness: Harness,
    #[case] issue_type: IssueType,
    #[case] expected: IssueStatus,
) {
    let issue = harness
        .engine
        .create_issue(CreateIssueInput::titled("Item").with_type(issue_type.to_string()))
        .await
        .unwrap();

    assert_eq!(issue.fields().status, expected);
    let stored = harness.document().await;
    assert_eq!(stored.find(issue.key()).unwrap().fields().status, expected);
}

#[rstest]
#[tokio::test]
async fn missing_title_performs_no_write(harness: Harness) {
    let result = harness.engine.create_issue(CreateIssueInput::default()).await;

    assert_eq!(result.unwrap_err().kind(), ErrorKind::MissingTitle);
    assert!(!harness.path.exists(), "nothing should have been written");
}

#[rstest]
#[case::orphan_subtask("subtask", None, ErrorKind::InvalidParentKey)]
#[case::subtask_under_bug("subtask", Some("BUG-1"), ErrorKind::InvalidParentType)]
#[case::subtask_under_task("subtask", Some("TASK-2"), ErrorKind::InvalidParentType)]
#[case::task_under_story("task", Some("STOR-3"), ErrorKind::InvalidParentType)]
#[case::story_under_task("story", Some("TASK-2"), ErrorKind::InvalidParentType)]
#[case::epic_with_parent("epic", Some("EPIC-0"), ErrorKind::ParentNotAllowed)]
#[case::bug_with_parent("bug", Some("EPIC-0"), ErrorKind::ParentNotAllowed)]
#[case::unknown_parent("task", Some("EPIC-99"), ErrorKind::ParentIssueNotFound)]
#[case::unknown_parent_for_epic("epic", Some("EPIC-99"), ErrorKind::ParentIssueNotFound)]
#[case::unknown_type("initiative", None, ErrorKind::InvalidIssueType)]
#[tokio::test]
async fn rejected_requests_leave_document_unchanged(
    harness: Harness,
    #[case] issue_type: &str,
    #[case] parent: Option<&str>,
    #[case] expected: ErrorKind,
) {
    harness.create("Epic", "epic", None).await;
    harness.create("Bug", "bug", None).await;
    harness.create("Task", "task", None).await;
    harness.create("Story", "story", None).await;
    let before = harness.document().await;

    let mut input = CreateIssueInput::titled("Rejected").with_type(issue_type);
    if let Some(parent) = parent {
        input = input.with_parent(parent);
    }
    let error = harness.engine.create_issue(input).await.unwrap_err();

    assert_eq!(error.kind(), expected);
    let expected_class = if expected == ErrorKind::ParentIssueNotFound {
        ErrorClass::NotFound
    } else {
        ErrorClass::Validation
    };
    assert_eq!(error.class(), expected_class);
    assert_eq!(harness.document().await, before);
}

#[rstest]
#[tokio::test]
async fn get_issue_by_key_reads_persisted_issue(harness: Harness) {
    let key = harness.create("Lookup me", "story", None).await;

    let found = harness.engine.get_issue_by_key(&key).await.unwrap().unwrap();
    let missing = harness.engine.get_issue_by_key("STOR-42").await.unwrap();

    assert_eq!(found.fields().summary, "Lookup me");
    assert_eq!(found.child_issue_keys(), Some(&[][..]));
    assert!(missing.is_none());
}

#[rstest]
#[tokio::test]
async fn description_is_stored_verbatim(harness: Harness) {
    let issue = harness
        .engine
        .create_issue(
            CreateIssueInput::titled("Docs")
                .with_type("story")
                .with_description("  Cover every flag\nand example  "),
        )
        .await
        .unwrap();

    let stored = harness
        .engine
        .get_issue_by_key(issue.key().as_str())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.fields().description, "  Cover every flag\nand example  ");
    assert_eq!(stored, issue);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_lookups_on_missing_document_never_fail(harness: Harness) {
    const ROUNDS: usize = 20;
    const READERS: usize = 16;

    for _ in 0..ROUNDS {
        let mut handles = Vec::with_capacity(READERS);
        for _ in 0..READERS {
            let engine = Arc::clone(&harness.engine);
            handles.push(tokio::spawn(async move { engine.get_issue_by_key("TASK-0").await }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().unwrap().is_none());
        }
    }

    assert!(!harness.path.exists(), "lookups must not write");
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn lookups_during_creations_see_whole_documents(harness: Harness) {
    const CALLS: usize = 16;

    let mut writers = Vec::with_capacity(CALLS);
    let mut readers = Vec::with_capacity(CALLS);
    for i in 0..CALLS {
        let engine = Arc::clone(&harness.engine);
        writers.push(tokio::spawn(async move {
            engine
                .create_issue(CreateIssueInput::titled(format!("Task {i}")))
                .await
        }));
        let engine = Arc::clone(&harness.engine);
        readers.push(tokio::spawn(async move { engine.get_issue_by_key("TASK-0").await }));
    }
    for writer in writers {
        writer.await.unwrap().unwrap();
    }
    for reader in readers {
        reader.await.unwrap().unwrap();
    }

    assert_eq!(harness.document().await.issue_key_counter, CALLS as u64);
}

/// Engines with their own stores share only the file, like separate
/// `slate` processes do.
#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn engines_sharing_a_file_never_lose_updates(harness: Harness) {
    const ENGINES: usize = 8;
    const CALLS_EACH: usize = 4;

    let mut handles = Vec::with_capacity(ENGINES);
    for e in 0..ENGINES {
        let engine = IssueEngine::new(Arc::new(JsonFileStore::new(&harness.path)));
        handles.push(tokio::spawn(async move {
            let mut keys = Vec::with_capacity(CALLS_EACH);
            for c in 0..CALLS_EACH {
                let input = CreateIssueInput::titled(format!("Engine {e} item {c}"));
                keys.push(engine.create_issue(input).await.unwrap().key().clone());
            }
            keys
        }));
    }

    let mut keys = HashSet::new();
    for handle in handles {
        for key in handle.await.unwrap() {
            assert!(keys.insert(key));
        }
    }

    let document = harness.document().await;
    assert_eq!(keys.len(), ENGINES * CALLS_EACH);
    assert_eq!(document.issues.len(), ENGINES * CALLS_EACH);
    assert_eq!(document.issue_key_counter, (ENGINES * CALLS_EACH) as u64);
    assert!(!lock_path(&harness.path).exists());
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creations_get_distinct_keys(harness: Harness) {
    const CALLS: usize = 32;
    let epic = harness.create("Epic", "epic", None).await;

    let mut handles = Vec::with_capacity(CALLS);
    for i in 0..CALLS {
        let engine = Arc::clone(&harness.engine);
        let epic = epic.clone();
        handles.push(tokio::spawn(async move {
            let input = if i % 2 == 0 {
                CreateIssueInput::titled(format!("Task {i}")).with_parent(epic)
            } else {
                CreateIssueInput::titled(format!("Bug {i}")).with_type("bug")
            };
            engine.create_issue(input).await.unwrap().key().clone()
        }));
    }

    let mut keys = HashSet::new();
    for handle in handles {
        assert!(keys.insert(handle.await.unwrap()));
    }

    let document = harness.document().await;
    assert_eq!(keys.len(), CALLS);
    assert_eq!(document.issue_key_counter, CALLS as u64 + 1);
    assert_eq!(document.issues.len(), CALLS + 1);
    let epic_issue = document.find(&IssueKey::new(epic.as_str())).unwrap();
    assert_eq!(epic_issue.child_issue_keys().unwrap().len(), CALLS / 2);
}
