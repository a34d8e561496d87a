//! Full end-to-end tests with the real resource domains: heap buffers,
//! scratch files on the actual filesystem, and pool blocks whose duplication
//! can genuinely run out.

use std::path::PathBuf;
use std::process;

use ownership_recipe::domain::{BlockPool, BlockRequest, BufferEdit, BufferSpec, Document, ScratchSpec};
use ownership_recipe::handles::{BlockHandle, Handle, ScratchHandle, TextHandle};
use ownership_recipe::lifecycle::{setup_tracing, Session, SessionConfig, SessionError};
use ownership_recipe::pool_resource::PoolError;

/// A per-test scratch directory so parallel tests never collide.
fn test_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ownership-recipe-{}-{}", process::id(), name));
    std::fs::create_dir_all(&dir).expect("create test dir");
    dir
}

fn test_config(dir_name: &str) -> SessionConfig {
    SessionConfig {
        buffer: BufferSpec::new("draft: ", 256),
        scratch: ScratchSpec::new(test_dir(dir_name), "session"),
        pool_blocks: 4,
        block_size: 32,
    }
}

#[test]
fn full_session_lifecycle() {
    setup_tracing();
    let mut session = Session::start(test_config("full-lifecycle")).expect("session start");

    // Work with the buffer, then checkpoint into the scratch file and block.
    session.text_mut().push_str("hello, recipe").expect("append text");
    session.checkpoint().expect("checkpoint");

    let scratch_path = session.scratch().path().expect("live scratch").to_owned();
    assert!(scratch_path.exists(), "checkpoint data lives on disk");
    assert_eq!(session.scratch().written().expect("live scratch"), "draft: hello, recipe".len() as u64);

    let block_bytes = session.block().bytes().expect("live block");
    assert!(block_bytes.starts_with(b"draft: hello, recipe"));

    assert_eq!(session.pool().outstanding(), 1);

    session.shutdown().expect("clean shutdown");
    assert!(!scratch_path.exists(), "scratch file removed exactly once, at release");
}

#[test]
fn failed_start_releases_the_already_acquired_resources() {
    let dir = test_dir("partial-start");
    let config = SessionConfig {
        buffer: BufferSpec::new("draft: ", 256),
        scratch: ScratchSpec::new(dir.clone(), "partial"),
        // Nothing to check out: the last acquisition in start() must fail
        // after the buffer and the scratch file already exist.
        pool_blocks: 0,
        block_size: 32,
    };

    let err = Session::start(config).expect_err("pool is empty");
    assert!(matches!(err, SessionError::Pool(PoolError::Exhausted { total: 0 })));

    let leftovers: Vec<_> = std::fs::read_dir(&dir)
        .expect("read test dir")
        .collect();
    assert!(
        leftovers.is_empty(),
        "partially constructed session must release its scratch file: {leftovers:?}"
    );
}

#[test]
fn text_copies_are_fully_independent() {
    let mut original = TextHandle::create(BufferSpec::new("shared prefix", 64)).expect("create");
    let mut copy = original.try_clone().expect("clone");

    original.push_str(" + original tail").expect("append");
    copy.push_str(" + copy tail").expect("append");

    assert_eq!(original.as_str().expect("live"), "shared prefix + original tail");
    assert_eq!(copy.as_str().expect("live"), "shared prefix + copy tail");

    // Copy assignment converges the state again; the source stays intact.
    copy.assign_from(&original).expect("assign");
    assert_eq!(copy.as_str().expect("live"), "shared prefix + original tail");
    original.push_str("!").expect("append");
    assert_eq!(copy.as_str().expect("live"), "shared prefix + original tail");

    // Structured edits behave the same way: all-or-nothing, per buffer.
    copy.apply(BufferEdit {
        append: Some(" (edited)".to_string()),
        truncate_to: None,
    })
    .expect("edit fits");
    assert_eq!(copy.as_str().expect("live"), "shared prefix + original tail (edited)");
    assert_eq!(original.as_str().expect("live"), "shared prefix + original tail!");
}

#[test]
fn scratch_files_transfer_by_move_and_release_once() {
    let dir = test_dir("scratch-move");
    let mut first = ScratchHandle::create(ScratchSpec::new(dir, "move")).expect("create");
    first.append(b"written before the move").expect("append");
    let path = first.path().expect("live").to_owned();

    // Move construction: the new handle owns the very same file.
    let mut second = first.take();
    assert!(first.is_empty());
    assert_eq!(second.path().expect("live"), path);
    second.append(b" - and after").expect("append through the new owner");

    // Destroying the moved-from handle must not touch the file.
    drop(first);
    assert!(path.exists());

    drop(second);
    assert!(!path.exists(), "released exactly once, by the final owner");
}

#[test]
fn scratch_move_assignment_releases_the_displaced_file() {
    let dir = test_dir("scratch-adopt");
    let mut keeper = ScratchHandle::create(ScratchSpec::new(dir.clone(), "keeper")).expect("create");
    let mut incoming = ScratchHandle::create(ScratchSpec::new(dir, "incoming")).expect("create");

    let old_path = keeper.path().expect("live").to_owned();
    let new_path = incoming.path().expect("live").to_owned();
    assert_ne!(old_path, new_path, "acquisitions never collide on a name");

    keeper.adopt(incoming.take());

    assert!(!old_path.exists(), "displaced file released at the moment of adoption");
    assert!(new_path.exists());
    assert_eq!(keeper.path().expect("live"), new_path);
    assert!(incoming.is_empty());

    drop(keeper);
    assert!(!new_path.exists());
}

#[test]
fn pool_duplication_fails_cleanly_when_exhausted() {
    let pool = BlockPool::new(2, 16);
    let mut first = BlockHandle::checkout(&pool, BlockRequest { fill: 0xAA }).expect("checkout");
    let second = first.try_clone().expect("one block left");
    assert_eq!(pool.free(), 0);

    // Copy construction with nothing left: refused, nothing taken.
    let err = second.try_clone().expect_err("pool exhausted");
    assert_eq!(err, PoolError::Exhausted { total: 2 });
    assert_eq!(pool.outstanding(), 2);

    // Copy assignment with nothing left: refused, target provably unchanged.
    let first_id = first.id().expect("live");
    first.write(0, b"keep me").expect("write");
    let err = first.assign_from(&second).expect_err("pool exhausted");
    assert_eq!(err, PoolError::Exhausted { total: 2 });
    assert_eq!(first.id().expect("live"), first_id);
    assert!(first.bytes().expect("live").starts_with(b"keep me"));

    drop(first);
    drop(second);
    assert_eq!(pool.free(), 2, "every block came home");
}

#[test]
fn pool_blocks_duplicate_content_but_not_identity() {
    let pool = BlockPool::new(3, 8);
    let mut original = BlockHandle::checkout(&pool, BlockRequest { fill: 0x11 }).expect("checkout");
    original.write(0, b"abc").expect("write");

    let mut copy = original.try_clone().expect("clone");
    assert_ne!(copy.id().expect("live"), original.id().expect("live"));
    assert_eq!(copy.bytes().expect("live"), original.bytes().expect("live"));

    copy.fill(0x22).expect("fill");
    assert!(original.bytes().expect("live").starts_with(b"abc"), "copies are independent");
}

#[test]
fn composed_document_needs_no_custom_ownership_logic() {
    let mut original = Document::new("notes", "the default rule");
    original.tag("recipe");

    let mut copy = original.clone();
    copy.body.push_str(", composed member-wise");
    copy.tag("copy");

    assert_eq!(original.body, "the default rule");
    assert_eq!(original.tags, vec!["recipe".to_string()]);
    assert_eq!(copy.tags, vec!["recipe".to_string(), "copy".to_string()]);
}
