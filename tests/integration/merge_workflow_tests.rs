/*!
 * End-to-end tests for the merge workflow
 *
 * These drive the controller with an in-memory store, scripted answers and
 * real files in a temporary directory.
 */

use anyhow::Result;
use std::fs;
use tlmerge::store::InMemoryStore;
use tlmerge::{Config, Controller, LocationError, MergeOptions, MergeOutcome, StoreError};
use crate::common;

const CONTENT: &str = "Hello world. How are you? Bye.";

fn controller() -> Controller {
    Controller::with_config(Config::default()).expect("default config should be valid")
}

fn greeting_store() -> InMemoryStore {
    InMemoryStore::new().with_record(
        "greeting",
        common::localized_record(
            "greeting.txt",
            &[
                ("Hello world.", "こんにちは世界。"),
                ("How are you?", "お元気ですか？"),
                ("Bye.", "Bye."),
            ],
        ),
    )
}

#[tokio::test]
async fn test_run_withDeclinedSentence_shouldWriteFileAndListSkipped() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "greeting.txt", CONTENT)?;
    let store = greeting_store();
    let mut prompter = common::scripted_prompter(&["y", "n", "y"]);

    let options = MergeOptions {
        file: Some(file.clone()),
        doc: Some("greeting".to_string()),
        ..MergeOptions::default()
    };
    let outcome = controller().run(options, &store, &mut prompter).await?;

    let MergeOutcome::Completed(report) = outcome else {
        panic!("merge should complete");
    };
    assert_eq!(report.planned, 2);
    assert_eq!(report.merged, 1);
    assert!(report.written);
    assert_eq!(fs::read_to_string(&file)?, "こんにちは世界。 How are you? Bye.");

    let output = common::printed(&prompter);
    assert!(output.contains("### Merge this sentence? (y/n) : y\nHello world.\nこんにちは世界。\n"));
    assert!(output.contains("Skipped a sentence."));
    assert!(output.contains("## Done."));
    assert!(output.contains("## These sentences were not merged. Please merge it manually:\n13: How are you?\n"));
    Ok(())
}

#[tokio::test]
async fn test_run_withoutDocOrFile_shouldPromptAndDeriveFileFromUri() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    fs::create_dir_all(temp_dir.path().join("guide"))?;
    let file = common::create_test_file(&temp_dir.path().join("guide"), "intro.md", "# Intro\n\nHello world.\n")?;

    let store = InMemoryStore::new().with_record(
        "intro-doc",
        common::localized_record(
            "https://docs.example.com/guide/intro.html",
            &[("Hello world.", "こんにちは世界。")],
        ),
    );
    // Document id, proceed with file, merge, overwrite
    let mut prompter = common::scripted_prompter(&["intro-doc", "", "y", "Y"]);

    let options = MergeOptions {
        file_uri_regex: Some(r"^https://docs\.example\.com/(.*)\.html$".to_string()),
        file_uri_replace: Some(format!("{}/${{1}}.md", temp_dir.path().display())),
        ..MergeOptions::default()
    };
    let outcome = controller().run(options, &store, &mut prompter).await?;

    let MergeOutcome::Completed(report) = outcome else {
        panic!("merge should complete");
    };
    assert_eq!(report.file, file);
    assert_eq!(fs::read_to_string(&file)?, "# Intro\n\nこんにちは世界。\n");
    assert!(common::printed(&prompter).contains("### Proceed with this file? (y/n) : y"));
    assert_eq!(store.fetch_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_run_withDeclinedFile_shouldQuitWithoutChanges() -> Result<()> {
    let store = InMemoryStore::new().with_record(
        "greeting",
        common::localized_record("/nonexistent/greeting.txt", &[("Hello world.", "やあ。")]),
    );
    let mut prompter = common::scripted_prompter(&["n"]);

    let options = MergeOptions {
        doc: Some("greeting".to_string()),
        ..MergeOptions::default()
    };
    let outcome = controller().run(options, &store, &mut prompter).await?;

    assert!(matches!(outcome, MergeOutcome::Quit));
    assert!(common::printed(&prompter).ends_with("Quit.\n"));
    Ok(())
}

#[tokio::test]
async fn test_run_withDeclinedOverwrite_shouldPrintResultOnly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "greeting.txt", CONTENT)?;
    let store = greeting_store();
    let mut prompter = common::scripted_prompter(&["y", "y", "n"]);

    let options = MergeOptions {
        file: Some(file.clone()),
        doc: Some("greeting".to_string()),
        ..MergeOptions::default()
    };
    let outcome = controller().run(options, &store, &mut prompter).await?;

    let MergeOutcome::Completed(report) = outcome else {
        panic!("merge should complete");
    };
    assert!(!report.written);
    assert_eq!(fs::read_to_string(&file)?, CONTENT);
    assert!(common::printed(&prompter)
        .ends_with("## Just showing the result:\nこんにちは世界。 お元気ですか？ Bye.\n"));
    Ok(())
}

#[tokio::test]
async fn test_run_withUnlocatableSentence_shouldAbortBeforeAnyPrompt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "greeting.txt", CONTENT)?;
    let store = InMemoryStore::new().with_record(
        "greeting",
        common::localized_record("greeting.txt", &[("Hello world.", "やあ。"), ("Zzz", "ぐー")]),
    );
    let mut prompter = common::scripted_prompter(&["y", "y", "y"]);

    let options = MergeOptions {
        file: Some(file.clone()),
        doc: Some("greeting".to_string()),
        ..MergeOptions::default()
    };
    let err = controller().run(options, &store, &mut prompter).await.unwrap_err();

    let location_error = err.downcast_ref::<LocationError>().expect("should be a location error");
    assert!(location_error.is_not_found());
    assert_eq!(location_error.sentence(), "Zzz");
    assert_eq!(fs::read_to_string(&file)?, CONTENT);
    assert!(common::printed(&prompter).is_empty());
    Ok(())
}

#[tokio::test]
async fn test_run_withUnmatchedEnding_shouldAbortWithEndNotFound() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "greeting.txt", CONTENT)?;
    // "How are " anchors the start, but nothing ending in "X" follows it
    let store = InMemoryStore::new().with_record(
        "greeting",
        common::localized_record("greeting.txt", &[("Hello world.", "やあ。"), ("How are X", "元気？")]),
    );
    let mut prompter = common::scripted_prompter(&["y", "y", "y"]);

    let options = MergeOptions {
        file: Some(file.clone()),
        doc: Some("greeting".to_string()),
        ..MergeOptions::default()
    };
    let err = controller().run(options, &store, &mut prompter).await.unwrap_err();

    assert_eq!(
        err.downcast_ref::<LocationError>(),
        Some(&LocationError::EndNotFound {
            sentence: "How are X".to_string(),
            floor: 13
        })
    );
    assert_eq!(fs::read_to_string(&file)?, CONTENT);
    assert!(common::printed(&prompter).is_empty());
    Ok(())
}

#[tokio::test]
async fn test_run_withFailingConfirmationRead_shouldAbortBeforeOverwrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "greeting.txt", CONTENT)?;
    let store = greeting_store();
    let mut prompter = common::failing_prompter("y");

    let options = MergeOptions {
        file: Some(file.clone()),
        doc: Some("greeting".to_string()),
        ..MergeOptions::default()
    };
    let err = controller().run(options, &store, &mut prompter).await.unwrap_err();

    assert_eq!(err.to_string(), "Failed to read merge confirmation");
    assert_eq!(fs::read_to_string(&file)?, CONTENT);
    let output = String::from_utf8_lossy(prompter.output()).into_owned();
    assert_eq!(output.matches("### Merge this sentence?").count(), 2);
    assert!(!output.contains("Overwrite the file?"));
    Ok(())
}

#[tokio::test]
async fn test_run_withUnknownDocument_shouldFailWithStoreError() {
    let store = InMemoryStore::new();
    let mut prompter = common::scripted_prompter(&[]);

    let options = MergeOptions {
        doc: Some("missing".to_string()),
        ..MergeOptions::default()
    };
    let err = controller().run(options, &store, &mut prompter).await.unwrap_err();

    assert!(matches!(err.downcast_ref::<StoreError>(), Some(StoreError::DocumentNotFound(_))));
}

#[tokio::test]
async fn test_run_withEmptyDocumentId_shouldFail() {
    let store = InMemoryStore::new();
    let mut prompter = common::scripted_prompter(&[""]);

    let result = controller().run(MergeOptions::default(), &store, &mut prompter).await;

    assert!(result.is_err());
    assert_eq!(store.fetch_count(), 0);
}

#[test]
fn test_run_withDocFileAndAssumeYes_shouldMergeWithoutStore() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "greeting.txt", CONTENT)?;
    let record = common::localized_record(
        "ignored.txt",
        &[("Hello world.", "こんにちは世界。"), ("How are you?", "お元気ですか？")],
    );
    let doc_file = common::create_test_file(temp_dir.path(), "greeting.json", &record.to_string())?;
    let store = InMemoryStore::new();
    let mut prompter = common::scripted_prompter(&["n", "n", "n"]).assume_yes(true);

    let options = MergeOptions {
        file: Some(file.clone()),
        doc_file: Some(doc_file),
        ..MergeOptions::default()
    };
    let outcome = tokio_test::block_on(controller().run(options, &store, &mut prompter))?;

    let MergeOutcome::Completed(report) = outcome else {
        panic!("merge should complete");
    };
    assert_eq!(report.merged, 2);
    assert!(report.skipped.is_empty());
    assert_eq!(fs::read_to_string(&file)?, "こんにちは世界。 お元気ですか？ Bye.");
    assert_eq!(store.fetch_count(), 0);
    Ok(())
}
