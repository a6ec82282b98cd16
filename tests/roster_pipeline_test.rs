use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

use roster_importer::app::import_service::ImportService;
use roster_importer::app::ports::{BulkInsertAck, RosterStorePort};
use roster_importer::config::ImportOptions;
use roster_importer::domain::{ParsedRow, RowStatus};
use roster_importer::error::ImportError;
use roster_importer::pipeline::edit::apply_chip_code;
use roster_importer::pipeline::parse_roster;
use roster_importer::pipeline::payload::ParticipantRecord;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 4).unwrap()
}

fn parse(text: &str) -> Vec<ParsedRow> {
    parse_roster(text, &ImportOptions::default(), today()).unwrap()
}

/// Store double that records every batch it is handed.
struct RecordingStore {
    batches: Mutex<Vec<(String, Vec<ParticipantRecord>)>>,
    /// Whether the fake response enumerates the created records
    enumerate: bool,
}

impl RecordingStore {
    fn new(enumerate: bool) -> Self {
        Self {
            batches: Mutex::new(Vec::new()),
            enumerate,
        }
    }
}

#[async_trait]
impl RosterStorePort for RecordingStore {
    async fn create_many(
        &self,
        campaign_id: &str,
        batch: &[ParticipantRecord],
    ) -> roster_importer::error::Result<BulkInsertAck> {
        self.batches
            .lock()
            .unwrap()
            .push((campaign_id.to_string(), batch.to_vec()));
        Ok(BulkInsertAck {
            created: self.enumerate.then_some(batch.len()),
        })
    }
}

/// Store double that always rejects the batch.
struct FailingStore;

#[async_trait]
impl RosterStorePort for FailingStore {
    async fn create_many(
        &self,
        _campaign_id: &str,
        _batch: &[ParticipantRecord],
    ) -> roster_importer::error::Result<BulkInsertAck> {
        Err(ImportError::Store {
            message: "503 - maintenance".to_string(),
        })
    }
}

/// Store double that holds the request open until released.
struct BlockingStore {
    release: Notify,
}

#[async_trait]
impl RosterStorePort for BlockingStore {
    async fn create_many(
        &self,
        _campaign_id: &str,
        batch: &[ParticipantRecord],
    ) -> roster_importer::error::Result<BulkInsertAck> {
        self.release.notified().await;
        Ok(BulkInsertAck {
            created: Some(batch.len()),
        })
    }
}

const SAMPLE_ROSTER: &str = "\
BIB,FirstName,LastName,Gender,BirthDate,Nationality,ChipCode
101,Anan,Srisuwan,M,1990-01-20,THA,CHIP01
101,Boonmee,Chaiyasit,M,1985-05-02,THA,CHIP02
102,A,,X,,,
";

#[test]
fn end_to_end_duplicate_and_gender_priorities() {
    let rows = parse(SAMPLE_ROSTER);
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0].status, RowStatus::Ready);
    assert_eq!(rows[0].error_msg, "");

    assert_eq!(rows[1].status, RowStatus::Error);
    assert_eq!(rows[1].error_msg, "Duplicate BIB (row 1)");

    // Invalid gender outranks the missing chip code
    assert_eq!(rows[2].status, RowStatus::Error);
    assert_eq!(rows[2].error_msg, "Invalid gender");
}

#[tokio::test]
async fn submission_carries_only_importable_rows() -> Result<()> {
    let rows = parse(SAMPLE_ROSTER);

    let store = Arc::new(RecordingStore::new(true));
    let service = ImportService::new(store.clone());
    let outcome = service.submit(&rows, "campaign-7", "10K").await?;

    assert_eq!(outcome.submitted, 1);
    assert_eq!(outcome.created, 1);

    let batches = store.batches.lock().unwrap();
    assert_eq!(batches.len(), 1);
    let (campaign, batch) = &batches[0];
    assert_eq!(campaign, "campaign-7");
    assert_eq!(batch.len(), 1);

    let record = serde_json::to_value(&batch[0])?;
    assert_eq!(record["bib"], "101");
    assert_eq!(record["firstName"], "Anan");
    assert_eq!(record["lastName"], "Srisuwan");
    assert_eq!(record["gender"], "M");
    assert_eq!(record["category"], "10K");
    assert_eq!(record["nationality"], "THA");
    assert_eq!(record["birthDate"], "1990-01-20");
    assert_eq!(record["ageGroup"], "M 30-39");
    assert_eq!(record["chipCode"], "CHIP01");
    assert_eq!(record["status"], "not started");
    Ok(())
}

#[tokio::test]
async fn chip_edit_heals_a_warning_row_before_submission() -> Result<()> {
    let text = "bib,firstname,gender,chipcode\n201,Anan,M,\n202,Boon,F,CHIP02\n";
    let mut rows = parse(text);
    assert_eq!(rows[0].status, RowStatus::Warning);

    assert!(apply_chip_code(&mut rows, 1, "CHIP01"));
    assert_eq!(rows[0].status, RowStatus::Ready);

    let store = Arc::new(RecordingStore::new(true));
    let service = ImportService::new(store.clone());
    let outcome = service.submit(&rows, "campaign-7", "5K").await?;
    assert_eq!(outcome.submitted, 2);

    let batches = store.batches.lock().unwrap();
    let record = serde_json::to_value(&batches[0].1[0])?;
    assert_eq!(record["chipCode"], "CHIP01");
    Ok(())
}

#[tokio::test]
async fn created_count_falls_back_to_submitted_count() -> Result<()> {
    let rows = parse("bib,firstname,gender,chipcode\n301,Anan,M,CHIP01\n302,Boon,F,CHIP02\n");

    let store = Arc::new(RecordingStore::new(false));
    let service = ImportService::new(store);
    let outcome = service.submit(&rows, "campaign-7", "10K").await?;

    assert_eq!(outcome.submitted, 2);
    assert_eq!(outcome.created, 2);
    Ok(())
}

#[tokio::test]
async fn batch_failure_preserves_the_buffer_and_releases_the_guard() {
    let rows = parse("bib,firstname,gender,chipcode\n401,Anan,M,CHIP01\n");

    let service = ImportService::new(Arc::new(FailingStore));
    let first = service.submit(&rows, "campaign-7", "10K").await;
    assert!(matches!(first, Err(ImportError::Store { .. })));

    // The buffer is untouched and a manual retry reaches the store again
    // rather than tripping the in-flight guard
    assert_eq!(rows[0].status, RowStatus::Ready);
    let second = service.submit(&rows, "campaign-7", "10K").await;
    assert!(matches!(second, Err(ImportError::Store { .. })));
}

#[tokio::test]
async fn concurrent_second_submission_is_rejected() -> Result<()> {
    let rows = parse("bib,firstname,gender,chipcode\n501,Anan,M,CHIP01\n");

    let store = Arc::new(BlockingStore {
        release: Notify::new(),
    });
    let service = Arc::new(ImportService::new(store.clone()));

    let background = {
        let service = Arc::clone(&service);
        let rows = rows.clone();
        tokio::spawn(async move { service.submit(&rows, "campaign-7", "10K").await })
    };

    // Let the first submission reach the store and park there
    tokio::time::sleep(Duration::from_millis(50)).await;

    let second = service.submit(&rows, "campaign-7", "10K").await;
    assert!(matches!(second, Err(ImportError::SubmissionInFlight)));

    store.release.notify_one();
    let first = background.await??;
    assert_eq!(first.submitted, 1);
    Ok(())
}

#[tokio::test]
async fn empty_importable_set_never_reaches_the_store() -> Result<()> {
    // Both rows error: missing data and invalid gender
    let rows = parse("bib,firstname,gender,chipcode\n,Anan,M,CHIP01\n601,Boon,X,CHIP02\n");

    let store = Arc::new(RecordingStore::new(true));
    let service = ImportService::new(store.clone());
    let outcome = service.submit(&rows, "campaign-7", "10K").await?;

    assert_eq!(outcome.submitted, 0);
    assert_eq!(outcome.created, 0);
    assert!(store.batches.lock().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn roster_file_round_trips_through_the_async_boundary() -> Result<()> {
    use std::io::Write;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("roster.csv");
    let mut file = std::fs::File::create(&path)?;
    // Quoted field carrying a comma survives the file round trip
    write!(file, "bib,firstname,lastname,gender,chipcode\n701,Anan,\"Sri, Jr.\",M,CHIP01\n")?;

    let text = tokio::fs::read_to_string(&path).await?;
    let rows = parse(&text);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].last_name, "Sri, Jr.");
    assert_eq!(rows[0].status, RowStatus::Ready);
    Ok(())
}
