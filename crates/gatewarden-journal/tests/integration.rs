use gatewarden_core::{ExitLogEntry, ExitResult};
use gatewarden_journal::{JournalReader, JournalWriter, ReadMode, WriteOptions};
use tempfile::TempDir;

fn make_entry(student_id: &str, result: ExitResult, reason: &str) -> ExitLogEntry {
    ExitLogEntry {
        timestamp: 1_700_000_000,
        student_id: student_id.to_string(),
        asset_id: Some(1),
        operator_id: "op-1".to_string(),
        result,
        reason: reason.to_string(),
    }
}

#[test]
fn test_write_read_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.gwa");

    {
        let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
        writer
            .append_entry(&make_entry(
                "DBU1401234",
                ExitResult::Allowed,
                "Exit verified successfully",
            ))
            .unwrap();
        writer
            .append_entry(&make_entry(
                "DBU1405555",
                ExitResult::Blocked,
                "Student not found",
            ))
            .unwrap();
        writer.finish().unwrap();
    }

    {
        let mut reader = JournalReader::open(&journal_path, ReadMode::Strict).unwrap();
        let first = reader.read_entry().unwrap().unwrap();
        let second = reader.read_entry().unwrap().unwrap();
        let third = reader.read_entry().unwrap();

        assert_eq!(first.student_id, "DBU1401234");
        assert_eq!(first.result, ExitResult::Allowed);
        assert_eq!(second.student_id, "DBU1405555");
        assert_eq!(second.reason, "Student not found");
        assert!(third.is_none());
    }
}

#[test]
fn test_append_to_existing() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.gwa");

    {
        let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
        writer
            .append_entry(&make_entry("DBU1401234", ExitResult::Allowed, "first"))
            .unwrap();
        writer.finish().unwrap();
    }

    {
        let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
        writer
            .append_entry(&make_entry("DBU1401234", ExitResult::Blocked, "second"))
            .unwrap();
        writer.finish().unwrap();
    }

    {
        let mut reader = JournalReader::open(&journal_path, ReadMode::Strict).unwrap();
        assert_eq!(reader.read_entry().unwrap().unwrap().reason, "first");
        assert_eq!(reader.read_entry().unwrap().unwrap().reason, "second");
        assert!(reader.read_entry().unwrap().is_none());
    }
}

#[test]
fn test_no_sync_option_still_readable() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.gwa");

    let options = WriteOptions {
        sync: false,
        ..WriteOptions::default()
    };

    let mut writer = JournalWriter::open(&journal_path, options).unwrap();
    writer
        .append_entry(&make_entry("DBU1401234", ExitResult::Allowed, "ok"))
        .unwrap();
    writer.finish().unwrap();

    let mut reader = JournalReader::open(&journal_path, ReadMode::Strict).unwrap();
    assert!(reader.read_entry().unwrap().is_some());
}

#[test]
fn test_truncate_rewrites_from_header() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.gwa");

    {
        let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
        writer
            .append_entry(&make_entry("DBU1401234", ExitResult::Allowed, "old"))
            .unwrap();
        writer.finish().unwrap();
    }

    {
        let options = WriteOptions {
            append: false,
            ..WriteOptions::default()
        };
        let mut writer = JournalWriter::open(&journal_path, options).unwrap();
        writer
            .append_entry(&make_entry("DBU1405555", ExitResult::Blocked, "new"))
            .unwrap();
        writer.finish().unwrap();
    }

    let mut reader = JournalReader::open(&journal_path, ReadMode::Strict).unwrap();
    let only = reader.read_entry().unwrap().unwrap();
    assert_eq!(only.reason, "new");
    assert!(reader.read_entry().unwrap().is_none());
}

#[test]
fn test_optional_asset_id_round_trips() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.gwa");

    let mut entry = make_entry("DBU1401234", ExitResult::Allowed, "no asset");
    entry.asset_id = None;

    {
        let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
        writer.append_entry(&entry).unwrap();
        writer.finish().unwrap();
    }

    let mut reader = JournalReader::open(&journal_path, ReadMode::Strict).unwrap();
    assert_eq!(reader.read_entry().unwrap().unwrap(), entry);
}

#[test]
fn test_rejects_non_journal_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("not-a-journal.gwa");
    std::fs::write(&path, b"just some text that is long enough").unwrap();

    assert!(JournalWriter::open(&path, WriteOptions::default()).is_err());
    assert!(JournalReader::open(&path, ReadMode::Strict).is_err());
}
