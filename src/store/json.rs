use chrono::{DateTime, NaiveDateTime, Utc};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::{book::Book, errors::StoreError};

use super::{BookStore, Result};

const BOOK_FILE: &str = "book.json";
const BACKUP_DIR: &str = "backups";
const BACKUP_PREFIX: &str = "book";
const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_DIR_NAME: &str = ".spendwell";
const DEFAULT_RETENTION: usize = 5;

/// JSON-file store: one `book.json` plus timestamped backup snapshots under
/// a single root directory. Saves go through a temp file and an atomic
/// rename so a crash never leaves a half-written book behind.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStore {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self> {
        let root = root.unwrap_or_else(default_root);
        ensure_dir(&root)?;
        let backups_dir = root.join(BACKUP_DIR);
        ensure_dir(&backups_dir)?;
        Ok(Self {
            root,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None, None)
    }

    pub fn book_path(&self) -> PathBuf {
        self.root.join(BOOK_FILE)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn backup_path(&self, backup_name: &str) -> PathBuf {
        self.backups_dir.join(backup_name)
    }

    fn write_backup_file(&self, book: &Book, note: Option<&str>) -> Result<()> {
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut file_stem = format!("{}_{}", BACKUP_PREFIX, timestamp);
        if let Some(label) = sanitize_backup_note(note) {
            file_stem.push('_');
            file_stem.push_str(&label);
        }
        let path = self
            .backups_dir
            .join(format!("{}.{}", file_stem, BACKUP_EXTENSION));
        let json = serde_json::to_string_pretty(book)?;
        write_atomic(&path, &json)?;
        self.prune_backups()?;
        Ok(())
    }

    fn backup_existing_file(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }
        ensure_dir(&self.backups_dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let backup_name = format!("{}_{}.{}", BACKUP_PREFIX, timestamp, BACKUP_EXTENSION);
        fs::copy(path, self.backups_dir.join(backup_name))?;
        self.prune_backups()?;
        Ok(())
    }

    fn prune_backups(&self) -> Result<()> {
        let backups = self.list_backups()?;
        if backups.len() <= self.retention {
            return Ok(());
        }
        for entry in backups.iter().skip(self.retention) {
            let _ = fs::remove_file(self.backup_path(entry));
        }
        Ok(())
    }
}

impl BookStore for JsonStore {
    fn save(&self, book: &Book) -> Result<()> {
        let path = self.book_path();
        if path.exists() {
            self.backup_existing_file(&path)?;
        }
        let json = serde_json::to_string_pretty(book)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(path = %path.display(), "expense book saved");
        Ok(())
    }

    fn load(&self) -> Result<Book> {
        let path = self.book_path();
        if !path.exists() {
            return Err(StoreError::NotInitialized(path.display().to_string()));
        }
        let data = fs::read_to_string(&path)?;
        let book: Book = serde_json::from_str(&data)?;
        Ok(book)
    }

    fn exists(&self) -> bool {
        self.book_path().exists()
    }

    fn backup(&self, book: &Book, note: Option<&str>) -> Result<()> {
        self.write_backup_file(book, note)
    }

    fn list_backups(&self) -> Result<Vec<String>> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            let file_name = match path.file_name().and_then(|name| name.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };
            entries.push(file_name);
        }
        entries.sort_by(|a, b| {
            parse_backup_timestamp(b)
                .cmp(&parse_backup_timestamp(a))
                .then_with(|| b.cmp(a))
        });
        Ok(entries)
    }

    fn restore(&self, backup_name: &str) -> Result<Book> {
        let backup_path = self.backup_path(backup_name);
        if !backup_path.exists() {
            return Err(StoreError::BackupMissing(backup_name.to_string()));
        }
        let target = self.book_path();
        fs::copy(&backup_path, &target)?;
        self.load()
    }
}

fn default_root() -> PathBuf {
    if let Some(custom) = env::var_os("SPENDWELL_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

// `book.json` writes in flight as `book.json.tmp`, renamed over the target
// once complete.
fn tmp_path(path: &Path) -> PathBuf {
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    path.with_extension(ext)
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, data)?;
    Ok(())
}

// Folds a free-text note into a file-name-safe label: lowercase
// alphanumerics, separator runs collapsed to single dashes, the rest dropped.
fn sanitize_backup_note(note: Option<&str>) -> Option<String> {
    let mut label = String::new();
    for ch in note?.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            label.push(ch.to_ascii_lowercase());
        } else if (ch.is_whitespace() || ch == '-' || ch == '.') && !label.ends_with('-') {
            label.push('-');
        }
    }
    let label = label.trim_matches('-');
    (!label.is_empty()).then(|| label.to_string())
}

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let stem = name.strip_suffix(".json").unwrap_or(name);
    let mut parts = stem.split('_');
    if parts.next()? != BACKUP_PREFIX {
        return None;
    }
    let date_part = parts.next()?;
    let time_part = parts.next()?;
    if !is_digits(date_part, 8) || !is_digits(time_part, 6) {
        return None;
    }
    let raw = format!("{}{}", date_part, time_part);
    NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M%S")
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::TempDir;

    use crate::book::{Budget, ExpenseCategory, Frequency, RecurringExpense};

    use super::*;

    fn store_with_temp_dir() -> (JsonStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonStore::new(Some(temp.path().to_path_buf()), Some(3)).expect("json store");
        (store, temp)
    }

    fn sample_book() -> Book {
        let mut book = Book::new();
        book.set_budget(Budget::new(
            2000.0,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        ));
        book.add_recurring(RecurringExpense::new(
            800.0,
            ExpenseCategory::Rent,
            Frequency::Monthly,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        ));
        book
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (store, _guard) = store_with_temp_dir();
        let book = sample_book();
        store.save(&book).expect("save book");
        let loaded = store.load().expect("load book");
        assert_eq!(loaded.recurring.len(), 1);
        assert_eq!(
            loaded.budget.as_ref().map(|b| b.monthly_amount),
            Some(2000.0)
        );
    }

    #[test]
    fn load_without_a_book_reports_not_initialized() {
        let (store, _guard) = store_with_temp_dir();
        match store.load() {
            Err(StoreError::NotInitialized(_)) => {}
            other => panic!("expected NotInitialized, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn load_or_default_starts_fresh() {
        let (store, _guard) = store_with_temp_dir();
        let book = store.load_or_default().expect("default book");
        assert!(book.budget.is_none());
        assert!(!store.exists());
    }

    #[test]
    fn backup_writes_timestamped_files() {
        let (store, _guard) = store_with_temp_dir();
        let book = sample_book();
        store.save(&book).expect("save book");
        store.backup(&book, Some("before upgrade")).expect("backup");
        let backups = store.list_backups().expect("list backups");
        assert!(!backups.is_empty());
        assert!(backups[0].starts_with("book_"));
        assert!(backups[0].ends_with("before-upgrade.json"));
    }

    #[test]
    fn pruning_caps_backup_count() {
        let (store, _guard) = store_with_temp_dir();
        let book = sample_book();
        for label in ["one", "two", "three", "four", "five", "six"] {
            store.backup(&book, Some(label)).expect("backup");
        }
        let backups = store.list_backups().expect("list backups");
        assert!(backups.len() <= 3);
    }

    #[test]
    fn restore_replaces_the_current_book() {
        let (store, _guard) = store_with_temp_dir();
        let original = sample_book();
        store.save(&original).expect("save original");
        store.backup(&original, Some("keep")).expect("backup");

        let mut changed = original.clone();
        changed.set_budget(Budget::new(
            1.0,
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        ));
        store.save(&changed).expect("save changed");

        let backups = store.list_backups().expect("list backups");
        let keep = backups
            .iter()
            .find(|name| name.ends_with("keep.json"))
            .expect("named backup present");
        let restored = store.restore(keep).expect("restore");
        assert_eq!(
            restored.budget.as_ref().map(|b| b.monthly_amount),
            Some(2000.0)
        );
    }

    #[test]
    fn restore_with_unknown_name_fails() {
        let (store, _guard) = store_with_temp_dir();
        match store.restore("book_19990101_000000.json") {
            Err(StoreError::BackupMissing(name)) => {
                assert!(name.contains("1999"));
            }
            other => panic!("expected BackupMissing, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn timestamp_parser_handles_notes() {
        let parsed = parse_backup_timestamp("book_20240115_083000_monthly-close.json");
        assert!(parsed.is_some());
        assert!(parse_backup_timestamp("book_garbled.json").is_none());
        assert!(parse_backup_timestamp("notes.json").is_none());
    }
}
