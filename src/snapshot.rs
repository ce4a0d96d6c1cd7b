//! The persisted document: all four record sets plus credentials.
//!
//! The whole state is one JSON document, written wholesale. A missing or
//! unreadable backing file is never fatal; the store starts from defaults so
//! the application always comes up usable.

use crate::error::Result;
use crate::records::RecordSet;
use crate::types::{BloodDonation, Donation, Event, Member};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Username present in a freshly initialized document.
pub const DEFAULT_USERNAME: &str = "123456";

/// Password paired with [`DEFAULT_USERNAME`].
pub const DEFAULT_PASSWORD: &str = "123456";

/// The full in-memory state at a point in time, the unit of save/load/backup.
///
/// Field names match the backing document exactly:
///
/// ```json
/// {
///   "members": [...],
///   "events": [...],
///   "donations": [...],
///   "blood_donations": [...],
///   "users": { "USERNAME": "password" }
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub members: RecordSet<Member>,
    pub events: RecordSet<Event>,
    pub donations: RecordSet<Donation>,
    pub blood_donations: RecordSet<BloodDonation>,
    /// Username (uppercase) to plain-text password.
    pub users: HashMap<String, String>,
}

impl Default for Snapshot {
    fn default() -> Self {
        let mut users = HashMap::new();
        users.insert(DEFAULT_USERNAME.to_string(), DEFAULT_PASSWORD.to_string());

        Self {
            members: RecordSet::default(),
            events: RecordSet::default(),
            donations: RecordSet::default(),
            blood_donations: RecordSet::default(),
            users,
        }
    }
}

impl Snapshot {
    /// Load the document at `path`, or the default state if it is missing,
    /// unreadable, or malformed.
    ///
    /// A broken document is logged and replaced, never surfaced as an error.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "backing file missing, starting from defaults");
            return Snapshot::default();
        }

        match Self::read(path) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "backing file unreadable, starting from defaults"
                );
                Snapshot::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let mut snapshot: Snapshot = serde_json::from_str(&raw)?;
        snapshot.normalize_users();
        Ok(snapshot)
    }

    /// Serialize the whole state to `path`.
    ///
    /// Writes to a temporary sibling first and renames over the target, so a
    /// crash mid-write leaves the previous document intact.
    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        write_atomic(path, raw.as_bytes())
    }

    /// Usernames are stored uppercase; fix up hand-edited documents on load.
    fn normalize_users(&mut self) {
        let users = std::mem::take(&mut self.users);
        self.users = users
            .into_iter()
            .map(|(name, password)| (name.to_uppercase(), password))
            .collect();
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = tmp_path(path);
    {
        let mut file = File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
