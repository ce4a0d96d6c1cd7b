//! Main RecordStore struct tying all components together.

use crate::error::{Result, StoreError};
use crate::export;
use crate::snapshot::Snapshot;
use crate::types::{
    BloodDonation, BloodDonationDraft, Donation, DonationDraft, EntityKind, Event, EventDraft,
    Member, MemberDraft, RecordId,
};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Interval between periodic flushes of the backing file.
pub const DEFAULT_AUTOSAVE_INTERVAL: Duration = Duration::from_secs(300);

/// Store configuration.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Path of the backing file.
    pub path: PathBuf,

    /// How often the autosave thread flushes the full state.
    pub autosave_interval: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./organization_data.json"),
            autosave_interval: DEFAULT_AUTOSAVE_INTERVAL,
        }
    }
}

/// Counts and totals over the full record sets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StoreStats {
    pub member_count: usize,
    pub event_count: usize,
    pub donation_count: usize,
    pub blood_donation_count: usize,
    pub donation_total: f64,
}

/// The record store: four record sets plus the credential mapping, loaded
/// from and flushed to one backing file.
///
/// The in-memory state is the source of truth; the file is a mirror. Every
/// mutating operation validates first, mutates, then persists the whole
/// snapshot while still holding the store lock, so a concurrent autosave can
/// never observe (or write) a half-applied change.
pub struct RecordStore {
    /// Store configuration.
    config: StoreConfig,

    /// Full state, guarded by the single store lock.
    inner: Mutex<Snapshot>,
}

impl RecordStore {
    /// Open the store at the configured path.
    ///
    /// A missing, unreadable, or malformed backing file falls back to the
    /// default state (empty sets, one default credential pair); opening
    /// never fails.
    pub fn open(config: StoreConfig) -> Self {
        let inner = Mutex::new(Snapshot::load(&config.path));
        Self { config, inner }
    }

    /// Open with the default configuration at `path`.
    pub fn open_at(path: impl Into<PathBuf>) -> Self {
        Self::open(StoreConfig {
            path: path.into(),
            ..Default::default()
        })
    }

    /// Validate, mutate, persist - in that order, under the store lock.
    ///
    /// On validation failure nothing changes. If the flush fails the
    /// mutation is kept in memory and the IO error is surfaced; the caller
    /// may retry [`RecordStore::save`] later.
    fn mutate<R>(&self, op: impl FnOnce(&mut Snapshot) -> Result<R>) -> Result<R> {
        let mut state = self.inner.lock();
        let out = op(&mut state)?;
        state.save(&self.config.path)?;
        Ok(out)
    }

    // --- Member Operations ---

    /// Add a member. Fails on empty fields or a duplicate email.
    pub fn add_member(&self, draft: MemberDraft) -> Result<RecordId> {
        let member = draft.validate()?;
        self.mutate(|state| {
            if state.members.iter().any(|m| m.email == member.email) {
                return Err(StoreError::EmailExists(member.email.clone()));
            }
            Ok(state.members.insert(member))
        })
    }

    /// Overwrite every field of the member with `id`.
    ///
    /// The email conflict check excludes the member being updated.
    pub fn update_member(&self, id: RecordId, draft: MemberDraft) -> Result<()> {
        let member = draft.validate()?;
        self.mutate(|state| {
            if !state.members.contains(id) {
                return Err(StoreError::NotFound(id));
            }
            if state
                .members
                .iter()
                .any(|m| m.id != id && m.email == member.email)
            {
                return Err(StoreError::EmailExists(member.email.clone()));
            }
            state.members.update(id, member)
        })
    }

    /// Delete the member with `id`.
    pub fn delete_member(&self, id: RecordId) -> Result<()> {
        self.mutate(|state| state.members.remove(id).map(|_| ()))
    }

    /// All members, in insertion order.
    pub fn list_members(&self) -> Vec<Member> {
        self.inner.lock().members.list()
    }

    /// Members matching `query` (name, email, phone, or address).
    pub fn search_members(&self, query: &str) -> Vec<Member> {
        self.inner.lock().members.search(query)
    }

    // --- Event Operations ---

    /// Add an event. The description may be empty.
    pub fn add_event(&self, draft: EventDraft) -> Result<RecordId> {
        let event = draft.validate()?;
        self.mutate(|state| Ok(state.events.insert(event)))
    }

    pub fn update_event(&self, id: RecordId, draft: EventDraft) -> Result<()> {
        let event = draft.validate()?;
        self.mutate(|state| state.events.update(id, event))
    }

    pub fn delete_event(&self, id: RecordId) -> Result<()> {
        self.mutate(|state| state.events.remove(id).map(|_| ()))
    }

    pub fn list_events(&self) -> Vec<Event> {
        self.inner.lock().events.list()
    }

    /// Events matching `query` (name, date, location, or description).
    pub fn search_events(&self, query: &str) -> Vec<Event> {
        self.inner.lock().events.search(query)
    }

    // --- Donation Operations ---

    /// Add a donation. The amount must parse as a number.
    pub fn add_donation(&self, draft: DonationDraft) -> Result<RecordId> {
        let donation = draft.validate()?;
        self.mutate(|state| Ok(state.donations.insert(donation)))
    }

    pub fn update_donation(&self, id: RecordId, draft: DonationDraft) -> Result<()> {
        let donation = draft.validate()?;
        self.mutate(|state| state.donations.update(id, donation))
    }

    pub fn delete_donation(&self, id: RecordId) -> Result<()> {
        self.mutate(|state| state.donations.remove(id).map(|_| ()))
    }

    pub fn list_donations(&self) -> Vec<Donation> {
        self.inner.lock().donations.list()
    }

    /// Donations matching `query` (donor name, amount as text, or date).
    pub fn search_donations(&self, query: &str) -> Vec<Donation> {
        self.inner.lock().donations.search(query)
    }

    /// Sum of amounts over the full donation set, independent of any search.
    ///
    /// For the total of a filtered view, pass the search result to
    /// [`Donation::total`].
    pub fn donation_total(&self) -> f64 {
        Donation::total(&self.inner.lock().donations.list())
    }

    // --- Blood Donation Operations ---

    pub fn add_blood_donation(&self, draft: BloodDonationDraft) -> Result<RecordId> {
        let donation = draft.validate()?;
        self.mutate(|state| Ok(state.blood_donations.insert(donation)))
    }

    pub fn update_blood_donation(&self, id: RecordId, draft: BloodDonationDraft) -> Result<()> {
        let donation = draft.validate()?;
        self.mutate(|state| state.blood_donations.update(id, donation))
    }

    pub fn delete_blood_donation(&self, id: RecordId) -> Result<()> {
        self.mutate(|state| state.blood_donations.remove(id).map(|_| ()))
    }

    pub fn list_blood_donations(&self) -> Vec<BloodDonation> {
        self.inner.lock().blood_donations.list()
    }

    /// Blood donations matching `query` (donor name, blood group, or date).
    pub fn search_blood_donations(&self, query: &str) -> Vec<BloodDonation> {
        self.inner.lock().blood_donations.search(query)
    }

    /// Number of records in the full blood donation set.
    ///
    /// The count of a filtered view is the search result's length.
    pub fn blood_donation_count(&self) -> usize {
        self.inner.lock().blood_donations.len()
    }

    // --- Credentials ---

    /// Check a username/password pair.
    ///
    /// The username is uppercased before lookup; the password must match
    /// exactly. Credentials are compared in plain text: this is a
    /// convenience gate, not an authentication boundary.
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        self.inner
            .lock()
            .users
            .get(&username.to_uppercase())
            .map_or(false, |stored| stored == password)
    }

    // --- Persistence ---

    /// Flush the full state to the backing file.
    pub fn save(&self) -> Result<()> {
        self.inner.lock().save(&self.config.path)
    }

    /// Write the full state to a caller-chosen path, leaving the backing
    /// file untouched.
    pub fn backup(&self, path: impl AsRef<Path>) -> Result<()> {
        self.inner.lock().save(path.as_ref())
    }

    /// Export one record set as CSV to `path`.
    pub fn export(&self, kind: EntityKind, path: impl AsRef<Path>) -> Result<()> {
        export::write_csv(&self.inner.lock(), kind, path.as_ref())
    }

    // --- Store Operations ---

    /// Counts and totals over the full sets.
    pub fn stats(&self) -> StoreStats {
        let state = self.inner.lock();
        StoreStats {
            member_count: state.members.len(),
            event_count: state.events.len(),
            donation_count: state.donations.len(),
            blood_donation_count: state.blood_donations.len(),
            donation_total: state.donations.iter().map(|d| d.amount).sum(),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// The store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

impl Drop for RecordStore {
    fn drop(&mut self) {
        // Best-effort flush on drop
        let _ = self.save();
    }
}
