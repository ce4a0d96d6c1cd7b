//! Core types for the record store.

use crate::error::Result;
use crate::records::Record;
use crate::validate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a record within its set.
///
/// Assigned on insert as `max(existing ids, default 0) + 1` and immutable
/// afterwards. Deleting the highest-id record lets the next insert reuse
/// that numeric id.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct RecordId(pub u64);

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The four kinds of record sets held by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Members,
    Events,
    Donations,
    BloodDonations,
}

impl EntityKind {
    /// Name of the record set as it appears in the backing document.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Members => "members",
            EntityKind::Events => "events",
            EntityKind::Donations => "donations",
            EntityKind::BloodDonations => "blood_donations",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered member of the organization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: RecordId,
    pub name: String,
    /// Unique across the member set (case-sensitive comparison).
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Stored in plain text; the store makes no security guarantees.
    pub password: String,
}

impl Record for Member {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
            || self.phone.to_lowercase().contains(needle)
            || self.address.to_lowercase().contains(needle)
    }
}

/// Unvalidated member fields as entered by the caller.
#[derive(Clone, Debug, Default)]
pub struct MemberDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub password: String,
}

impl MemberDraft {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            address: address.into(),
            password: password.into(),
        }
    }

    /// Check every field and build a member with a placeholder id.
    ///
    /// Email uniqueness is the store's concern, not the draft's.
    pub fn validate(self) -> Result<Member> {
        let name = validate::required("name", self.name)?;
        let email = validate::required("email", self.email)?;
        let phone = validate::required("phone", self.phone)?;
        let address = validate::required("address", self.address)?;
        let password = validate::required("password", self.password)?;

        Ok(Member {
            id: RecordId(0),
            name,
            email,
            phone,
            address,
            password,
        })
    }
}

/// An organization event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: RecordId,
    pub name: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub location: String,
    /// May be empty; tolerated as absent in older documents.
    #[serde(default)]
    pub description: String,
}

impl Record for Event {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.date.to_lowercase().contains(needle)
            || self.location.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// Unvalidated event fields.
#[derive(Clone, Debug, Default)]
pub struct EventDraft {
    pub name: String,
    pub date: String,
    pub location: String,
    pub description: String,
}

impl EventDraft {
    pub fn new(
        name: impl Into<String>,
        date: impl Into<String>,
        location: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            location: location.into(),
            description: description.into(),
        }
    }

    pub fn validate(self) -> Result<Event> {
        let name = validate::required("name", self.name)?;
        let date = validate::required("date", self.date)?;
        let location = validate::required("location", self.location)?;
        let date = validate::date("date", date)?;

        Ok(Event {
            id: RecordId(0),
            name,
            date,
            location,
            description: self.description,
        })
    }
}

/// A monetary donation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub id: RecordId,
    pub donor_name: String,
    /// Stored as a plain number; formatted to two decimals on export.
    pub amount: f64,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
}

impl Donation {
    /// Sum of amounts over a caller-chosen subset, e.g. the result of a
    /// search. The full-set total lives on the store.
    pub fn total(records: &[Donation]) -> f64 {
        records.iter().map(|d| d.amount).sum()
    }
}

impl Record for Donation {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn matches(&self, needle: &str) -> bool {
        self.donor_name.to_lowercase().contains(needle)
            || self.amount.to_string().contains(needle)
            || self.date.to_lowercase().contains(needle)
    }
}

/// Unvalidated donation fields. The amount is text until validated.
#[derive(Clone, Debug, Default)]
pub struct DonationDraft {
    pub donor_name: String,
    pub amount: String,
    pub date: String,
}

impl DonationDraft {
    pub fn new(
        donor_name: impl Into<String>,
        amount: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            donor_name: donor_name.into(),
            amount: amount.into(),
            date: date.into(),
        }
    }

    pub fn validate(self) -> Result<Donation> {
        let donor_name = validate::required("donor_name", self.donor_name)?;
        let amount = validate::required("amount", self.amount)?;
        let date = validate::required("date", self.date)?;
        let amount = validate::amount(&amount)?;
        let date = validate::date("date", date)?;

        Ok(Donation {
            id: RecordId(0),
            donor_name,
            amount,
            date,
        })
    }
}

/// A blood donation record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BloodDonation {
    pub id: RecordId,
    pub donor_name: String,
    pub blood_group: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub donation_date: String,
}

impl Record for BloodDonation {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn matches(&self, needle: &str) -> bool {
        self.donor_name.to_lowercase().contains(needle)
            || self.blood_group.to_lowercase().contains(needle)
            || self.donation_date.to_lowercase().contains(needle)
    }
}

/// Unvalidated blood donation fields.
#[derive(Clone, Debug, Default)]
pub struct BloodDonationDraft {
    pub donor_name: String,
    pub blood_group: String,
    pub donation_date: String,
}

impl BloodDonationDraft {
    pub fn new(
        donor_name: impl Into<String>,
        blood_group: impl Into<String>,
        donation_date: impl Into<String>,
    ) -> Self {
        Self {
            donor_name: donor_name.into(),
            blood_group: blood_group.into(),
            donation_date: donation_date.into(),
        }
    }

    pub fn validate(self) -> Result<BloodDonation> {
        let donor_name = validate::required("donor_name", self.donor_name)?;
        let blood_group = validate::required("blood_group", self.blood_group)?;
        let donation_date = validate::required("donation_date", self.donation_date)?;
        let donation_date = validate::date("donation_date", donation_date)?;

        Ok(BloodDonation {
            id: RecordId(0),
            donor_name,
            blood_group,
            donation_date,
        })
    }
}
