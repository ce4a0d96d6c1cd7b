//! # Organization Record Store
//!
//! A single-file record keeper for a small organization: members, events,
//! monetary donations, and blood donations, persisted as one JSON document.
//!
//! ## Core Concepts
//!
//! - **Record sets**: Four independent collections sharing one engine
//!   (integer identity, CRUD, free-text search) with per-entity schemas
//! - **Snapshot**: The full state (all four sets plus credentials), the unit
//!   of save, load, and backup
//! - **Drafts**: Text input validated at the boundary before it becomes a
//!   record; failed operations never mutate
//! - **Autosave**: A background thread flushing the snapshot on a fixed
//!   interval, sharing the store lock with mutations
//!
//! ## Example
//!
//! ```ignore
//! use orgstore::{DonationDraft, MemberDraft, RecordStore};
//!
//! let store = RecordStore::open_at("./organization_data.json");
//!
//! let id = store.add_member(MemberDraft::new(
//!     "Ada Lovelace", "ada@example.org", "555-0100", "1 Main St", "secret",
//! ))?;
//!
//! store.add_donation(DonationDraft::new("Charles Babbage", "125.00", "2024-06-01"))?;
//! assert_eq!(store.donation_total(), 125.0);
//!
//! let matches = store.search_members("lovelace");
//! assert_eq!(matches[0].id, id);
//! ```

pub mod autosave;
pub mod error;
pub mod export;
pub mod records;
pub mod snapshot;
pub mod store;
pub mod types;
pub mod validate;

// Re-exports
pub use autosave::AutosaveHandle;
pub use error::{Result, StoreError};
pub use records::{Record, RecordSet};
pub use snapshot::{Snapshot, DEFAULT_PASSWORD, DEFAULT_USERNAME};
pub use store::{RecordStore, StoreConfig, StoreStats, DEFAULT_AUTOSAVE_INTERVAL};
pub use types::*;
