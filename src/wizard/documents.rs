//! Upload-slot bookkeeping for the Documents step.
//!
//! Every slot is an explicit state machine (empty → uploading → uploaded or
//! failed) keyed into a flat map. Repeat uploads to the same slot are
//! last-write-wins; a failed upload never clobbers a previously uploaded
//! record.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::form::ServiceType;

/// The document slots a registration collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSlot {
    Pan,
    Aadhaar,
    Photo,
    AddressProof,
    CompanyAddressProof,
}

impl DocumentSlot {
    /// The four per-party slots the submission assembler reads back.
    pub const PARTY_SLOTS: [DocumentSlot; 4] = [
        Self::Pan,
        Self::Aadhaar,
        Self::Photo,
        Self::AddressProof,
    ];

    /// Base identifier used in slot keys and payload fields.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Pan => "pan",
            Self::Aadhaar => "aadhaar",
            Self::Photo => "photo",
            Self::AddressProof => "address_proof",
            Self::CompanyAddressProof => "company_address_proof",
        }
    }

    /// Whether this slot belongs to a party rather than the company.
    pub fn is_party_slot(&self) -> bool {
        !matches!(self, Self::CompanyAddressProof)
    }
}

/// Key under which a slot's upload is recorded: the slot identifier,
/// suffixed with the party index when one applies.
pub fn slot_key(slot: DocumentSlot, party_index: Option<usize>) -> String {
    match party_index {
        Some(idx) => format!("{}_{idx}", slot.key()),
        None => slot.key().to_string(),
    }
}

/// Category tag sent to the upload endpoint: `company_docs` for company
/// slots, `{label}_{idx}_docs` for indexed party slots, `{label}_docs` for
/// un-indexed ones (proprietor), with `client_docs` as the catch-all.
pub fn upload_category(
    service: ServiceType,
    slot: DocumentSlot,
    party_index: Option<usize>,
) -> String {
    if !slot.is_party_slot() {
        return "company_docs".to_string();
    }
    match party_index {
        Some(idx) => format!("{}_{idx}_docs", service.party_label()),
        None if service == ServiceType::Proprietorship => "proprietor_docs".to_string(),
        None => "client_docs".to_string(),
    }
}

/// A completed upload, as recorded against its slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedFileRecord {
    pub slot_key: String,
    /// Original file name, for display.
    pub display_name: String,
    /// Set for image uploads only; the UI shows a thumbnail.
    pub preview_url: Option<String>,
    pub remote_url: String,
    pub remote_id: String,
    pub uploaded_at: DateTime<Utc>,
}

/// State of one upload slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotState {
    Empty,
    /// Upload in flight. `prior` keeps the last successful record so a
    /// failure can fall back to it.
    Uploading {
        prior: Option<UploadedFileRecord>,
    },
    Uploaded(UploadedFileRecord),
    Failed(String),
}

/// Flat map of slot key → slot state for one form instance.
#[derive(Debug, Default)]
pub struct DocumentStore {
    slots: BTreeMap<String, SlotState>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, key: &str) -> &SlotState {
        static EMPTY: SlotState = SlotState::Empty;
        self.slots.get(key).unwrap_or(&EMPTY)
    }

    /// Mark an upload as in flight, keeping any prior record for fallback.
    pub fn begin_upload(&mut self, key: &str) {
        let prior = match self.slots.remove(key) {
            Some(SlotState::Uploaded(record)) => Some(record),
            Some(SlotState::Uploading { prior }) => prior,
            _ => None,
        };
        self.slots
            .insert(key.to_string(), SlotState::Uploading { prior });
    }

    /// Record a completed upload. Last write per key wins.
    pub fn complete(&mut self, key: &str, record: UploadedFileRecord) {
        self.slots.insert(key.to_string(), SlotState::Uploaded(record));
    }

    /// Record a failed upload. A previously uploaded record is restored;
    /// otherwise the slot is marked failed.
    pub fn fail(&mut self, key: &str, error: String) {
        let state = match self.slots.remove(key) {
            Some(SlotState::Uploading { prior: Some(rec) }) => SlotState::Uploaded(rec),
            Some(SlotState::Uploaded(rec)) => SlotState::Uploaded(rec),
            _ => SlotState::Failed(error),
        };
        self.slots.insert(key.to_string(), state);
    }

    /// The uploaded record visible under a key, if any. An in-flight slot
    /// still exposes its prior record.
    pub fn record(&self, key: &str) -> Option<&UploadedFileRecord> {
        match self.slots.get(key) {
            Some(SlotState::Uploaded(rec)) => Some(rec),
            Some(SlotState::Uploading { prior }) => prior.as_ref(),
            _ => None,
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.record(key).is_some()
    }

    /// All uploaded records, in key order.
    pub fn records(&self) -> Vec<&UploadedFileRecord> {
        self.slots.keys().filter_map(|k| self.record(k)).collect()
    }
}
