//! CSV export of a single record set.
//!
//! One file per export: a fixed header (field order matches the backing
//! document, id first) and one row per record. Amounts are formatted with
//! two decimal places, as displayed.

use crate::error::Result;
use crate::snapshot::Snapshot;
use crate::types::EntityKind;
use std::fs;
use std::path::Path;

/// Write the named record set of `snapshot` to `path` as CSV.
pub fn write_csv(snapshot: &Snapshot, kind: EntityKind, path: &Path) -> Result<()> {
    let content = render(snapshot, kind);
    fs::write(path, content)?;
    Ok(())
}

fn render(snapshot: &Snapshot, kind: EntityKind) -> String {
    let mut out = String::new();
    match kind {
        EntityKind::Members => {
            push_row(&mut out, &["id", "name", "email", "phone", "address", "password"]);
            for m in snapshot.members.iter() {
                push_row(
                    &mut out,
                    &[
                        &m.id.to_string(),
                        &m.name,
                        &m.email,
                        &m.phone,
                        &m.address,
                        &m.password,
                    ],
                );
            }
        }
        EntityKind::Events => {
            push_row(&mut out, &["id", "name", "date", "location", "description"]);
            for e in snapshot.events.iter() {
                push_row(
                    &mut out,
                    &[&e.id.to_string(), &e.name, &e.date, &e.location, &e.description],
                );
            }
        }
        EntityKind::Donations => {
            push_row(&mut out, &["id", "donor_name", "amount", "date"]);
            for d in snapshot.donations.iter() {
                push_row(
                    &mut out,
                    &[
                        &d.id.to_string(),
                        &d.donor_name,
                        &format!("{:.2}", d.amount),
                        &d.date,
                    ],
                );
            }
        }
        EntityKind::BloodDonations => {
            push_row(&mut out, &["id", "donor_name", "blood_group", "donation_date"]);
            for b in snapshot.blood_donations.iter() {
                push_row(
                    &mut out,
                    &[&b.id.to_string(), &b.donor_name, &b.blood_group, &b.donation_date],
                );
            }
        }
    }
    out
}

fn push_row<S: AsRef<str>>(out: &mut String, fields: &[S]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&csv_escape(field.as_ref()));
    }
    out.push('\n');
}

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        let escaped = s.replace('"', "\"\"");
        format!("\"{}\"", escaped)
    } else {
        s.to_string()
    }
}
