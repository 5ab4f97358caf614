//! Best-effort audit writes.

use gearshed_store::{ActivityLogEntry, AuditSink};

/// Append an activity entry, downgrading failure to a warning.
///
/// Audit writes never abort the business operation that triggered them.
pub fn record_activity<S: AuditSink + ?Sized>(sink: &S, entry: ActivityLogEntry) {
    let action = entry.action.clone();
    if let Err(error) = sink.append_activity(entry) {
        tracing::warn!(%error, %action, "activity log write failed; operation unaffected");
    }
}
