use ledger::structs::RepostRecord;

const RECENT_LIMIT: usize = 5;

/// Render the repoststats response. Total count plus either the five most
/// recent entries or, with `full`, every entry in insertion order.
pub(super) fn report(records: &[RepostRecord], full: bool) -> String {
    if records.is_empty() {
        return "No reposts yet.".to_string();
    }

    let shown = if full {
        records
    } else {
        &records[records.len().saturating_sub(RECENT_LIMIT)..]
    };

    format!(
        "📊 Total reposted messages: {}\n{}",
        records.len(),
        shown
            .iter()
            .map(|record| format!("📎 {} ➜ {}", record.original, record.repost))
            .collect::<Vec<String>>()
            .join("\n")
    )
}
