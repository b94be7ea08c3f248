use crate::models::{MatchGroup, TrialMatch};

/// Global result cap applied after grouping
pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// Order scored trials into presentation buckets and apply the global cap
///
/// Global order: bucket precedence, then score descending, then nct_id
/// ascending so equal scores rank reproducibly. The cap truncates the
/// flattened ordered list (lowest-ranked entries across all buckets go
/// first) and the retained prefix is regrouped without reordering, so a
/// low-scoring entry in a near bucket still outlives the tail of a farther
/// one.
pub fn group_and_rank(mut scored: Vec<TrialMatch>, limit: usize) -> Vec<MatchGroup> {
    scored.sort_by(|a, b| {
        a.bucket
            .cmp(&b.bucket)
            .then_with(|| b.score.total_cmp(&a.score))
            .then_with(|| a.nct_id.cmp(&b.nct_id))
    });
    scored.truncate(limit);

    let mut groups: Vec<MatchGroup> = Vec::new();
    for entry in scored {
        match groups.last_mut() {
            Some(group) if group.bucket == entry.bucket => group.matches.push(entry),
            _ => groups.push(MatchGroup {
                bucket: entry.bucket,
                label: entry.bucket.label().to_string(),
                matches: vec![entry],
            }),
        }
    }
    groups
}
