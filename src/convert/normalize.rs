/// Keywords uppercased by [`clean`], applied in this exact order. The two
/// multi-word entries are matched as whole tokens, so "group by" becomes
/// "GROUP BY" in one step rather than word by word.
const KEYWORDS: [&str; 12] = [
    "SELECT", "FROM", "WHERE", "JOIN", "ON", "GROUP BY", "ORDER BY", "LIMIT", "AND", "OR",
    "HAVING", "AS",
];

/// Normalize raw model output into a single-line SQL string with uppercase
/// keywords.
///
/// Trims, collapses internal whitespace runs to single spaces, then replaces
/// every all-lowercase and every first-letter-capitalized occurrence of each
/// keyword with its uppercase form. This is plain substring replacement with
/// no SQL tokenization, so keyword-like substrings inside identifiers or
/// string literals are transformed too.
pub fn clean(raw: &str) -> String {
    // Trim and collapse whitespace in one pass.
    let mut sql = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    for keyword in KEYWORDS {
        sql = sql.replace(&keyword.to_lowercase(), keyword);
        sql = sql.replace(&capitalized(keyword), keyword);
    }

    sql
}

/// First character uppercase, everything after it lowercase, over the whole
/// string ("GROUP BY" -> "Group by").
fn capitalized(keyword: &str) -> String {
    let lower = keyword.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => lower,
    }
}
