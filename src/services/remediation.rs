use crate::models::scan::RemediationItem;
use std::collections::HashMap;

/// A deduplicated remediation row ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRemediation {
    pub label: String,
    pub actions: Vec<String>,
}

/// Collapses remediation entries that differ only in label casing or
/// surrounding whitespace into one row per normalized label.
///
/// Rows come out in the order their normalized label was first seen; the
/// first non-empty label spelling wins; each row's actions are the
/// order-preserving union of the actions of every merged entry. The merge
/// is idempotent.
pub fn merge_remediation(items: &[RemediationItem]) -> Vec<MergedRemediation> {
    // Insertion-ordered map: the Vec holds entries in first-seen order, the
    // HashMap finds an existing entry by its normalized key.
    let mut entries: Vec<MergedRemediation> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for item in items {
        let key = item.label.trim().to_lowercase();
        match index_by_key.get(&key) {
            None => {
                index_by_key.insert(key, entries.len());
                let mut actions = Vec::new();
                append_unique(&mut actions, &item.actions);
                entries.push(MergedRemediation {
                    label: item.label.clone(),
                    actions,
                });
            }
            Some(&at) => {
                let entry = &mut entries[at];
                if entry.label.is_empty() {
                    entry.label = item.label.clone();
                }
                append_unique(&mut entry.actions, &item.actions);
            }
        }
    }

    entries
}

fn append_unique(actions: &mut Vec<String>, incoming: &[String]) {
    for action in incoming {
        if !actions.iter().any(|existing| existing == action) {
            actions.push(action.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(label: &str, actions: &[&str]) -> RemediationItem {
        RemediationItem {
            finding_id: None,
            label: label.to_string(),
            actions: actions.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn casing_and_whitespace_variants_merge_into_one_row() {
        let merged = merge_remediation(&[
            item("Email", &["Mask"]),
            item(" email ", &["Mask", "Redact"]),
        ]);
        assert_eq!(
            merged,
            vec![MergedRemediation {
                label: "Email".to_string(),
                actions: vec!["Mask".to_string(), "Redact".to_string()],
            }]
        );
    }

    #[test]
    fn first_seen_order_is_preserved() {
        let merged = merge_remediation(&[
            item("AWS Access Key", &["Rotate Secret"]),
            item("Email Address", &["Mask Value"]),
            item("aws access key", &["Exclude File"]),
        ]);
        let labels: Vec<&str> = merged.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["AWS Access Key", "Email Address"]);
        assert_eq!(
            merged[0].actions,
            vec!["Rotate Secret".to_string(), "Exclude File".to_string()]
        );
    }

    #[test]
    fn duplicate_actions_within_one_item_collapse() {
        let merged = merge_remediation(&[item("Phone", &["Mask", "Mask", "Redact"])]);
        assert_eq!(merged[0].actions, vec!["Mask".to_string(), "Redact".to_string()]);
    }

    #[test]
    fn empty_label_adopts_a_later_spelling() {
        // "" and "  " normalize to the same key; the empty first-seen
        // label gives way to the later non-empty one.
        let merged = merge_remediation(&[
            item("", &["Review"]),
            item("  ", &["Escalate"]),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].label, "  ");
        assert_eq!(
            merged[0].actions,
            vec!["Review".to_string(), "Escalate".to_string()]
        );
    }

    #[test]
    fn merge_is_idempotent() {
        let input = vec![
            item("Email", &["Mask"]),
            item("EMAIL", &["Redact", "Mask"]),
            item("SSN", &["Mask"]),
            item(" email", &["Replace with Synthetic"]),
        ];
        let once = merge_remediation(&input);
        let as_items: Vec<RemediationItem> = once
            .iter()
            .map(|m| RemediationItem {
                finding_id: None,
                label: m.label.clone(),
                actions: m.actions.clone(),
            })
            .collect();
        let twice = merge_remediation(&as_items);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(merge_remediation(&[]).is_empty());
    }
}
