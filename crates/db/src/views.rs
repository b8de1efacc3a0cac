//! Composed read views returned by the tree operations.
//!
//! Every response shape that joins a tree with its status history or
//! comments is assembled here, from rows already loaded by a repository.
//! Nothing in this module touches the database.

use dendro_core::status::{resolve_current, resolve_current_by_tree, sort_history};
use dendro_core::types::{DbId, RecordDate};
use serde::Serialize;

use crate::models::comment::Comment;
use crate::models::status::StatusRecord;
use crate::models::tree::Tree;

/// A tree merged with its current status, as served by the listing.
///
/// The tree's own fields are flattened into the top-level object. All status
/// fields are `null` when the tree has no observed status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeWithCurrentStatus {
    #[serde(flatten)]
    pub tree: Tree,
    pub status_id: Option<DbId>,
    pub status: Option<String>,
    pub status_notes: Option<String>,
    pub date_recorded: Option<RecordDate>,
}

/// Full detail of one tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeDetail {
    pub tree: Tree,
    pub current_status: Option<StatusRecord>,
    /// Newest first, future plans included.
    pub status_history: Vec<StatusRecord>,
    /// Reviewed comments only, newest first.
    pub comments: Vec<Comment>,
}

/// Result of creating a tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedTree {
    pub tree_id: DbId,
    pub tree: TreeWithCurrentStatus,
}

/// Merge a tree with an already-resolved current status.
pub fn with_current_status(tree: Tree, current: Option<&StatusRecord>) -> TreeWithCurrentStatus {
    TreeWithCurrentStatus {
        tree,
        status_id: current.map(|s| s.id),
        status: current.map(|s| s.status.clone()),
        status_notes: current.and_then(|s| s.notes.clone()),
        date_recorded: current.map(|s| s.date_recorded),
    }
}

/// Build the listing: every tree exactly once, in the given order, each
/// merged with the current status resolved from `records`.
///
/// `records` may hold rows for any set of trees; rows for trees not in
/// `trees` are ignored.
pub fn listing(trees: Vec<Tree>, records: &[StatusRecord]) -> Vec<TreeWithCurrentStatus> {
    let current = resolve_current_by_tree(records);
    trees
        .into_iter()
        .map(|tree| {
            let status = current.get(&tree.id).copied();
            with_current_status(tree, status)
        })
        .collect()
}

/// Build the detail view. History is put in newest-first order and the
/// current status is resolved from it.
pub fn tree_detail(
    tree: Tree,
    mut status_history: Vec<StatusRecord>,
    mut comments: Vec<Comment>,
) -> TreeDetail {
    sort_history(&mut status_history);
    comments.retain(|c| c.is_reviewed);
    comments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));

    let current_status = resolve_current(&status_history).cloned();

    TreeDetail {
        tree,
        current_status,
        status_history,
        comments,
    }
}

/// Build the create response from the inserted tree and its initial status.
pub fn created_tree(tree: Tree, initial: &StatusRecord) -> CreatedTree {
    let tree_id = tree.id;
    let current = resolve_current(std::slice::from_ref(initial));
    CreatedTree {
        tree_id,
        tree: with_current_status(tree, current),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;

    fn tree(id: DbId, species: &str) -> Tree {
        Tree {
            id,
            latitude: 55.75,
            longitude: 37.61,
            species: species.to_string(),
            address: None,
            diameter: None,
            height: None,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    fn status(id: DbId, tree_id: DbId, day: u32, label: &str, future: bool) -> StatusRecord {
        StatusRecord {
            id,
            tree_id,
            status: label.to_string(),
            notes: Some(format!("note {id}")),
            date_recorded: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            is_future_plan: future,
        }
    }

    fn comment(id: DbId, tree_id: DbId, minute: u32, reviewed: bool) -> Comment {
        Comment {
            id,
            tree_id,
            user_name: Some(String::new()),
            text: format!("comment {id}"),
            contact_email: Some(String::new()),
            created_at: Utc.with_ymd_and_hms(2024, 5, 2, 9, minute, 0).unwrap(),
            is_reviewed: reviewed,
        }
    }

    #[test]
    fn listing_keeps_trees_without_status() {
        let trees = vec![tree(1, "Дуб"), tree(2, "Липа")];
        let records = vec![status(10, 1, 3, "good", false), status(11, 2, 9, "poor", true)];

        let rows = listing(trees, &records);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].status.as_deref(), Some("good"));
        assert_eq!(rows[0].status_notes.as_deref(), Some("note 10"));
        assert_eq!(rows[1].tree.id, 2);
        assert_eq!(rows[1].status, None);
        assert_eq!(rows[1].date_recorded, None);
    }

    #[test]
    fn listing_ignores_rows_for_unlisted_trees() {
        let rows = listing(vec![tree(1, "Дуб")], &[status(5, 99, 1, "good", false)]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status_id, None);
    }

    #[test]
    fn listing_serializes_flat() {
        let rows = listing(vec![tree(1, "Дуб")], &[status(10, 1, 3, "good", false)]);
        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["species"], "Дуб");
        assert_eq!(json["status"], "good");
        assert_eq!(json["date_recorded"], "2024-05-03");
        assert!(json.get("tree").is_none());
    }

    #[test]
    fn detail_orders_history_and_resolves_current() {
        let history = vec![
            status(1, 1, 1, "good", false),
            status(2, 1, 20, "critical", true),
            status(3, 1, 10, "poor", false),
            status(4, 1, 10, "satisfactory", false),
        ];
        let detail = tree_detail(tree(1, "Дуб"), history, Vec::new());

        let ids: Vec<DbId> = detail.status_history.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 4, 3, 1]);
        assert_eq!(detail.current_status.unwrap().id, 4);
    }

    #[test]
    fn detail_serves_reviewed_comments_newest_first() {
        let comments = vec![
            comment(1, 1, 5, true),
            comment(2, 1, 30, false),
            comment(3, 1, 15, true),
        ];
        let detail = tree_detail(tree(1, "Дуб"), vec![status(1, 1, 1, "good", false)], comments);

        let ids: Vec<DbId> = detail.comments.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn created_view_carries_initial_status() {
        let initial = status(7, 3, 14, "good", false);
        let created = created_tree(tree(3, "Клен"), &initial);

        assert_eq!(created.tree_id, 3);
        assert_eq!(created.tree.status.as_deref(), Some("good"));
        assert_eq!(created.tree.status_id, Some(7));
    }
}
