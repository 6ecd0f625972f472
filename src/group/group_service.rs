use crate::error::{AppError, Result};
use chrono::{Duration, Utc};
use serde_json::Value;

use super::group_models::{GroupDocument, GroupRecord, GroupSummary};
use super::group_repository::GroupRepository;
use super::group_sanitizer::sanitize;
use super::group_validator::{normalize, validate, validate_group_id};
use super::group_visibility::{view_for, Viewer};

#[derive(Clone)]
pub struct GroupService {
    repo: GroupRepository,
}

impl GroupService {
    pub fn new(repo: GroupRepository) -> Self {
        Self { repo }
    }

    /// Validates, sanitizes and stores a whole group document under the
    /// given id, creating the group when it does not exist yet.
    ///
    /// The overwrite is total: callers are expected to have merged their
    /// change into a full document fetched just before. Two members who
    /// read-modify-write concurrently race, and the later write wins at
    /// document granularity; no version token guards against this.
    pub async fn save(&self, group_id: &str, raw: &Value) -> Result<GroupDocument> {
        let document = prepare_document(group_id, raw)?;

        let value = serde_json::to_value(&document)
            .map_err(|e| AppError::Internal(format!("document failed to serialize: {}", e)))?;
        self.repo.upsert(group_id, &value).await?;

        Ok(document)
    }

    /// Fetches the stored document and derives the viewer-specific view.
    /// An absent group is `Ok(None)`, not an error.
    pub async fn get(&self, group_id: &str, viewer: Viewer<'_>) -> Result<Option<GroupDocument>> {
        let Some(record) = self.repo.find_by_id(group_id).await? else {
            return Ok(None);
        };

        let document = parse_stored(record)?;
        Ok(Some(view_for(&document, viewer)))
    }

    /// Creator-triggered group reset. `createdBy` is a client-supplied
    /// name compared verbatim; nothing cryptographic backs this check.
    /// Groups written before creators were recorded can be deleted by any
    /// member. Destructive and final.
    pub async fn delete(&self, group_id: &str, requested_by: &str) -> Result<()> {
        let record = self
            .repo
            .find_by_id(group_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Group not found".to_string()))?;

        let document = parse_stored(record)?;
        if let Some(creator) = &document.created_by {
            if creator != requested_by {
                return Err(AppError::Forbidden(
                    "Only the group creator can delete the group".to_string(),
                ));
            }
        }

        self.repo.delete(group_id).await?;
        Ok(())
    }

    /// Removes every group whose last write is older than `max_age` and
    /// returns how many were removed. Idempotent: a second run with no
    /// intervening writes removes nothing.
    pub async fn sweep_expired(&self, max_age: Duration) -> Result<u64> {
        let cutoff = Utc::now() - max_age;
        let removed = self.repo.delete_older_than(cutoff).await?;
        Ok(removed)
    }

    pub async fn list_groups(&self) -> Result<Vec<GroupSummary>> {
        self.repo.list_summaries().await
    }
}

/// The pure half of `save`: id check, alias normalization, validation and
/// sanitization, with every problem collected into one error list.
fn prepare_document(group_id: &str, raw: &Value) -> Result<GroupDocument> {
    let mut errors = validate_group_id(group_id);

    let normalized = normalize(raw);
    errors.extend(validate(&normalized));
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let document: GroupDocument = serde_json::from_value(normalized)
        .map_err(|e| AppError::Internal(format!("validated document failed to parse: {}", e)))?;

    Ok(sanitize(document))
}

// Stored rows may carry shapes written by older versions (bare-string
// claimedBy); the model's lenient deserializer absorbs those. Anything
// else in the column is corruption worth surfacing.
fn parse_stored(record: GroupRecord) -> Result<GroupDocument> {
    serde_json::from_value(record.document).map_err(|e| {
        tracing::error!(
            "Stored document for group '{}' failed to parse: {}",
            record.group_id,
            e
        );
        AppError::Internal(format!(
            "stored document for group '{}' is unreadable",
            record.group_id
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prepare_collects_id_and_document_errors_together() {
        let err = prepare_document("has spaces", &json!({ "users": [] })).unwrap_err();
        let AppError::Validation(errors) = err else {
            panic!("expected validation errors");
        };
        assert!(errors.iter().any(|e| e.contains("group id")));
        assert!(errors.iter().any(|e| e.contains("groupName is required")));
        assert!(errors.iter().any(|e| e.contains("users")));
    }

    #[test]
    fn test_prepare_normalizes_and_sanitizes() {
        let doc = prepare_document(
            "smith-family",
            &json!({
                "groupName": "<b>Smith Family</b>",
                "people": { "Ann": { "wishlist": [{ "item": "Socks <script>x</script>" }] } }
            }),
        )
        .unwrap();

        assert_eq!(doc.group_name, "Smith Family");
        assert_eq!(doc.users["Ann"].items[0].description, "Socks x");
    }

    #[test]
    fn test_claim_flow_hides_claims_from_the_list_owner() {
        // Ann creates the group with an empty list
        let doc = prepare_document(
            "smith-family",
            &json!({
                "groupName": "Smith Family",
                "createdBy": "Ann",
                "users": { "Ann": { "items": [] } }
            }),
        )
        .unwrap();
        assert!(doc.users["Ann"].items.is_empty());

        // Ann adds an item by overwriting the whole document
        let doc = prepare_document(
            "smith-family",
            &json!({
                "groupName": "Smith Family",
                "createdBy": "Ann",
                "users": { "Ann": { "items": [{ "description": "Socks" }] } }
            }),
        )
        .unwrap();
        let bobs_view = view_for(&doc, Viewer::Member("Bob"));
        assert_eq!(bobs_view.users["Ann"].items[0].description, "Socks");
        assert!(bobs_view.users["Ann"].items[0].claimed_by.is_empty());

        // Bob claims the item through another whole-document overwrite
        let doc = prepare_document(
            "smith-family",
            &json!({
                "groupName": "Smith Family",
                "createdBy": "Ann",
                "users": { "Ann": { "items": [{ "description": "Socks", "claimedBy": ["Bob"] }] } }
            }),
        )
        .unwrap();

        let anns_view = view_for(&doc, Viewer::Member("Ann"));
        assert!(anns_view.users["Ann"].items[0].claimed_by.is_empty());

        let bobs_view = view_for(&doc, Viewer::Member("Bob"));
        assert_eq!(
            bobs_view.users["Ann"].items[0].claimed_by,
            vec!["Bob".to_string()]
        );
    }
}
