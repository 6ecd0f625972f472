use chrono::NaiveDate;
use serde_json::{Map, Value};

use super::group_models::{
    MAX_DESCRIPTION_LEN, MAX_DOCUMENT_BYTES, MAX_EVENT_TYPE_LEN, MAX_GROUP_ID_LEN,
    MAX_GROUP_NAME_LEN, MAX_ITEMS_PER_MEMBER, MAX_MEMBERS_PER_GROUP, MAX_MEMBER_NAME_LEN,
    MAX_NOTES_LEN, MAX_PRICE_LEN,
};

/// Rewrites legacy field-name aliases into the canonical document shape.
/// Older clients sent `people` for `users`, `wishlist` for `items`,
/// `item`/`name` for `description` and `details` for `notes`. This is the
/// only layer that knows about the old names; everything past the validator
/// sees canonical keys only.
pub fn normalize(raw: &Value) -> Value {
    let Value::Object(doc) = raw else {
        return raw.clone();
    };

    let mut out = Map::new();
    for (key, value) in doc {
        match key.as_str() {
            "people" if !doc.contains_key("users") => {
                out.insert("users".to_string(), normalize_users(value));
            }
            "users" => {
                out.insert("users".to_string(), normalize_users(value));
            }
            "holiday" if !doc.contains_key("eventType") => {
                out.insert("eventType".to_string(), value.clone());
            }
            _ => {
                out.insert(key.clone(), value.clone());
            }
        }
    }
    Value::Object(out)
}

fn normalize_users(users: &Value) -> Value {
    let Value::Object(users) = users else {
        return users.clone();
    };

    let mut out = Map::new();
    for (member, wishlist) in users {
        out.insert(member.clone(), normalize_wishlist(wishlist));
    }
    Value::Object(out)
}

fn normalize_wishlist(wishlist: &Value) -> Value {
    let Value::Object(wishlist) = wishlist else {
        return wishlist.clone();
    };

    let mut out = Map::new();
    for (key, value) in wishlist {
        match key.as_str() {
            "wishlist" if !wishlist.contains_key("items") => {
                out.insert("items".to_string(), normalize_items(value));
            }
            "items" => {
                out.insert("items".to_string(), normalize_items(value));
            }
            _ => {
                out.insert(key.clone(), value.clone());
            }
        }
    }
    Value::Object(out)
}

fn normalize_items(items: &Value) -> Value {
    let Value::Array(items) = items else {
        return items.clone();
    };
    Value::Array(items.iter().map(normalize_item).collect())
}

fn normalize_item(item: &Value) -> Value {
    let Value::Object(item) = item else {
        return item.clone();
    };

    let mut out = Map::new();
    for (key, value) in item {
        match key.as_str() {
            "item" | "name" if !item.contains_key("description") => {
                // first alias wins when both are present
                out.entry("description".to_string())
                    .or_insert_with(|| value.clone());
            }
            "details" if !item.contains_key("notes") => {
                out.insert("notes".to_string(), value.clone());
            }
            _ => {
                out.insert(key.clone(), value.clone());
            }
        }
    }
    Value::Object(out)
}

/// Checks a normalized candidate document against the shape and size rules.
/// Returns an empty vec when the document is valid; otherwise one
/// human-readable message per problem. Never mutates the input and never
/// panics on missing or mistyped fields.
pub fn validate(doc: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    let Value::Object(fields) = doc else {
        return vec!["document must be a JSON object".to_string()];
    };

    if let Ok(serialized) = serde_json::to_vec(doc) {
        if serialized.len() > MAX_DOCUMENT_BYTES {
            errors.push(format!(
                "document exceeds the maximum size of {} KiB",
                MAX_DOCUMENT_BYTES / 1024
            ));
        }
    }

    match fields.get("groupName") {
        None | Some(Value::Null) => errors.push("groupName is required".to_string()),
        Some(Value::String(name)) => {
            if name.trim().is_empty() {
                errors.push("groupName cannot be empty".to_string());
            } else if name.chars().count() > MAX_GROUP_NAME_LEN {
                errors.push(format!(
                    "groupName must be at most {} characters",
                    MAX_GROUP_NAME_LEN
                ));
            }
        }
        Some(_) => errors.push("groupName must be a string".to_string()),
    }

    match fields.get("eventType") {
        None | Some(Value::Null) => {}
        Some(Value::String(label)) => {
            if label.chars().count() > MAX_EVENT_TYPE_LEN {
                errors.push(format!(
                    "eventType must be at most {} characters",
                    MAX_EVENT_TYPE_LEN
                ));
            }
        }
        Some(_) => errors.push("eventType must be a string".to_string()),
    }

    match fields.get("eventDate") {
        None | Some(Value::Null) => {}
        Some(Value::String(date)) => {
            if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
                errors.push("eventDate must be a calendar date in YYYY-MM-DD format".to_string());
            }
        }
        Some(_) => errors.push("eventDate must be a string in YYYY-MM-DD format".to_string()),
    }

    match fields.get("createdBy") {
        None | Some(Value::Null) => {}
        Some(Value::String(name)) => {
            if name.chars().count() > MAX_MEMBER_NAME_LEN {
                errors.push(format!(
                    "createdBy must be at most {} characters",
                    MAX_MEMBER_NAME_LEN
                ));
            }
        }
        Some(_) => errors.push("createdBy must be a string".to_string()),
    }

    match fields.get("users") {
        None | Some(Value::Null) => {
            errors.push("users is required and must be an object mapping member names to wishlists".to_string());
        }
        Some(Value::Object(users)) => {
            if users.len() > MAX_MEMBERS_PER_GROUP {
                errors.push(format!(
                    "a group cannot have more than {} members",
                    MAX_MEMBERS_PER_GROUP
                ));
            }
            for (member, wishlist) in users {
                validate_member(member, wishlist, &mut errors);
            }
        }
        Some(_) => {
            errors.push("users must be an object mapping member names to wishlists, not a list".to_string());
        }
    }

    errors
}

fn validate_member(member: &str, wishlist: &Value, errors: &mut Vec<String>) {
    if member.trim().is_empty() {
        errors.push("member names cannot be empty".to_string());
    } else if member.chars().count() > MAX_MEMBER_NAME_LEN {
        errors.push(format!(
            "member name '{}...' must be at most {} characters",
            member.chars().take(20).collect::<String>(),
            MAX_MEMBER_NAME_LEN
        ));
    }

    let Value::Object(wishlist) = wishlist else {
        errors.push(format!("wishlist for '{}' must be an object", member));
        return;
    };

    match wishlist.get("items") {
        None | Some(Value::Null) => {}
        Some(Value::Array(items)) => {
            if items.len() > MAX_ITEMS_PER_MEMBER {
                errors.push(format!(
                    "'{}' cannot have more than {} items",
                    member, MAX_ITEMS_PER_MEMBER
                ));
            }
            for (index, item) in items.iter().enumerate() {
                validate_item(member, index, item, errors);
            }
        }
        Some(_) => errors.push(format!("items for '{}' must be a list", member)),
    }
}

fn validate_item(member: &str, index: usize, item: &Value, errors: &mut Vec<String>) {
    let label = format!("item {} for '{}'", index + 1, member);

    let Value::Object(item) = item else {
        errors.push(format!("{} must be an object", label));
        return;
    };

    match item.get("description") {
        None | Some(Value::Null) => errors.push(format!("{} is missing a description", label)),
        Some(Value::String(description)) => {
            if description.trim().is_empty() {
                errors.push(format!("{} has an empty description", label));
            } else if description.chars().count() > MAX_DESCRIPTION_LEN {
                errors.push(format!(
                    "description of {} must be at most {} characters",
                    label, MAX_DESCRIPTION_LEN
                ));
            }
        }
        Some(_) => errors.push(format!("description of {} must be a string", label)),
    }

    match item.get("priority") {
        None | Some(Value::Null) => {}
        Some(Value::String(priority)) if matches!(priority.as_str(), "high" | "medium" | "low") => {}
        Some(_) => errors.push(format!(
            "priority of {} must be one of high, medium or low",
            label
        )),
    }

    match item.get("price") {
        None | Some(Value::Null) => {}
        Some(Value::String(price)) => {
            if price.chars().count() > MAX_PRICE_LEN {
                errors.push(format!(
                    "price of {} must be at most {} characters",
                    label, MAX_PRICE_LEN
                ));
            }
        }
        Some(_) => errors.push(format!("price of {} must be a string", label)),
    }

    match item.get("notes") {
        None | Some(Value::Null) => {}
        Some(Value::String(notes)) => {
            if notes.chars().count() > MAX_NOTES_LEN {
                errors.push(format!(
                    "notes of {} must be at most {} characters",
                    label, MAX_NOTES_LEN
                ));
            }
        }
        Some(_) => errors.push(format!("notes of {} must be a string", label)),
    }

    validate_name_list(item.get("claimedBy"), "claimedBy", &label, errors);
    validate_name_list(item.get("splitWith"), "splitWith", &label, errors);

    match item.get("purchased") {
        None | Some(Value::Null) | Some(Value::Bool(_)) => {}
        Some(_) => errors.push(format!("purchased of {} must be true or false", label)),
    }
}

// claimedBy was stored as a single name by early document versions; a bare
// string here is an error, not something to quietly coerce on write.
fn validate_name_list(value: Option<&Value>, field: &str, label: &str, errors: &mut Vec<String>) {
    match value {
        None | Some(Value::Null) => {}
        Some(Value::String(_)) => errors.push(format!(
            "{} of {} must be a list of names, not a single name",
            field, label
        )),
        Some(Value::Array(names)) => {
            for name in names {
                match name {
                    Value::String(name) if name.chars().count() <= MAX_MEMBER_NAME_LEN => {}
                    Value::String(_) => errors.push(format!(
                        "{} of {} contains a name longer than {} characters",
                        field, label, MAX_MEMBER_NAME_LEN
                    )),
                    _ => errors.push(format!(
                        "{} of {} must contain only names",
                        field, label
                    )),
                }
            }
        }
        Some(_) => errors.push(format!("{} of {} must be a list of names", field, label)),
    }
}

/// Group ids are chosen by the client and used verbatim as the storage key
/// and in the shareable URL.
pub fn validate_group_id(group_id: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if group_id.is_empty() {
        errors.push("group id cannot be empty".to_string());
        return errors;
    }
    if group_id.chars().count() > MAX_GROUP_ID_LEN {
        errors.push(format!(
            "group id must be at most {} characters",
            MAX_GROUP_ID_LEN
        ));
    }
    if !group_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        errors.push("group id may only contain letters, digits, '-' and '_'".to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_doc() -> Value {
        json!({
            "groupName": "Smith Family",
            "eventType": "christmas",
            "eventDate": "2026-12-25",
            "createdBy": "Ann",
            "users": {
                "Ann": { "items": [{ "description": "Socks", "priority": "high" }] },
                "Bob": { "items": [] }
            }
        })
    }

    #[test]
    fn test_valid_document_passes() {
        assert!(validate(&valid_doc()).is_empty());
    }

    #[test]
    fn test_validate_does_not_mutate_input() {
        let doc = valid_doc();
        let before = doc.clone();
        let _ = validate(&doc);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_missing_group_name_rejected() {
        let errors = validate(&json!({ "users": {} }));
        assert!(errors.iter().any(|e| e.contains("groupName is required")));
    }

    #[test]
    fn test_overlong_group_name_rejected() {
        let doc = json!({ "groupName": "x".repeat(101), "users": {} });
        let errors = validate(&doc);
        assert!(errors.iter().any(|e| e.contains("groupName must be at most")));
    }

    #[test]
    fn test_users_as_array_rejected() {
        let doc = json!({ "groupName": "Smith Family", "users": ["Ann", "Bob"] });
        let errors = validate(&doc);
        assert!(errors.iter().any(|e| e.contains("not a list")));
    }

    #[test]
    fn test_more_than_fifty_members_rejected() {
        let mut users = Map::new();
        for i in 0..51 {
            users.insert(format!("member-{}", i), json!({ "items": [] }));
        }
        let doc = json!({ "groupName": "Big Group", "users": users });
        let errors = validate(&doc);
        assert!(errors.iter().any(|e| e.contains("more than 50 members")));
    }

    #[test]
    fn test_more_than_hundred_items_rejected() {
        let items: Vec<Value> = (0..101).map(|i| json!({ "description": format!("gift {}", i) })).collect();
        let doc = json!({ "groupName": "Smith Family", "users": { "Ann": { "items": items } } });
        let errors = validate(&doc);
        assert!(errors.iter().any(|e| e.contains("more than 100 items")));
    }

    #[test]
    fn test_bare_string_claimed_by_rejected() {
        let doc = json!({
            "groupName": "Smith Family",
            "users": { "Ann": { "items": [{ "description": "Socks", "claimedBy": "Bob" }] } }
        });
        let errors = validate(&doc);
        assert!(errors
            .iter()
            .any(|e| e.contains("claimedBy") && e.contains("not a single name")));
    }

    #[test]
    fn test_bad_event_date_rejected() {
        let doc = json!({ "groupName": "Smith Family", "eventDate": "soon", "users": {} });
        let errors = validate(&doc);
        assert!(errors.iter().any(|e| e.contains("eventDate")));
    }

    #[test]
    fn test_bad_priority_rejected() {
        let doc = json!({
            "groupName": "Smith Family",
            "users": { "Ann": { "items": [{ "description": "Socks", "priority": "urgent" }] } }
        });
        let errors = validate(&doc);
        assert!(errors.iter().any(|e| e.contains("priority")));
    }

    #[test]
    fn test_missing_description_rejected() {
        let doc = json!({
            "groupName": "Smith Family",
            "users": { "Ann": { "items": [{ "priority": "high" }] } }
        });
        let errors = validate(&doc);
        assert!(errors.iter().any(|e| e.contains("missing a description")));
    }

    #[test]
    fn test_oversized_document_rejected() {
        let doc = json!({
            "groupName": "Smith Family",
            "users": { "Ann": { "items": [{ "description": "x".repeat(400), "notes": "y".repeat(900) }] } }
        });
        // under the cap this passes
        assert!(validate(&doc).is_empty());

        let mut users = Map::new();
        for i in 0..50 {
            let items: Vec<Value> = (0..100)
                .map(|j| json!({ "description": format!("{} {}", "x".repeat(120), j) }))
                .collect();
            users.insert(format!("member-{}", i), json!({ "items": items }));
        }
        let doc = json!({ "groupName": "Big Group", "users": users });
        let errors = validate(&doc);
        assert!(errors.iter().any(|e| e.contains("maximum size")));
    }

    #[test]
    fn test_wrong_typed_fields_are_errors_not_panics() {
        let doc = json!({
            "groupName": 7,
            "eventType": [],
            "eventDate": 20261225,
            "createdBy": {},
            "users": { "Ann": { "items": [{ "description": 1, "purchased": "yes", "splitWith": 4 }] } }
        });
        let errors = validate(&doc);
        assert!(errors.iter().any(|e| e.contains("groupName must be a string")));
        assert!(errors.iter().any(|e| e.contains("eventType must be a string")));
        assert!(errors.iter().any(|e| e.contains("eventDate")));
        assert!(errors.iter().any(|e| e.contains("createdBy must be a string")));
        assert!(errors.iter().any(|e| e.contains("description of item 1 for 'Ann'")));
        assert!(errors.iter().any(|e| e.contains("purchased")));
        assert!(errors.iter().any(|e| e.contains("splitWith")));
    }

    #[test]
    fn test_normalize_people_alias() {
        let doc = normalize(&json!({ "groupName": "g", "people": { "Ann": { "items": [] } } }));
        assert!(doc.get("users").is_some());
        assert!(doc.get("people").is_none());
    }

    #[test]
    fn test_normalize_wishlist_alias() {
        let doc = normalize(&json!({
            "groupName": "g",
            "users": { "Ann": { "wishlist": [{ "description": "Socks" }] } }
        }));
        assert!(doc["users"]["Ann"].get("items").is_some());
        assert!(doc["users"]["Ann"].get("wishlist").is_none());
    }

    #[test]
    fn test_normalize_description_aliases() {
        let doc = normalize(&json!({
            "groupName": "g",
            "users": { "Ann": { "items": [{ "item": "Socks" }, { "name": "Mug" }] } }
        }));
        assert_eq!(doc["users"]["Ann"]["items"][0]["description"], "Socks");
        assert_eq!(doc["users"]["Ann"]["items"][1]["description"], "Mug");
    }

    #[test]
    fn test_normalize_details_and_holiday_aliases() {
        let doc = normalize(&json!({
            "groupName": "g",
            "holiday": "christmas",
            "users": { "Ann": { "items": [{ "description": "Socks", "details": "size 42" }] } }
        }));
        assert_eq!(doc["eventType"], "christmas");
        assert_eq!(doc["users"]["Ann"]["items"][0]["notes"], "size 42");
    }

    #[test]
    fn test_normalize_prefers_canonical_over_alias() {
        let doc = normalize(&json!({
            "groupName": "g",
            "users": { "Ann": { "items": [{ "description": "Socks", "name": "Mug" }] } }
        }));
        assert_eq!(doc["users"]["Ann"]["items"][0]["description"], "Socks");
    }

    #[test]
    fn test_group_id_rules() {
        assert!(validate_group_id("smith-family-2026").is_empty());
        assert!(!validate_group_id("").is_empty());
        assert!(!validate_group_id(&"x".repeat(101)).is_empty());
        assert!(!validate_group_id("has spaces").is_empty());
        assert!(!validate_group_id("nope/../etc").is_empty());
    }
}
