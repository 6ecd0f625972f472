use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use super::group_models::{
    EventTheme, GroupDocument, Item, Wishlist, MAX_DESCRIPTION_LEN, MAX_EVENT_TYPE_LEN,
    MAX_GROUP_NAME_LEN, MAX_MEMBER_NAME_LEN, MAX_NOTES_LEN, MAX_PRICE_LEN,
};

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());

/// Strips markup from every free-text field of an already-validated
/// document and truncates each field to its bound. The output contains no
/// angle brackets at all, so running the sanitizer twice yields the same
/// document. Unknown input fields never reach this layer; the typed model
/// is the allow-list.
pub fn sanitize(doc: GroupDocument) -> GroupDocument {
    let users = doc
        .users
        .into_iter()
        .fold(BTreeMap::new(), |mut users, (member, wishlist)| {
            let member = clean_text(&member, MAX_MEMBER_NAME_LEN);
            if !member.is_empty() {
                // first occurrence wins when cleaning collapses two names
                users.entry(member).or_insert_with(|| sanitize_wishlist(wishlist));
            }
            users
        });

    GroupDocument {
        group_name: clean_text(&doc.group_name, MAX_GROUP_NAME_LEN),
        event_type: doc
            .event_type
            .map(|label| sanitize_event_type(&label))
            .filter(|label| !label.is_empty()),
        event_date: doc.event_date,
        created_by: doc
            .created_by
            .map(|name| clean_text(&name, MAX_MEMBER_NAME_LEN))
            .filter(|name| !name.is_empty()),
        users,
    }
}

fn sanitize_wishlist(wishlist: Wishlist) -> Wishlist {
    Wishlist {
        items: wishlist.items.into_iter().map(sanitize_item).collect(),
    }
}

fn sanitize_item(item: Item) -> Item {
    Item {
        description: clean_text(&item.description, MAX_DESCRIPTION_LEN),
        priority: item.priority,
        price: item
            .price
            .map(|price| clean_text(&price, MAX_PRICE_LEN))
            .filter(|price| !price.is_empty()),
        notes: item
            .notes
            .map(|notes| clean_text(&notes, MAX_NOTES_LEN))
            .filter(|notes| !notes.is_empty()),
        claimed_by: clean_name_list(item.claimed_by),
        purchased: item.purchased,
        split_with: clean_name_list(item.split_with),
    }
}

// Known theme labels are canonicalized to their lowercase form; anything
// else is kept as cleaned free text.
fn sanitize_event_type(label: &str) -> String {
    let cleaned = clean_text(label, MAX_EVENT_TYPE_LEN);
    match EventTheme::parse(&cleaned) {
        Some(theme) => theme.to_string(),
        None => cleaned,
    }
}

fn clean_name_list(names: Vec<String>) -> Vec<String> {
    let mut seen = Vec::new();
    for name in names {
        let name = clean_text(&name, MAX_MEMBER_NAME_LEN);
        if !name.is_empty() && !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}

fn clean_text(text: &str, max_chars: usize) -> String {
    let stripped = HTML_TAG.replace_all(text, "");
    let without_brackets: String = stripped
        .chars()
        .filter(|c| *c != '<' && *c != '>')
        .collect();
    let truncated: String = without_brackets.trim().chars().take(max_chars).collect();
    truncated.trim_end().to_string()
}
