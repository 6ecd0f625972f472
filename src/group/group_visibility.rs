use super::group_models::GroupDocument;

/// Who is asking for a group document.
///
/// Observers (the admin surface) see stored documents as-is and are never
/// written into one; members get the surprise-preserving view below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer<'a> {
    Member(&'a str),
    Observer,
}

/// Derives the view of a document appropriate for the viewer: on every item
/// in the requesting member's own wishlist, `claimedBy`, `purchased` and
/// `splitWith` are blanked so the owner cannot see who is gifting what.
/// Every other member's wishlist is returned untouched. Pure; the stored
/// document is never modified.
pub fn view_for(doc: &GroupDocument, viewer: Viewer<'_>) -> GroupDocument {
    let name = match viewer {
        Viewer::Observer => return doc.clone(),
        Viewer::Member(name) => name,
    };

    let mut view = doc.clone();
    if let Some(wishlist) = view.users.get_mut(name) {
        for item in &mut wishlist.items {
            item.claimed_by.clear();
            item.purchased = false;
            item.split_with.clear();
        }
    }
    view
}
