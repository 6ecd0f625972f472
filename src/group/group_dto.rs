use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

/// Identifies the requesting member on reads. Omitting `member` yields the
/// unfiltered observer view.
#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct ViewerQuery {
    #[validate(length(max = 100))]
    pub member: Option<String>,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct DeleteGroupQuery {
    #[validate(length(min = 1, max = 100))]
    pub member: String,
}
