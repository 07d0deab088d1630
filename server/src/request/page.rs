use application::transfer::SelectDto;
use kernel::prelude::entity::{SelectLimit, SelectPage};
use serde::Deserialize;

/// `?limit=&page=` query of every listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct PageRequest {
    #[serde(default)]
    limit: Option<i64>,
    #[serde(default)]
    page: Option<i64>,
}

impl From<PageRequest> for SelectDto {
    fn from(value: PageRequest) -> Self {
        SelectDto {
            limit: value.limit.map(SelectLimit::new).unwrap_or_default(),
            page: value.page.map(SelectPage::new).unwrap_or_default(),
        }
    }
}
