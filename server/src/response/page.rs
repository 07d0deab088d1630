use application::transfer::PageDto;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    items: Vec<T>,
    limit: i64,
    page: i64,
    total: i64,
    total_pages: i64,
}

impl<T> PageResponse<T> {
    pub fn convert<D>(page: PageDto<D>, f: impl FnMut(D) -> T) -> Self {
        Self {
            items: page.items.into_iter().map(f).collect(),
            limit: page.limit,
            page: page.page,
            total: page.total,
            total_pages: page.total_pages,
        }
    }
}
