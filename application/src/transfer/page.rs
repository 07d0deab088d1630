use kernel::prelude::entity::{Page, SelectLimit, SelectPage};

pub struct SelectDto {
    pub limit: SelectLimit,
    pub page: SelectPage,
}

#[derive(Debug, Clone)]
pub struct PageDto<T> {
    pub items: Vec<T>,
    pub limit: i64,
    pub page: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl<E, T> From<Page<E>> for PageDto<T>
where
    T: From<E>,
{
    fn from(value: Page<E>) -> Self {
        let limit = *value.limit().as_ref();
        let page = *value.page().as_ref();
        let total = value.total();
        let total_pages = value.total_pages();
        Self {
            items: value.into_items().into_iter().map(T::from).collect(),
            limit,
            page,
            total,
            total_pages,
        }
    }
}
