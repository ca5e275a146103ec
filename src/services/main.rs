use crate::api::{ContactListQuery, ContactReader, DEFAULT_PAGE_SIZE, SortField, SortOrder};
use crate::dto::main::{IndexPageData, IndexQuery};
use crate::pagination::Paginated;
use crate::services::{ServiceError, ServiceResult};
use crate::sync::ListSync;

/// Loads the contacts list for the index page. The page request is the
/// synthetic mount event of the session's list controller, so a later
/// table-widget event continues from the same view state.
pub async fn load_index_page<A>(
    sync: &ListSync<A>,
    params: IndexQuery,
) -> ServiceResult<IndexPageData>
where
    A: ContactReader,
{
    let mut query = ContactListQuery::new()
        .paginate(params.page.unwrap_or(1), DEFAULT_PAGE_SIZE)
        .sort(
            params
                .sort_by
                .as_deref()
                .map(SortField::parse)
                .unwrap_or_default(),
            params
                .order
                .as_deref()
                .map(SortOrder::parse)
                .unwrap_or_default(),
        );

    let search_query = params
        .q
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    if let Some(term) = &search_query {
        query = query.search(term.clone());
    }

    sync.mount(query).await.map_err(|err| {
        log::error!("Failed to load contacts: {err}");
        ServiceError::from(err)
    })?;

    let view = sync.view();
    Ok(IndexPageData {
        contacts: Paginated::new(view.contacts, view.page, view.total_pages),
        total: view.total,
        search_query,
    })
}
