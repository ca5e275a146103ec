use crate::api::ContactReader;
use crate::dto::api::{TableParams, TableResponse};
use crate::services::{ServiceError, ServiceResult};
use crate::sync::{ListSync, SyncOutcome};

/// Applies a pager/sort event from the table widget and returns the
/// resulting view.
pub async fn table_event<A>(
    sync: &ListSync<A>,
    params: TableParams,
) -> ServiceResult<TableResponse>
where
    A: ContactReader,
{
    sync.pager_sort(params.into()).await.map_err(|err| {
        log::error!("Failed to load contacts page: {err}");
        ServiceError::from(err)
    })?;
    Ok(TableResponse::from_view(sync.view(), sync.is_loading()))
}

/// Applies a search keystroke. Returns `None` when the event did not
/// update the view (debounced away, duplicate text, or a stale response),
/// in which case the widget keeps what it is showing.
pub async fn search_event<A>(sync: &ListSync<A>, q: &str) -> ServiceResult<Option<TableResponse>>
where
    A: ContactReader,
{
    let outcome = sync.search_input(q).await.map_err(|err| {
        log::error!("Search request failed: {err}");
        ServiceError::from(err)
    })?;

    match outcome {
        SyncOutcome::Applied => Ok(Some(TableResponse::from_view(
            sync.view(),
            sync.is_loading(),
        ))),
        SyncOutcome::Discarded | SyncOutcome::Superseded | SyncOutcome::Duplicate => Ok(None),
    }
}

/// Refreshes the table after a deletion at the current query parameters.
pub async fn refresh_after_delete<A>(sync: &ListSync<A>) -> ServiceResult<TableResponse>
where
    A: ContactReader,
{
    sync.refresh_after_delete().await.map_err(|err| {
        log::error!("Failed to refresh contacts after delete: {err}");
        ServiceError::from(err)
    })?;
    Ok(TableResponse::from_view(sync.view(), sync.is_loading()))
}
