//! Item listing handler.

use axum::{
    Extension,
    extract::{Query, rejection::QueryRejection},
    response::Json,
};

use crate::{
    errors::AppError, handlers::pagination::ListItemsQuery, items_service::ItemQueryService,
    models::ItemPage,
};

/// List items in ascending id order.
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    params(ListItemsQuery),
    responses(
        (status = 200, description = "One page of items", body = ItemPage),
        (status = 400, description = "Invalid pagination parameters")
    )
)]
pub async fn list_items(
    Extension(items): Extension<ItemQueryService>,
    query: Result<Query<ListItemsQuery>, QueryRejection>,
) -> Result<Json<ItemPage>, AppError> {
    let Query(params) = query.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let params = params.validated()?;

    let page = items.list(params.limit, params.offset).await?;
    Ok(Json(page))
}
