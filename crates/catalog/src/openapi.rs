use utoipa::OpenApi;

use crate::{
    handlers::{self, ListItemsQuery},
    models::{Item, ItemPage},
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Catalog API", description = "Paginated access to the item catalog"),
    paths(handlers::items::list_items, handlers::health::health_check),
    components(schemas(Item, ItemPage, ListItemsQuery)),
    tags(
        (name = "items", description = "Item listing"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;
