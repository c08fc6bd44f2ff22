use sea_orm::DatabaseConnection;

use crate::entities::page::{self, PageType};
use crate::models::page_model::{RenderedPage, RootResponse};
use crate::services::index_service::{IndexService, RouteOutcome};
use crate::services::page_service::PageService;
use crate::services::post_service::PostService;
use crate::utils::api_response::{not_found, ServiceResult};

#[derive(Debug)]
pub enum SiteResponse {
    /// 301 to the same path with a trailing slash.
    AppendSlash(String),
    /// 302 issued by a page route.
    Redirect(String),
    Page(RenderedPage),
}

pub struct SiteService;

impl SiteService {
    /// Resolves a public URL path against the page tree.
    pub async fn serve(db: &DatabaseConnection, path: &str) -> ServiceResult<SiteResponse> {
        let path = if path.starts_with('/') { path.to_string() } else { format!("/{}", path) };
        if !path.ends_with('/') {
            return Ok(SiteResponse::AppendSlash(format!("{}/", path)));
        }

        // A page's own routes win over its children's slugs; a draft hides its subtree.
        for (page, remainder) in PageService::pages_along_path(db, &path).await? {
            if !page.live {
                break;
            }
            if remainder.is_empty() {
                tracing::debug!(url = %path, page = %page.url_path, "serving page");
                return Ok(SiteResponse::Page(Self::render(db, page).await?));
            }
            if page.page_type == PageType::PostIndex {
                let index_url = page.url_path.clone();
                if let Some(outcome) = IndexService::serve_route(db, page, &remainder).await? {
                    tracing::debug!(url = %path, index = %index_url, remainder = %remainder, "index route matched");
                    return Ok(match outcome {
                        RouteOutcome::Redirect(to) => SiteResponse::Redirect(to),
                        RouteOutcome::Render(listing) => SiteResponse::Page(RenderedPage::Listing(listing)),
                    });
                }
            }
        }

        Err(not_found("PAGE_NOT_FOUND", "Page not found"))
    }

    async fn render(db: &DatabaseConnection, page: page::Model) -> ServiceResult<RenderedPage> {
        let rendered = match page.page_type {
            PageType::Root => {
                let children = PageService::live_children(db, &page).await?;
                RenderedPage::Root(RootResponse {
                    page: page.into(),
                    children: children.into_iter().map(Into::into).collect(),
                })
            }
            PageType::PostIndex => RenderedPage::Listing(IndexService::listing(db, page, None).await?),
            PageType::Post => {
                let (page, post) = PostService::find_post(db, page.public_id).await?;
                RenderedPage::Post(PostService::render(db, page, post).await?)
            }
        };
        Ok(rendered)
    }
}
