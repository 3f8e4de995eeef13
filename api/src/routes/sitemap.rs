//! `GET /sitemap.xml` for search engines, rooted at `FRONTEND_URL`.

use crate::response::error_response;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use db::models::{news, product};
use services::AppError;
use util::{config, state::AppState};

/// Storefront pages that exist regardless of catalogue content.
const STATIC_PAGES: &[(&str, &str, &str)] = &[
    ("/", "daily", "1.0"),
    ("/products", "daily", "0.9"),
    ("/about", "monthly", "0.6"),
    ("/contact", "monthly", "0.6"),
    ("/careers", "weekly", "0.5"),
    ("/news", "weekly", "0.5"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub path: String,
    pub lastmod: Option<DateTime<Utc>>,
    pub changefreq: &'static str,
    pub priority: &'static str,
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

pub fn render_sitemap(base_url: &str, entries: &[SitemapEntry]) -> String {
    let base = base_url.trim_end_matches('/');
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&format!("{base}{}", entry.path))));
        if let Some(ts) = entry.lastmod {
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", ts.format("%Y-%m-%d")));
        }
        xml.push_str(&format!("    <changefreq>{}</changefreq>\n", entry.changefreq));
        xml.push_str(&format!("    <priority>{}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

fn entries(products: Vec<product::Model>, news: Vec<news::Model>) -> Vec<SitemapEntry> {
    let statics = STATIC_PAGES.iter().map(|(path, changefreq, priority)| SitemapEntry {
        path: path.to_string(),
        lastmod: None,
        changefreq,
        priority,
    });
    let products = products.into_iter().map(|p| SitemapEntry {
        path: format!("/product/{}", p.slug),
        lastmod: Some(p.updated_at),
        changefreq: "weekly",
        priority: "0.8",
    });
    let news = news.into_iter().map(|n| SitemapEntry {
        path: format!("/news/{}", n.id),
        lastmod: Some(n.updated_at),
        changefreq: "monthly",
        priority: "0.4",
    });
    statics.chain(products).chain(news).collect()
}

pub async fn sitemap(State(state): State<AppState>) -> Response {
    let db = state.db();
    let (products, news) = match tokio::try_join!(product::Model::list(db), news::Model::list(db)) {
        Ok(pair) => pair,
        Err(e) => return error_response(AppError::from(e)),
    };

    let base = match config::frontend_url() {
        url if url.is_empty() => config::public_url(),
        url => url,
    };

    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        render_sitemap(&base, &entries(products, news)),
    )
        .into_response()
}
