use crate::errors::Result;

use lazy_static::lazy_static;
use log::warn;
use regex::Regex;
use reqwest::header::USER_AGENT;
use std::time::Duration;
use url::Url;

// Bound on the GET so a slow page can't stall the reaction path for long
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Open-Graph metadata pulled out of a linked page.
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct LinkPreview {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Outcome of a preview fetch. Fetches are best effort so the failure case
/// is a normal value rather than an error, callers can't forget that the
/// repost still goes out without one.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum Preview {
    Available(LinkPreview),
    Unavailable,
}

pub(super) async fn fetch(url: &str) -> Preview {
    match fetch_inner(url).await {
        Ok(preview) => Preview::Available(preview),
        Err(why) => {
            warn!("OpenGraph fetch failed for {url}: {why:?}");
            Preview::Unavailable
        }
    }
}

async fn fetch_inner(url: &str) -> Result<LinkPreview> {
    // parse first so a malformed match never hits the network
    let url = Url::parse(url)?;

    let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
    let body = client
        .get(url.as_str())
        .header(USER_AGENT, "Mozilla/5.0")
        .send()
        .await?
        .text()
        .await?;

    Ok(extract_metadata(&body))
}

fn extract_metadata(html: &str) -> LinkPreview {
    LinkPreview {
        title: og_property(html, "title").or_else(|| page_title(html)),
        description: og_property(html, "description"),
        image: og_property(html, "image"),
    }
}

/// Pull the content of an `og:` meta tag out of raw markup. Sites emit the
/// property and content attributes in either order so both are checked.
fn og_property(html: &str, property: &str) -> Option<String> {
    lazy_static! {
        static ref PROPERTY_FIRST: Regex = Regex::new(
            r#"(?i)<meta\s[^>]*property\s*=\s*["']og:(\w+)["'][^>]*content\s*=\s*["']([^"']*)["']"#
        )
        .unwrap();
        static ref CONTENT_FIRST: Regex = Regex::new(
            r#"(?i)<meta\s[^>]*content\s*=\s*["']([^"']*)["'][^>]*property\s*=\s*["']og:(\w+)["']"#
        )
        .unwrap();
    }

    PROPERTY_FIRST
        .captures_iter(html)
        .find(|caps| &caps[1] == property)
        .map(|caps| caps[2].to_string())
        .or_else(|| {
            CONTENT_FIRST
                .captures_iter(html)
                .find(|caps| &caps[2] == property)
                .map(|caps| caps[1].to_string())
        })
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn page_title(html: &str) -> Option<String> {
    lazy_static! {
        static ref TITLE: Regex = Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap();
    }

    TITLE
        .captures(html)
        .map(|caps| caps[1].trim().to_string())
        .filter(|title| !title.is_empty())
}
