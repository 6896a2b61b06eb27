//! Display formatting for a resolved place.
//!
//! The pipe replies in Markdown (the host renders the raw `<iframe>`); the
//! tool replies with a self-contained HTML fragment.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::maps::MapLinks;
use crate::models::place::PlaceResult;

const NAVIGATION_LABEL: &str = "➤ Open in Google Maps";

/// Markdown reply: heading, address, embedded map, the workflow's own
/// answer, and a bold navigation link.
pub fn place_markdown(place: &PlaceResult, links: &MapLinks, response_text: &str) -> String {
    format!(
        "### {name}\n\n\
         📍 **Address:** {address}\n\n\
         <iframe width=\"100%\" height=\"350\" style=\"border:0; border-radius:12px;\" src=\"{embed}\" allowfullscreen title=\"Map\"></iframe>\n\n\
         {response}\n\n\
         **[{label}]({nav})**",
        name = place.name,
        address = place.formatted_address,
        embed = links.embed_url,
        response = response_text,
        label = NAVIGATION_LABEL,
        nav = links.navigation_url,
    )
}

/// HTML fragment: heading, pinned address, embedded map and a styled link.
/// Text and attribute values are escaped.
pub fn place_html(place: &PlaceResult, links: &MapLinks) -> String {
    format!(
        r#"<div style="font-family: inherit; color: inherit; line-height: 1.5;">
    <h3 style="margin: 0 0 5px 0; color: inherit;">{name}</h3>
    <div style="margin-bottom: 10px;">📍 {address}</div>
    <iframe
        width="100%"
        height="350"
        src="{embed}"
        style="border: 1px solid rgba(0,0,0,0.1); border-radius: 12px; background-color: transparent;"
        allowfullscreen
        loading="lazy">
    </iframe>
    <div style="margin-top: 10px;">
        <a href="{nav}" target="_blank" style="color: #1a73e8; text-decoration: none; font-weight: bold;">
            {label}
        </a>
    </div>
</div>"#,
        name = encode_text(&place.name),
        address = encode_text(&place.formatted_address),
        embed = encode_double_quoted_attribute(&links.embed_url),
        nav = encode_double_quoted_attribute(&links.navigation_url),
        label = NAVIGATION_LABEL,
    )
}
