//! Builds the HTML display document for a successful fetch.
//!
//! One block per entry: bold title, the summary markup as the feed supplied
//! it, and a link whose visible text is the URL itself, closed off by a
//! horizontal rule.  Feed order is kept; only the first [`MAX_ENTRIES`] are
//! used.

use html_escape::{encode_single_quoted_attribute, encode_text};

use crate::source::FeedItem;

/// How many entries a fetch displays.
pub const MAX_ENTRIES: usize = 10;

/// Render a single entry.
pub fn render_block(item: &FeedItem) -> String {
    format!(
        "<b>{title}</b><br>{summary}<br><a href='{href}'>{text}</a><br><hr><br>",
        title = encode_text(&item.title),
        summary = item.summary,
        href = encode_single_quoted_attribute(&item.link),
        text = encode_text(&item.link),
    )
}

/// Render the first [`MAX_ENTRIES`] items, in order, as one document.
pub fn render_document(items: &[FeedItem]) -> String {
    items.iter().take(MAX_ENTRIES).map(render_block).collect()
}

/// The entries a document built from `items` actually shows.
pub fn displayed(items: &[FeedItem]) -> &[FeedItem] {
    &items[..items.len().min(MAX_ENTRIES)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<FeedItem> {
        (0..n)
            .map(|i| {
                FeedItem::from_parts(
                    Some(format!("Title {i}").as_str()),
                    Some(format!("<p>Summary {i}</p>").as_str()),
                    Some(format!("https://example.com/{i}").as_str()),
                )
            })
            .collect()
    }

    #[test]
    fn single_entry_block_layout() {
        let item = FeedItem::from_parts(Some("A"), Some("S"), Some("L"));
        assert_eq!(
            render_block(&item),
            "<b>A</b><br>S<br><a href='L'>L</a><br><hr><br>"
        );
    }

    #[test]
    fn defaults_render_as_empty_fields() {
        let item = FeedItem::from_parts(None, None, None);
        assert_eq!(
            render_block(&item),
            "<b>No Title</b><br><br><a href=''></a><br><hr><br>"
        );
    }

    #[test]
    fn summary_markup_is_kept_raw() {
        let item = FeedItem::from_parts(Some("T"), Some("<i>hi</i> &amp; bye"), Some(""));
        assert!(render_block(&item).contains("<br><i>hi</i> &amp; bye<br>"));
    }

    #[test]
    fn title_and_link_are_escaped() {
        let item = FeedItem::from_parts(Some("Tom & Jerry <3"), None, Some("https://x.y/?a=1&b='2'"));
        let html = render_block(&item);
        assert!(html.contains("<b>Tom &amp; Jerry &lt;3</b>"));
        assert!(!html.contains("'2''"));
    }

    #[test]
    fn document_caps_at_ten_blocks_in_order() {
        let doc = render_document(&items(15));
        assert_eq!(doc.matches("<hr>").count(), 10);
        let positions: Vec<_> = (0..10)
            .map(|i| doc.find(&format!("<b>Title {i}</b>")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(!doc.contains("Title 10"));
    }

    #[test]
    fn document_with_fewer_entries_has_one_block_each() {
        for n in [1, 3, 10] {
            let doc = render_document(&items(n));
            assert_eq!(doc.matches("<hr>").count(), n);
        }
    }

    #[test]
    fn displayed_matches_document() {
        assert_eq!(displayed(&items(12)).len(), 10);
        assert_eq!(displayed(&items(4)).len(), 4);
        assert!(displayed(&[]).is_empty());
    }
}
