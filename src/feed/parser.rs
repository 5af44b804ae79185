//! RSS/Atom parsing: feed-rs for structure, quick-xml for raw date text.
use anyhow::Result;
use feed_rs::parser;
use quick_xml::events::Event;
use quick_xml::Reader;

/// Sentinel shown when an entry carries no publication date.
pub const UNKNOWN_PUBLISHED: &str = "unknown";

const UNTITLED: &str = "Untitled";

/// Elements whose text is an entry's publication date (RSS 2.0, Atom, Dublin Core).
const DATE_ELEMENTS: [&[u8]; 4] = [b"pubDate", b"published", b"date", b"issued"];

/// One item of a syndication feed, reduced to what the bot displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    /// Publication date exactly as the feed wrote it, if present.
    pub published: Option<String>,
}

impl FeedEntry {
    pub fn published_or_unknown(&self) -> &str {
        self.published.as_deref().unwrap_or(UNKNOWN_PUBLISHED)
    }
}

/// Parses RSS or Atom bytes into entries, preserving feed order.
///
/// The publication date is shown as the feed wrote it, so dates feed-rs
/// cannot parse (or would normalize to UTC) still reach the user. Only the
/// entry's own publication element counts; entries that carry nothing but
/// an `updated` date report no publication time.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<FeedEntry>> {
    let feed = parser::parse(bytes)?;

    let mut raw_dates = raw_published_dates(bytes);
    if raw_dates.len() != feed.entries.len() {
        tracing::debug!(
            scanned = raw_dates.len(),
            parsed = feed.entries.len(),
            "Entry count mismatch, using normalized dates"
        );
        raw_dates.clear();
    }
    let mut raw_dates = raw_dates.into_iter();

    let entries = feed
        .entries
        .into_iter()
        .map(|entry| {
            let title = entry
                .title
                .map(|t| t.content.trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| UNTITLED.to_string());
            let link = entry
                .links
                .first()
                .map(|l| l.href.trim().to_string())
                .unwrap_or_default();
            let published = raw_dates.next().flatten().or_else(|| {
                entry
                    .published
                    .map(|dt| dt.format("%a, %d %b %Y %H:%M:%S %z").to_string())
            });

            FeedEntry {
                title,
                link,
                published,
            }
        })
        .collect();

    Ok(entries)
}

/// Raw publication date of every `<item>` / `<entry>`, in document order.
///
/// Only the first date element of an entry is kept; blank text counts as
/// absent. Scanning stops quietly at the first XML error.
fn raw_published_dates(bytes: &[u8]) -> Vec<Option<String>> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();
    let mut dates = Vec::new();

    let mut in_entry = false;
    let mut current: Option<String> = None;
    let mut capture: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = e.local_name();
                let name = name.as_ref();
                if name == b"item" || name == b"entry" {
                    in_entry = true;
                    current = None;
                } else if in_entry && current.is_none() && DATE_ELEMENTS.contains(&name) {
                    capture = Some(String::new());
                }
            }
            Ok(Event::Text(t)) => {
                if let Some(text) = capture.as_mut() {
                    match t.unescape() {
                        Ok(unescaped) => text.push_str(&unescaped),
                        Err(_) => text.push_str(&String::from_utf8_lossy(&t)),
                    }
                }
            }
            Ok(Event::CData(c)) => {
                if let Some(text) = capture.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Ok(Event::End(e)) => {
                let name = e.local_name();
                let name = name.as_ref();
                if capture.is_some() && DATE_ELEMENTS.contains(&name) {
                    let text = capture.take().unwrap_or_default();
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        current = Some(trimmed.to_string());
                    }
                } else if in_entry && (name == b"item" || name == b"entry") {
                    dates.push(current.take());
                    in_entry = false;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                tracing::debug!(error = %e, "Stopped scanning feed for dates");
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    dates
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RSS: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
    <title>Sports</title>
    <item>
        <title>First</title>
        <link>https://example.com/1</link>
        <pubDate>Mon, 13 Sep 2021 16:45:00 GMT</pubDate>
    </item>
    <item>
        <title>  Second  </title>
        <link>https://example.com/2</link>
    </item>
    <item>
        <link>https://example.com/3</link>
    </item>
</channel></rss>"#;

    #[test]
    fn test_rss_entries_in_feed_order() {
        let entries = parse_feed(RSS.as_bytes()).unwrap();
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Untitled"]);
        assert_eq!(entries[1].link, "https://example.com/2");
    }

    fn rss_with_date(date_element: &str) -> String {
        format!(
            r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
    <title>Local</title>
    <item>
        <title>Dated</title>
        <link>https://example.com/d</link>
        {date_element}
    </item>
</channel></rss>"#
        )
    }

    #[test]
    fn test_published_kept_verbatim_and_sentinel() {
        let entries = parse_feed(RSS.as_bytes()).unwrap();
        assert_eq!(
            entries[0].published.as_deref(),
            Some("Mon, 13 Sep 2021 16:45:00 GMT")
        );
        assert_eq!(entries[1].published, None);
        assert_eq!(entries[1].published_or_unknown(), UNKNOWN_PUBLISHED);
    }

    #[test]
    fn test_atom_feed() {
        let atom = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
    <title>Tech</title>
    <id>urn:uuid:feed</id>
    <updated>2024-01-15T10:00:00Z</updated>
    <entry>
        <title>Atom entry</title>
        <id>urn:uuid:1</id>
        <link href="https://example.com/atom/1"/>
        <published>2024-01-15T10:00:00Z</published>
        <updated>2024-01-15T10:00:00Z</updated>
    </entry>
    <entry>
        <title>Updated only</title>
        <id>urn:uuid:2</id>
        <link href="https://example.com/atom/2"/>
        <updated>2024-01-16T10:00:00Z</updated>
    </entry>
</feed>"#;

        let entries = parse_feed(atom.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Atom entry");
        assert_eq!(entries[0].link, "https://example.com/atom/1");
        assert_eq!(
            entries[0].published.as_deref(),
            Some("2024-01-15T10:00:00Z")
        );
        assert_eq!(entries[1].published_or_unknown(), "unknown");
    }

    #[test]
    fn test_non_rfc_dates_are_not_unknown() {
        for date in [
            "13.09.2021 16:45",
            "2021-09-13 16:45:00",
            "Monday, September 13, 2021",
        ] {
            let feed = rss_with_date(&format!("<pubDate>{date}</pubDate>"));
            let entries = parse_feed(feed.as_bytes()).unwrap();
            assert_eq!(entries[0].published_or_unknown(), date);
        }
    }

    #[test]
    fn test_offset_is_not_rewritten_to_utc() {
        let feed = rss_with_date("<pubDate>Mon, 13 Sep 2021 19:45:00 +0300</pubDate>");
        let entries = parse_feed(feed.as_bytes()).unwrap();
        assert_eq!(
            entries[0].published.as_deref(),
            Some("Mon, 13 Sep 2021 19:45:00 +0300")
        );
    }

    #[test]
    fn test_cdata_and_blank_dates() {
        let feed = rss_with_date("<pubDate><![CDATA[ 13.09.2021 16:45 ]]></pubDate>");
        let entries = parse_feed(feed.as_bytes()).unwrap();
        assert_eq!(entries[0].published.as_deref(), Some("13.09.2021 16:45"));

        let feed = rss_with_date("<pubDate>   </pubDate>");
        let entries = parse_feed(feed.as_bytes()).unwrap();
        assert_eq!(entries[0].published_or_unknown(), UNKNOWN_PUBLISHED);
    }

    #[test]
    fn test_dublin_core_date() {
        let feed = r#"<?xml version="1.0"?>
<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/"><channel>
    <title>DC</title>
    <item>
        <title>One</title>
        <link>https://example.com/1</link>
        <dc:date>2021-09-13T16:45:00+03:00</dc:date>
    </item>
</channel></rss>"#;
        let entries = parse_feed(feed.as_bytes()).unwrap();
        assert_eq!(
            entries[0].published.as_deref(),
            Some("2021-09-13T16:45:00+03:00")
        );
    }

    #[test]
    fn test_raw_dates_follow_entry_order() {
        let dates = raw_published_dates(RSS.as_bytes());
        assert_eq!(
            dates,
            vec![Some("Mon, 13 Sep 2021 16:45:00 GMT".to_string()), None, None]
        );
    }

    #[test]
    fn test_malformed_is_error() {
        assert!(parse_feed(b"<not valid xml").is_err());
        assert!(parse_feed(b"").is_err());
    }

    #[test]
    fn test_empty_channel_yields_no_entries() {
        let empty = r#"<?xml version="1.0"?><rss version="2.0"><channel></channel></rss>"#;
        assert!(parse_feed(empty.as_bytes()).unwrap().is_empty());
    }
}
