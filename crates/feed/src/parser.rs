use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::models::FeedEntry;
use crate::FeedError;

/// Parse an RSS 2.0 (or RSS 1.0) or Atom feed from raw XML bytes.
///
/// Only `<title>` and `<link>` elements directly under an `<item>` or
/// `<entry>` are read, so nested metadata such as an Atom `<source>` never
/// leaks into an entry. RSS links come from the `<link>` text, Atom links
/// from the first `<link href>` whose `rel` is absent or `alternate`.
/// Entries missing a title are dropped; a missing link becomes an empty
/// string.
pub fn parse_feed(xml: &[u8]) -> Result<Vec<FeedEntry>, FeedError> {
    let mut reader = Reader::from_reader(xml);

    let mut entries = Vec::new();
    let mut buf = Vec::new();

    let mut root: Option<String> = None;
    let mut depth = 0usize;
    let mut current_entry: Option<EntryBuilder> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                depth += 1;
                if root.is_none() {
                    root = Some(name.clone());
                }

                if let Some(ref mut entry) = current_entry {
                    if entry.is_child_depth(depth) {
                        entry.open(&name, &e);
                    }
                } else if is_entry_element(&name) {
                    current_entry = Some(EntryBuilder::new(depth));
                }
            }
            Ok(Event::Empty(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if root.is_none() {
                    root = Some(name.clone());
                }
                if let Some(ref mut entry) = current_entry {
                    if entry.is_child_depth(depth + 1) && name == "link" {
                        entry.take_atom_link(&e);
                    }
                }
            }
            Ok(Event::End(_)) => {
                let closes_entry = current_entry
                    .as_ref()
                    .is_some_and(|entry| entry.depth == depth);
                if closes_entry {
                    if let Some(entry) = current_entry.take().and_then(EntryBuilder::build) {
                        entries.push(entry);
                    }
                } else if let Some(ref mut entry) = current_entry {
                    if entry.is_child_depth(depth) {
                        entry.close();
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Text(e)) => {
                if let Some(ref mut entry) = current_entry {
                    let text = e
                        .unescape()
                        .map_err(|e| FeedError::Parse(format!("XML parse error: {}", e)))?;
                    entry.push_text(depth, &text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(ref mut entry) = current_entry {
                    let text = String::from_utf8_lossy(&e.into_inner()).to_string();
                    entry.push_text(depth, &text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(FeedError::Parse(format!("XML parse error: {}", e))),
            _ => {}
        }
        buf.clear();
    }

    match root.as_deref() {
        Some("rss") | Some("feed") | Some("rdf:RDF") => {}
        Some(other) => {
            return Err(FeedError::Parse(format!(
                "unsupported root element <{}>",
                other
            )))
        }
        None => return Err(FeedError::Parse("document has no root element".into())),
    }

    if depth != 0 {
        return Err(FeedError::Parse("unexpected end of document".into()));
    }

    Ok(entries)
}

fn is_entry_element(name: &str) -> bool {
    name == "item" || name == "entry"
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
}

struct EntryBuilder {
    /// Depth of the `<item>`/`<entry>` element itself
    depth: usize,
    title: Option<String>,
    link: Option<String>,
    /// Direct child currently collecting text
    open: Option<Field>,
}

impl EntryBuilder {
    fn new(depth: usize) -> Self {
        Self {
            depth,
            title: None,
            link: None,
            open: None,
        }
    }

    fn is_child_depth(&self, depth: usize) -> bool {
        depth == self.depth + 1
    }

    /// A direct child element started. The first `title` and `link` win.
    fn open(&mut self, name: &str, element: &BytesStart<'_>) {
        match name {
            "title" if self.title.is_none() => {
                self.title = Some(String::new());
                self.open = Some(Field::Title);
            }
            "link" if self.link.is_none() => {
                // An element carrying `href` is an Atom link; its text is ignored.
                if !self.take_atom_link(element) {
                    self.link = Some(String::new());
                    self.open = Some(Field::Link);
                }
            }
            _ => {}
        }
    }

    fn close(&mut self) {
        self.open = None;
    }

    /// Text is only taken when it sits directly inside the open field.
    fn push_text(&mut self, depth: usize, text: &str) {
        if !self.is_child_depth(depth) {
            return;
        }
        let slot = match self.open {
            Some(Field::Title) => &mut self.title,
            Some(Field::Link) => &mut self.link,
            None => return,
        };
        slot.get_or_insert_with(String::new).push_str(text);
    }

    /// Atom links carry their target in the `href` attribute.
    ///
    /// Returns whether the element had an `href` at all.
    fn take_atom_link(&mut self, element: &BytesStart<'_>) -> bool {
        let mut href = None;
        let mut alternate = true;
        for attr in element.attributes().flatten() {
            let Ok(value) = attr.unescape_value() else {
                continue;
            };
            match attr.key.as_ref() {
                b"href" => href = Some(value.to_string()),
                b"rel" => alternate = value == "alternate",
                _ => {}
            }
        }

        let has_href = href.is_some();
        if alternate && self.link.is_none() {
            self.link = href;
        }
        has_href
    }

    fn build(self) -> Option<FeedEntry> {
        let title = self.title?.trim().to_string();
        if title.is_empty() {
            return None;
        }
        Some(FeedEntry {
            title,
            link: self.link.map(|link| link.trim().to_string()).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">
  <channel>
    <title>Nintendo System Update Changelog</title>
    <atom:link href="https://yls8.mtheall.com/ninupdates/feed.php" rel="self"/>
    <item>
      <title>Old3DS 11.17.0-50</title>
      <link>https://yls8.mtheall.com/ninupdates/reports.php?date=1&amp;sys=ctr</link>
    </item>
    <item>
      <title><![CDATA[New3DS 11.17.0-50]]></title>
      <link>https://yls8.mtheall.com/ninupdates/reports.php?date=2</link>
    </item>
  </channel>
</rss>"#;

    const ATOM: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Updates</title>
  <link href="https://example.com/" rel="self"/>
  <entry>
    <title>Switch 18.1.0</title>
    <link rel="edit" href="https://example.com/edit/1"/>
    <link href="https://example.com/switch/18.1.0"/>
  </entry>
  <entry>
    <title>WiiU 5.5.6</title>
    <link rel="alternate" href="https://example.com/wiiu/5.5.6"></link>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_rss() {
        let entries = parse_feed(RSS.as_bytes()).unwrap();
        assert_eq!(
            entries,
            vec![
                FeedEntry::new(
                    "Old3DS 11.17.0-50",
                    "https://yls8.mtheall.com/ninupdates/reports.php?date=1&sys=ctr"
                ),
                FeedEntry::new(
                    "New3DS 11.17.0-50",
                    "https://yls8.mtheall.com/ninupdates/reports.php?date=2"
                ),
            ]
        );
    }

    #[test]
    fn test_parse_atom() {
        let entries = parse_feed(ATOM.as_bytes()).unwrap();
        assert_eq!(
            entries,
            vec![
                FeedEntry::new("Switch 18.1.0", "https://example.com/switch/18.1.0"),
                FeedEntry::new("WiiU 5.5.6", "https://example.com/wiiu/5.5.6"),
            ]
        );
    }

    #[test]
    fn test_parse_entry_without_title_is_dropped() {
        let xml = r#"<rss><channel>
            <item><link>https://example.com/a</link></item>
            <item><title>Old3DS 1.0</title></item>
        </channel></rss>"#;
        let entries = parse_feed(xml.as_bytes()).unwrap();
        assert_eq!(entries, vec![FeedEntry::new("Old3DS 1.0", "")]);
    }

    #[test]
    fn test_parse_ignores_nested_title_and_link() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <source>
      <title>Upstream</title>
      <link href="https://upstream.example.com/"/>
    </source>
    <title>Old3DS 11.17.0-50</title>
    <link href="https://example.com/old3ds"/>
    <title>Ignored second title</title>
  </entry>
</feed>"#;
        let entries = parse_feed(xml.as_bytes()).unwrap();
        assert_eq!(
            entries,
            vec![FeedEntry::new("Old3DS 11.17.0-50", "https://example.com/old3ds")]
        );

        let xml = r#"<rss><channel><item>
            <author><name>ninupdates</name><title>Bot</title></author>
            <title>New3DS 11.17.0-50</title>
            <link>https://example.com/new3ds</link>
        </item></channel></rss>"#;
        let entries = parse_feed(xml.as_bytes()).unwrap();
        assert_eq!(
            entries,
            vec![FeedEntry::new("New3DS 11.17.0-50", "https://example.com/new3ds")]
        );
    }

    #[test]
    fn test_parse_link_with_href_and_text() {
        let xml = r#"<feed><entry>
            <title>Switch 18.1.0</title>
            <link href="https://example.com/switch">https://example.com/switch</link>
        </entry></feed>"#;
        let entries = parse_feed(xml.as_bytes()).unwrap();
        assert_eq!(
            entries,
            vec![FeedEntry::new("Switch 18.1.0", "https://example.com/switch")]
        );
    }

    #[test]
    fn test_parse_keeps_whitespace_around_comments() {
        let xml = "<rss><channel><item><title>Old3DS<!-- sys --> 11.17.0-50</title></item></channel></rss>";
        let entries = parse_feed(xml.as_bytes()).unwrap();
        assert_eq!(entries[0].title, "Old3DS 11.17.0-50");
        assert_eq!(entries[0].system_and_version(), Some(("Old3DS", "11.17.0-50")));
    }

    #[test]
    fn test_parse_empty_channel() {
        let xml = "<rss><channel><title>Empty</title></channel></rss>";
        assert!(parse_feed(xml.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(
            parse_feed(b"<rss><channel><item></channel></rss>"),
            Err(FeedError::Parse(_))
        ));
        assert!(matches!(
            parse_feed(b"<rss><channel><item>"),
            Err(FeedError::Parse(_))
        ));
        assert!(matches!(parse_feed(b"not xml at all"), Err(FeedError::Parse(_))));
        assert!(matches!(
            parse_feed(b"<html><body></body></html>"),
            Err(FeedError::Parse(_))
        ));
    }
}
