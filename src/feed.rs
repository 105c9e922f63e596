//! RSS decoding for the KOERI earthquake feed.
//!
//! Turns raw feed bytes into an ordered list of [`FeedEntry`] values, one per
//! `<item>`. Only `title`, `description` and `pubDate` are read; any other
//! element is ignored. The whole document must be well-formed: a single
//! malformed tag fails the parse and no entries are returned.

use crate::error::ParseError;
use crate::models::FeedEntry;
use crate::utils::istanbul;
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use tracing::{debug, instrument};

/// Naive `pubDate` layouts seen on Turkish feeds, read as Istanbul local time.
const NAIVE_DATE_FORMATS: &[&str] = &["%Y.%m.%d %H:%M:%S", "%Y-%m-%d %H:%M:%S"];

#[derive(Clone, Copy, PartialEq)]
enum Field {
    Title,
    Description,
    PubDate,
}

impl Field {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "title" => Some(Field::Title),
            "description" => Some(Field::Description),
            "pubDate" => Some(Field::PubDate),
            _ => None,
        }
    }
}

#[derive(Default)]
struct FeedEntryBuilder {
    title: Option<String>,
    description: Option<String>,
    pub_date: Option<String>,
}

impl FeedEntryBuilder {
    /// Record a field value. A repeated child element keeps its first value.
    fn set(&mut self, field: Field, text: String) {
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
            Field::PubDate => &mut self.pub_date,
        };
        slot.get_or_insert(text);
    }

    fn build(self) -> FeedEntry {
        let publish_time = self.pub_date.as_deref().and_then(parse_publish_time);
        if publish_time.is_none() {
            debug!(pub_date = ?self.pub_date, "Entry has no usable pubDate");
        }
        FeedEntry {
            title: self.title.as_deref().unwrap_or_default().trim().to_string(),
            description: self.description.as_deref().unwrap_or_default().trim().to_string(),
            publish_time,
        }
    }
}

/// Parse a KOERI RSS document into feed entries, in document order.
///
/// # Errors
///
/// Returns [`ParseError`] if the bytes are not a single well-formed XML
/// document: mismatched or unclosed tags, no root element, more than one
/// root, character data outside the root, undefined entities, or invalid
/// UTF-8.
#[instrument(level = "info", skip_all, fields(bytes = xml.len()))]
pub fn parse(xml: &[u8]) -> Result<Vec<FeedEntry>, ParseError> {
    let mut reader = Reader::from_reader(xml);

    let mut entries = Vec::new();
    let mut buf = Vec::new();

    let mut open: Vec<String> = Vec::new();
    let mut seen_root = false;
    let mut current_item: Option<FeedEntryBuilder> = None;
    let mut current_field: Option<Field> = None;
    let mut text = String::new();

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| ParseError::Xml {
            position: reader.error_position() as u64,
            message: e.to_string(),
        })?;

        match event {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if open.is_empty() {
                    if seen_root {
                        return Err(ParseError::MultipleRoots);
                    }
                    seen_root = true;
                }

                if name == "item" {
                    current_item = Some(FeedEntryBuilder::default());
                    current_field = None;
                } else if current_item.is_some() && current_field.is_none() {
                    current_field = Field::from_name(&name);
                    text.clear();
                }
                open.push(name);
            }
            Event::Empty(e) => {
                if open.is_empty() {
                    if seen_root {
                        return Err(ParseError::MultipleRoots);
                    }
                    seen_root = true;
                }
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if name == "item" {
                    entries.push(FeedEntryBuilder::default().build());
                }
            }
            Event::End(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                open.pop();

                if name == "item" {
                    if let Some(builder) = current_item.take() {
                        entries.push(builder.build());
                    }
                    current_field = None;
                } else if let (Some(field), Some(item)) = (current_field, current_item.as_mut()) {
                    if Field::from_name(&name) == Some(field) {
                        item.set(field, std::mem::take(&mut text));
                        current_field = None;
                    }
                }
            }
            Event::Text(e) => {
                let chunk =
                    std::str::from_utf8(&e).map_err(|err| ParseError::Encoding(err.to_string()))?;
                if open.is_empty() {
                    if !chunk.trim().is_empty() {
                        return Err(ParseError::StrayText);
                    }
                } else if current_field.is_some() {
                    text.push_str(chunk);
                }
            }
            Event::CData(e) => {
                if open.is_empty() {
                    return Err(ParseError::StrayText);
                }
                if current_field.is_some() {
                    let chunk =
                        std::str::from_utf8(&e).map_err(|err| ParseError::Encoding(err.to_string()))?;
                    text.push_str(chunk);
                }
            }
            Event::GeneralRef(e) => {
                if open.is_empty() {
                    return Err(ParseError::StrayText);
                }
                let name = e.decode().map_err(|err| ParseError::Encoding(err.to_string()))?;
                let resolved = resolve_reference(&name)
                    .ok_or_else(|| ParseError::UnknownEntity(name.to_string()))?;
                if current_field.is_some() {
                    text.push_str(&resolved);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(name) = open.pop() {
        return Err(ParseError::Unclosed(name));
    }
    if !seen_root {
        return Err(ParseError::NoRoot);
    }

    debug!(count = entries.len(), "Parsed feed entries");
    Ok(entries)
}

/// Resolve `&name;` where `name` is a predefined entity or a character reference.
fn resolve_reference(name: &str) -> Option<String> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }
    resolve_predefined_entity(name).map(str::to_string)
}

/// Parse a `pubDate` value.
///
/// RFC 2822 is the RSS norm; RFC 3339 and the naive layouts in
/// [`NAIVE_DATE_FORMATS`] are also accepted, the latter read in
/// Europe/Istanbul. Returns `None` for anything else.
pub fn parse_publish_time(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(t) = DateTime::parse_from_rfc2822(raw) {
        return Some(t);
    }
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t);
    }
    NAIVE_DATE_FORMATS.iter().find_map(|fmt| {
        NaiveDateTime::parse_from_str(raw, fmt)
            .ok()
            .and_then(|naive| istanbul().from_local_datetime(&naive).single())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[u8] = include_bytes!("../tests/fixtures/koeri_sample.xml");

    #[test]
    fn test_parse_sample_feed_in_order() {
        let entries = parse(SAMPLE).unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].title, "4.2 (Mw) Gulf of Izmir 2024.");
        assert_eq!(entries[1].title, "2.3 (ML) MARMARA DENIZI 2024.10.18 06:41:12");
        assert!(entries[0].description.ends_with("7.1 km"));
    }

    #[test]
    fn test_parse_reads_rfc2822_pub_date() {
        let entries = parse(SAMPLE).unwrap();
        let expected = DateTime::parse_from_rfc3339("2024-10-18T07:12:34+03:00").unwrap();
        assert_eq!(entries[0].publish_time, Some(expected));
    }

    #[test]
    fn test_parse_keeps_entry_with_bad_pub_date() {
        let entries = parse(SAMPLE).unwrap();
        assert_eq!(entries[3].publish_time, None);
    }

    #[test]
    fn test_parse_cdata_and_entities() {
        let xml = br#"<?xml version="1.0"?>
<rss version="2.0"><channel>
  <item>
    <title>3.1 (ML) AKDENIZ &amp; GIRIT &#40;YUNANISTAN&#x29; 2024.</title>
    <description><![CDATA[Derinlik <b>12.5</b> km]]></description>
    <pubDate>Fri, 18 Oct 2024 04:12:34 GMT</pubDate>
  </item>
</channel></rss>"#;
        let entries = parse(xml).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "3.1 (ML) AKDENIZ & GIRIT (YUNANISTAN) 2024.");
        assert_eq!(entries[0].description, "Derinlik <b>12.5</b> km");
    }

    #[test]
    fn test_parse_missing_fields_default_to_empty() {
        let xml = b"<rss><channel><item><title>1.0 (ML) X 2024.</title></item></channel></rss>";
        let entries = parse(xml).unwrap();
        assert_eq!(entries[0].description, "");
        assert_eq!(entries[0].publish_time, None);
    }

    #[test]
    fn test_parse_repeated_field_keeps_first_value() {
        let xml = b"<rss><channel><item>\
            <title>4.2 (Mw) Gulf of Izmir 2024.</title><title>9.9 (Mw) Elsewhere 2024.</title>\
            <description>a 7.1 km</description><description>a 99 km</description>\
            <pubDate>Fri, 18 Oct 2024 07:12:34 +0300</pubDate><pubDate>garbage</pubDate>\
            </item></channel></rss>";
        let entries = parse(xml).unwrap();
        assert_eq!(entries[0].title, "4.2 (Mw) Gulf of Izmir 2024.");
        assert_eq!(entries[0].description, "a 7.1 km");
        assert!(entries[0].publish_time.is_some());
    }

    #[test]
    fn test_parse_channel_title_is_not_an_entry_field() {
        let xml = b"<rss><channel><title>KOERI</title><item><description>d</description></item></channel></rss>";
        let entries = parse(xml).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "");
        assert_eq!(entries[0].description, "d");
    }

    #[test]
    fn test_parse_well_formed_non_feed_has_no_entries() {
        assert!(parse(b"<html><body/></html>").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_mismatched_tags() {
        let xml = b"<rss><channel><item><title>x</description></item></channel></rss>";
        assert!(parse(xml).is_err());
    }

    #[test]
    fn test_parse_rejects_truncated_document() {
        let xml = b"<rss><channel><item><title>4.0 (Mw) X 2024.</title>";
        assert!(parse(xml).is_err());
    }

    #[test]
    fn test_parse_rejects_plain_text() {
        assert!(matches!(parse(b"Service Unavailable"), Err(ParseError::StrayText)));
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        assert!(matches!(parse(b""), Err(ParseError::NoRoot)));
        assert!(matches!(parse(b"   \n"), Err(ParseError::NoRoot)));
    }

    #[test]
    fn test_parse_rejects_two_roots() {
        assert!(matches!(parse(b"<a/><b/>"), Err(ParseError::MultipleRoots)));
    }

    #[test]
    fn test_parse_rejects_unknown_entity() {
        let xml = b"<rss><channel><item><title>&bogus;</title></item></channel></rss>";
        assert!(parse(xml).is_err());
    }

    #[test]
    fn test_parse_publish_time_formats() {
        let expected = DateTime::parse_from_rfc3339("2024-10-18T07:12:34+03:00").unwrap();
        assert_eq!(parse_publish_time("Fri, 18 Oct 2024 07:12:34 +0300"), Some(expected));
        assert_eq!(parse_publish_time("Fri, 18 Oct 2024 04:12:34 GMT"), Some(expected));
        assert_eq!(parse_publish_time("2024-10-18T04:12:34Z"), Some(expected));
        assert_eq!(parse_publish_time("2024.10.18 07:12:34"), Some(expected));
        assert_eq!(parse_publish_time(" 2024-10-18 07:12:34 "), Some(expected));
        assert_eq!(parse_publish_time("yesterday"), None);
        assert_eq!(parse_publish_time(""), None);
    }
}
