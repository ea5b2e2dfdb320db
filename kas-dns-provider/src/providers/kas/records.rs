//! `get_dns_settings` reply parsing
//!
//! Records arrive as SOAP-encoded maps: an `<item xsi:type="ns2:Map">` per record whose
//! children are `<item><key>..</key><value>..</value></item>` pairs.

use std::sync::LazyLock;

use quick_xml::Reader;
use quick_xml::events::Event;
use regex::Regex;

use crate::types::DnsRecordState;

const RECORD_ITEM_MARKER: &str = r#"<item xsi:type="ns2:Map">"#;

static FIELD_RES: LazyLock<Option<[Regex; 4]>> = LazyLock::new(|| {
    let field = |key: &str| {
        Regex::new(&format!(
            r"<key[^>]*>{key}</key>\s*<value[^>]*>([^<]+)</value>"
        ))
    };
    Some([
        field("record_id").ok()?,
        field("record_name").ok()?,
        field("record_type").ok()?,
        field("record_data").ok()?,
    ])
});

/// One `<item>` element being read.
#[derive(Default)]
struct ItemFrame {
    key: Option<String>,
    value: String,
    pairs: Vec<(String, String)>,
}

impl ItemFrame {
    fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn into_record(self) -> Option<DnsRecordState> {
        let id = self.get("record_id")?.trim().to_string();
        let name = self.get("record_name")?.trim().to_string();
        let record_type = self.get("record_type")?.trim().to_string();
        if id.is_empty() {
            return None;
        }
        let value = self.get("record_data").unwrap_or_default().to_string();
        Some(DnsRecordState {
            id,
            name,
            record_type,
            value,
        })
    }
}

/// Extracts every record from a `get_dns_settings` reply.
///
/// The XML walk is tried first; the regex scan only runs when it fails or finds nothing.
pub(crate) fn parse_records(raw: &str) -> Result<Vec<DnsRecordState>, String> {
    match parse_xml(raw) {
        Ok(records) if !records.is_empty() => return Ok(records),
        Ok(_) => {}
        Err(e) => log::warn!("[kas] XML record parse failed, using pattern scan: {e}"),
    }

    let records = parse_with_patterns(raw);
    if records.is_empty() && raw.contains("record_id") {
        return Err("reply lists records but none could be read".to_string());
    }
    Ok(records)
}

fn parse_xml(raw: &str) -> Result<Vec<DnsRecordState>, quick_xml::Error> {
    // text is kept untrimmed: TXT data may begin or end with spaces
    let mut reader = Reader::from_str(raw);

    let mut elements: Vec<Vec<u8>> = Vec::new();
    let mut items: Vec<ItemFrame> = Vec::new();
    let mut records = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                if name == b"item" {
                    items.push(ItemFrame::default());
                }
                elements.push(name);
            }
            Event::Empty(e) => {
                // <value/> still completes a pair
                if e.local_name().as_ref() == b"value"
                    && let Some(frame) = items.last_mut()
                {
                    frame.value.clear();
                }
            }
            Event::Text(t) => {
                let text = t.unescape()?;
                push_text(&elements, items.last_mut(), &text);
            }
            Event::CData(c) => {
                let text = String::from_utf8_lossy(&c);
                push_text(&elements, items.last_mut(), &text);
            }
            Event::End(e) => {
                elements.pop();
                if e.local_name().as_ref() == b"item"
                    && let Some(frame) = items.pop()
                {
                    close_item(frame, items.last_mut(), &mut records);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(records)
}

fn push_text(elements: &[Vec<u8>], frame: Option<&mut ItemFrame>, text: &str) {
    let Some(frame) = frame else {
        return;
    };
    match elements.last().map(Vec::as_slice) {
        Some(b"key") => frame.key.get_or_insert_with(String::new).push_str(text.trim()),
        Some(b"value") => frame.value.push_str(text),
        _ => {}
    }
}

fn close_item(
    frame: ItemFrame,
    parent: Option<&mut ItemFrame>,
    records: &mut Vec<DnsRecordState>,
) {
    match frame.key {
        // key/value pair: belongs to the enclosing map
        Some(key) => {
            if let Some(parent) = parent {
                parent.pairs.push((key, frame.value));
            }
        }
        // map item: a record if it carries the record fields
        None => {
            if let Some(record) = frame.into_record() {
                records.push(record);
            }
        }
    }
}

fn parse_with_patterns(raw: &str) -> Vec<DnsRecordState> {
    let Some([id_re, name_re, type_re, data_re]) = FIELD_RES.as_ref() else {
        return Vec::new();
    };
    let capture = |re: &Regex, chunk: &str| {
        re.captures(chunk)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    };

    raw.split(RECORD_ITEM_MARKER)
        .skip(1)
        .filter_map(|chunk| {
            let id = capture(id_re, chunk)?;
            let record_type = capture(type_re, chunk)?;
            Some(DnsRecordState {
                id: id.trim().to_string(),
                name: capture(name_re, chunk)
                    .map(|name| name.trim().to_string())
                    .unwrap_or_default(),
                record_type: record_type.trim().to_string(),
                value: capture(data_re, chunk).unwrap_or_default(),
            })
        })
        .collect()
}
