//! CSV line codec for the events file.
//!
//! One event per record: `dd-MM-yyyy,description`. The record is split at the
//! first comma only, so commas inside the description survive. A description
//! that contains a line break or starts with `"` is written as a quoted field
//! with inner quotes doubled; everything else is written verbatim, which keeps
//! files readable by older versions.
//!
//! Older files were never escaped, so a leading `"` does not prove a field is
//! quoted. A field only counts as quoted when it closes cleanly; anything else
//! is read back as plain text.

use crate::date::CalendarDate;
use crate::error::DaybookError;
use crate::event::Event;

/// Encode an event as one record, without the trailing newline.
pub fn encode(event: &Event) -> String {
    let description = event.description();

    if needs_quoting(description) {
        format!("{},\"{}\"", event.date(), description.replace('"', "\"\""))
    } else {
        format!("{},{}", event.date(), description)
    }
}

/// Decode one record. The error is a human-readable reason; the store adds the
/// line number.
pub fn decode(record: &str) -> Result<Event, String> {
    let (date, rest) = record
        .split_once(',')
        .ok_or_else(|| "expected 'DD-MM-YYYY,description'".to_string())?;

    let date: CalendarDate = date.parse().map_err(|e: DaybookError| e.to_string())?;

    let description = if rest.starts_with('"') {
        unquote(rest)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| rest.to_string())
    } else {
        rest.to_string()
    };

    if description.is_empty() {
        return Err("empty description".to_string());
    }

    Ok(Event::new(date, description))
}

/// Split file content into `(line number, record)` pairs. A quoted description
/// may span several physical lines; its record starts at the first of them.
/// A quote that never closes cleanly covers its own line only.
pub fn split_records(content: &str) -> Vec<(usize, String)> {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut records = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let (record, used) = if quote_open(lines[i]) {
            join_quoted(&lines[i..]).unwrap_or_else(|| (lines[i].to_string(), 1))
        } else {
            (lines[i].to_string(), 1)
        };

        records.push((i + 1, strip_cr(&record).to_string()));
        i += used;
    }

    records
}

/// Join `lines` until the quoted field opened on the first one closes.
/// Returns the record and how many lines it took.
fn join_quoted(lines: &[&str]) -> Option<(String, usize)> {
    let mut record = lines[0].to_string();

    for (n, line) in lines.iter().enumerate().skip(1) {
        record.push('\n');
        record.push_str(line);

        if !quote_open(&record) {
            let closes_cleanly = strip_cr(&record)
                .split_once(',')
                .is_some_and(|(_, rest)| unquote(rest).is_some());
            return closes_cleanly.then_some((record, n + 1));
        }
    }

    None
}

fn strip_cr(record: &str) -> &str {
    record.strip_suffix('\r').unwrap_or(record)
}

fn needs_quoting(description: &str) -> bool {
    description.starts_with('"') || description.contains(['\n', '\r'])
}

fn quote_open(record: &str) -> bool {
    match record.split_once(',') {
        Some((_, rest)) if rest.starts_with('"') => rest.matches('"').count() % 2 == 1,
        _ => false,
    }
}

/// The content of a quoted field, or `None` if `field` is not exactly one
/// quoted value.
fn unquote(field: &str) -> Option<String> {
    let mut out = String::with_capacity(field.len());
    let mut chars = field.strip_prefix('"')?.chars();

    while let Some(c) = chars.next() {
        if c != '"' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('"') => out.push('"'),
            None => return Some(out),
            Some(_) => return None,
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(description: &str) -> Event {
        Event::new(CalendarDate::new(15, 3, 2024).unwrap(), description)
    }

    fn roundtrip(description: &str) -> Event {
        let encoded = format!("{}\n", encode(&event(description)));
        let records = split_records(&encoded);
        let (_, record) = records
            .iter()
            .find(|(_, r)| !r.is_empty())
            .expect("Should contain one record");
        decode(record).expect("Should decode")
    }

    #[test]
    fn test_encode_plain() {
        assert_eq!(encode(&event("Meeting")), "15-03-2024,Meeting");
        assert_eq!(encode(&event("Lunch, then gym")), "15-03-2024,Lunch, then gym");
    }

    #[test]
    fn test_decode_plain_record() {
        let decoded = decode("05-01-2024,Dentist").unwrap();
        assert_eq!(decoded, Event::new(CalendarDate::new(5, 1, 2024).unwrap(), "Dentist"));
    }

    #[test]
    fn test_commas_quotes_and_newlines_roundtrip() {
        for description in [
            "Lunch, then gym, then sleep",
            "Say \"hi\"",
            "\"Quoted\" at start",
            "two\nlines",
            "windows\r\nbreak",
            "\"",
        ] {
            assert_eq!(roundtrip(description).description(), description);
        }
    }

    #[test]
    fn test_decode_errors() {
        assert!(decode("15-03-2024").unwrap_err().contains("expected"));
        assert!(decode("15-03-2024,").unwrap_err().contains("empty"));
        assert!(decode("2024-03-15,Meeting").is_err());
        assert!(decode("31-02-2024,Meeting").is_err());
    }

    #[test]
    fn test_decode_unescaped_leading_quote_as_plain_text() {
        for description in ["\"Big\" meeting", "\"open", "\"a\"b", "\"\""] {
            let decoded = decode(&format!("15-03-2024,{description}")).unwrap();
            assert_eq!(decoded.description(), description);
        }
    }

    #[test]
    fn test_split_records_tracks_line_numbers() {
        let content = "01-01-2024,A\r\n02-01-2024,\"multi\nline\"\n03-01-2024,C\n";
        let records = split_records(content);
        assert_eq!(
            records,
            vec![
                (1, "01-01-2024,A".to_string()),
                (2, "02-01-2024,\"multi\nline\"".to_string()),
                (4, "03-01-2024,C".to_string()),
                (5, String::new()),
            ]
        );
    }

    #[test]
    fn test_split_records_unclosed_quote_keeps_later_lines() {
        let records = split_records("01-01-2024,\"never closed\n02-01-2024,B\n03-01-2024,C");
        assert_eq!(
            records,
            vec![
                (1, "01-01-2024,\"never closed".to_string()),
                (2, "02-01-2024,B".to_string()),
                (3, "03-01-2024,C".to_string()),
            ]
        );
        assert_eq!(decode(&records[0].1).unwrap().description(), "\"never closed");
    }

    #[test]
    fn test_split_records_quote_closed_by_trailing_text_is_not_joined() {
        // The second line closes the quote but leaves text after it
        let records = split_records("01-01-2024,\"odd\n02-01-2024,x\" y\n");
        assert_eq!(records[0], (1, "01-01-2024,\"odd".to_string()));
        assert_eq!(records[1], (2, "02-01-2024,x\" y".to_string()));
    }
}
