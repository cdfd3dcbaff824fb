use anyhow::{Result, anyhow};
use std::collections::HashMap;

use super::geom::{BBoxPx, union_bbox};
use super::text::needs_space;

const LEVEL_LINE: u32 = 4;
const LEVEL_WORD: u32 = 5;

type LineKey = (u32, u32, u32, u32);

#[derive(Debug, Clone)]
struct WordToken {
    text: String,
    bbox: BBoxPx,
}

#[derive(Debug, Default)]
struct LineEntry {
    bbox: Option<BBoxPx>,
    words: Vec<WordToken>,
}

/// A tesseract line in pixel space of the image it was run on.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ParsedLine {
    pub(super) text: Option<String>,
    pub(super) bbox: BBoxPx,
}

/// Groups tesseract TSV rows into lines, keeping the order tesseract reports
/// them in (page, block, paragraph, line).
pub(super) fn parse_tsv_lines(tsv: &str) -> Result<Vec<ParsedLine>> {
    let mut rows = tsv.lines();
    let header = rows
        .next()
        .ok_or_else(|| anyhow!("tesseract produced no tsv output"))?;
    if !header.starts_with("level") {
        return Err(anyhow!("unexpected tesseract tsv header: {}", header.trim()));
    }

    let mut order: Vec<LineKey> = Vec::new();
    let mut entries: HashMap<LineKey, LineEntry> = HashMap::new();

    for row in rows {
        let cols = row.split('\t').collect::<Vec<_>>();
        if cols.len() < 11 {
            continue;
        }
        let level: u32 = cols[0].parse().unwrap_or(0);
        if level != LEVEL_LINE && level != LEVEL_WORD {
            continue;
        }
        let key: LineKey = (
            cols[1].parse().unwrap_or(0),
            cols[2].parse().unwrap_or(0),
            cols[3].parse().unwrap_or(0),
            cols[4].parse().unwrap_or(0),
        );
        let bbox = BBoxPx {
            x: cols[6].parse().unwrap_or(0),
            y: cols[7].parse().unwrap_or(0),
            w: cols[8].parse().unwrap_or(0),
            h: cols[9].parse().unwrap_or(0),
        };

        let entry = entries.entry(key).or_insert_with(|| {
            order.push(key);
            LineEntry::default()
        });

        if level == LEVEL_LINE {
            entry.bbox = Some(bbox);
            continue;
        }

        let conf: f32 = cols[10].parse().unwrap_or(-1.0);
        let text = cols.get(11).map(|value| value.trim()).unwrap_or_default();
        if conf < 0.0 || text.is_empty() {
            continue;
        }
        entry.words.push(WordToken {
            text: text.to_string(),
            bbox,
        });
    }

    let mut lines = Vec::with_capacity(order.len());
    for key in order {
        let Some(entry) = entries.remove(&key) else {
            continue;
        };
        if let Some(line) = build_line(entry) {
            lines.push(line);
        }
    }
    Ok(lines)
}

fn build_line(entry: LineEntry) -> Option<ParsedLine> {
    let bbox = match entry.bbox {
        Some(bbox) => bbox,
        None => entry
            .words
            .iter()
            .map(|word| word.bbox)
            .reduce(|acc, next| union_bbox(&acc, &next))?,
    };

    let mut text = String::new();
    let mut last_token = "";
    for word in &entry.words {
        if !text.is_empty() && needs_space(last_token, &word.text) {
            text.push(' ');
        }
        text.push_str(&word.text);
        last_token = word.text.as_str();
    }

    Some(ParsedLine {
        text: (!text.is_empty()).then_some(text),
        bbox,
    })
}
