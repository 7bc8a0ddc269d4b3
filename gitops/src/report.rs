use manidiff_defs::{ChangeRecord, ChangeStatus, DiffSummary, ReportConfig};
use manidiff_utils::{canonical_yaml, substitute};

const NO_DIFFERENCES_NOTICE: &str = "_No differences detected._\n";

fn status_glyph(status: ChangeStatus) -> &'static str {
    match status {
        ChangeStatus::Added => "\u{2795}",
        ChangeStatus::Removed => "\u{2796}",
        ChangeStatus::Modified => "\u{1F504}",
    }
}

/// Render one change record as a markdown block: glyph, backticked key and
/// a diff fence. Added and removed documents are shown whole with uniform
/// `+`/`-` prefixes; modified ones carry their unified diff.
pub fn render_block(record: &ChangeRecord) -> String {
    let mut block = format!(
        "### {} `{}`\n\n```diff\n",
        status_glyph(record.status),
        record.key
    );
    match record.status {
        ChangeStatus::Added => {
            if let Some(doc) = &record.after {
                push_prefixed(&mut block, &canonical_yaml(doc), '+');
            }
        }
        ChangeStatus::Removed => {
            if let Some(doc) = &record.before {
                push_prefixed(&mut block, &canonical_yaml(doc), '-');
            }
        }
        ChangeStatus::Modified => {
            if let Some(diff) = &record.textual_diff {
                block.push_str(diff);
            }
        }
    }
    block.push_str("```\n\n");
    block
}

fn push_prefixed(block: &mut String, text: &str, prefix: char) {
    for line in text.lines() {
        block.push(prefix);
        block.push_str(line);
        block.push('\n');
    }
}

/// Pack rendered change blocks into bounded-length segments.
///
/// Greedy and sequential: blocks are appended in record order, never
/// reordered for tighter packing, so the diff reads in key order across
/// segment boundaries. Before a block is appended, the footer/continuation
/// reserve is checked; when the block would not fit, the open segment is
/// closed with the continuation marker and the next one starts from the
/// continuation header. A block that alone exceeds the limit is appended
/// whole to the segment it starts: the paginator never splits inside a
/// block, which is an accepted limit of the format rather than a bug.
///
/// Lengths are counted in characters. The final segment always carries the
/// footer; an empty record list yields a single no-differences segment so
/// the result is still surfaced.
pub fn paginate(records: &[ChangeRecord], config: &ReportConfig) -> Vec<String> {
    let summary = DiffSummary::of(records);
    let total = summary.total().to_string();
    let added = summary.added.to_string();
    let removed = summary.removed.to_string();
    let modified = summary.modified.to_string();
    let placeholders = [
        ("totalCount", total.as_str()),
        ("addedCount", added.as_str()),
        ("removedCount", removed.as_str()),
        ("modifiedCount", modified.as_str()),
        ("title", config.title.as_str()),
        ("subtitle", config.subtitle.as_str()),
    ];
    let header = substitute(&config.header_template, &placeholders);
    let footer = substitute(&config.footer_template, &placeholders);
    let continuation_header = substitute(
        &config.continuation_header_template,
        &[("title", config.title.as_str())],
    );
    let marker = &config.continuation_marker;

    let reserve = char_len(&footer).max(char_len(marker)) + config.safety_buffer;

    let mut segments = Vec::new();
    let mut buffer = header;
    if records.is_empty() {
        buffer.push_str(NO_DIFFERENCES_NOTICE);
    }
    let mut blocks_in_buffer = 0;
    for record in records {
        let block = render_block(record);
        if blocks_in_buffer > 0
            && char_len(&buffer) + char_len(&block) + reserve > config.max_segment_length
        {
            buffer.push_str(marker);
            segments.push(buffer);
            buffer = continuation_header.clone();
            blocks_in_buffer = 0;
        }
        buffer.push_str(&block);
        blocks_in_buffer += 1;
    }
    buffer.push_str(&footer);
    segments.push(buffer);
    segments
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}
