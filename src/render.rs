//! Terminal rendering for bookmark lines, cards, and the grouped layout.
//! All width math goes through the ANSI-aware helpers in `shared::table`.

use crate::bookmark::Bookmark;
use crate::filter::CategoryGroup;
use crate::formatting::{FormatContext, TimeFormatter};
use crate::shared::table::{
    display_len, pad_field, truncate_with_ellipsis, wrap_text,
};

const CARD_TEXT_LINES: usize = 4;
const CARD_MIN_WIDTH: usize = 34;
const MAX_GRID_COLUMNS: usize = 4;
const GUTTER: &str = "  ";
const LINE_TITLE_WIDTH: usize = 40;
const LINE_HOST_WIDTH: usize = 28;

/// Favicon stand-in: the first letter of the title, tinted with the
/// deterministic color of the bookmark's host. Untitled entries fall back to
/// a bullet.
pub fn favicon_glyph(b: &Bookmark, ctx: &FormatContext) -> String {
    let letter = b
        .title
        .chars()
        .find(|c| c.is_alphanumeric())
        .map(|c| c.to_ascii_uppercase().to_string())
        .unwrap_or_else(|| "•".to_string());
    let host = b.host().unwrap_or_else(|| b.title.clone());
    ctx.format_glyph(&letter, &host)
}

/// One list row: id, glyph, title (search matches highlighted), host, tags,
/// and an optional age column.
pub fn render_line(
    b: &Bookmark,
    ctx: &FormatContext,
    query: Option<&str>,
    age: &str,
) -> String {
    let id_plain = pad_field(&b.id, crate::bookmark::ID_WIDTH + 2, b.id.chars().count());
    let id = ctx.format_id(&id_plain);

    let title_plain = truncate_with_ellipsis(&b.title, LINE_TITLE_WIDTH);
    let title_styled = ctx.highlight_match(&title_plain, query);
    let title =
        pad_field(&title_styled, LINE_TITLE_WIDTH, display_len(&title_styled));

    let host_plain = truncate_with_ellipsis(
        &b.host().unwrap_or_else(|| b.url.clone()),
        LINE_HOST_WIDTH,
    );
    let host = pad_field(
        &ctx.format_url(&host_plain),
        LINE_HOST_WIDTH,
        host_plain.chars().count(),
    );

    let mut line = format!("{} {} {} {}", id, favicon_glyph(b, ctx), title, host);
    if !b.tags.is_empty() {
        let (tags, _) = format_tag_row(&b.tags, ctx, usize::MAX);
        line.push(' ');
        line.push_str(&tags);
    }
    if !age.is_empty() {
        line.push(' ');
        line.push_str(&ctx.format_dim(age));
    }
    line.trim_end().to_string()
}

pub fn render_lines(
    items: &[&Bookmark],
    ctx: &FormatContext,
    query: Option<&str>,
    times: Option<&TimeFormatter>,
) -> Vec<String> {
    items
        .iter()
        .map(|b| {
            let age = times
                .map(|t| t.format(b.parse_added()))
                .unwrap_or_default();
            render_line(b, ctx, query, &age)
        })
        .collect()
}

/// Card grid: as many fixed-width columns as the terminal fits, rows joined
/// line by line.
pub fn render_grid(
    items: &[&Bookmark],
    ctx: &FormatContext,
    query: Option<&str>,
    width: usize,
) -> Vec<String> {
    let columns = (width / CARD_MIN_WIDTH).clamp(1, MAX_GRID_COLUMNS);
    let card_width =
        (width.saturating_sub((columns - 1) * GUTTER.len())) / columns;

    let mut out = Vec::new();
    for chunk in items.chunks(columns) {
        let cards: Vec<Vec<String>> = chunk
            .iter()
            .map(|b| card_lines(b, ctx, query, card_width))
            .collect();
        for row in 0..CARD_TEXT_LINES {
            let mut line = String::new();
            for (i, card) in cards.iter().enumerate() {
                if i > 0 {
                    line.push_str(GUTTER);
                }
                line.push_str(&card[row]);
            }
            out.push(line.trim_end().to_string());
        }
        out.push(String::new());
    }
    out.pop();
    out
}

fn card_lines(
    b: &Bookmark,
    ctx: &FormatContext,
    query: Option<&str>,
    width: usize,
) -> Vec<String> {
    let inner = width.saturating_sub(2);
    let mut lines = Vec::with_capacity(CARD_TEXT_LINES);

    let title_plain = truncate_with_ellipsis(&b.title, inner);
    let title_styled = if query.is_some() {
        ctx.highlight_match(&title_plain, query)
    } else {
        ctx.format_header(&title_plain)
    };
    let title_line =
        format!("{} {}", favicon_glyph(b, ctx), title_styled);
    lines.push(pad_field(
        &title_line,
        width,
        2 + title_plain.chars().count(),
    ));

    let host_plain = truncate_with_ellipsis(
        &b.host().unwrap_or_else(|| b.url.clone()),
        inner,
    );
    lines.push(pad_field(
        &format!("  {}", ctx.format_url(&host_plain)),
        width,
        2 + host_plain.chars().count(),
    ));

    let description = b.description.replace('\n', " ");
    let desc_plain = truncate_with_ellipsis(description.trim(), inner);
    lines.push(pad_field(
        &format!("  {}", ctx.format_dim(&desc_plain)),
        width,
        2 + desc_plain.chars().count(),
    ));

    let (tags_styled, tags_len) = format_tag_row(&b.tags, ctx, inner);
    lines.push(pad_field(
        &format!("  {tags_styled}"),
        width,
        2 + tags_len,
    ));

    lines
}

/// Style tags individually, dropping whole tags that do not fit. Returns the
/// styled row and its visible length so callers can pad.
fn format_tag_row(
    tags: &[String],
    ctx: &FormatContext,
    max: usize,
) -> (String, usize) {
    let mut styled = String::new();
    let mut plain_len = 0;
    for tag in tags {
        let needed = if plain_len == 0 {
            tag.chars().count()
        } else {
            tag.chars().count() + 1
        };
        if plain_len + needed > max {
            if plain_len + 1 <= max {
                styled.push('…');
                plain_len += 1;
            }
            break;
        }
        if plain_len > 0 {
            styled.push(' ');
        }
        styled.push_str(&ctx.format_tag(tag));
        plain_len += needed;
    }
    (styled, plain_len)
}

/// Category/section headings above either layout.
pub fn render_groups(
    groups: &[CategoryGroup<'_>],
    ctx: &FormatContext,
    query: Option<&str>,
    times: Option<&TimeFormatter>,
    width: usize,
    grid: bool,
) -> Vec<String> {
    let mut out = Vec::new();
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            out.push(String::new());
        }
        let name = if group.name.is_empty() {
            "(uncategorized)"
        } else {
            group.name.as_str()
        };
        out.push(format!(
            "{} {}",
            ctx.format_header(name),
            ctx.format_dim(&format!("({})", group.len()))
        ));
        for section in &group.sections {
            if !section.name.is_empty() {
                out.push(format!("  {}", ctx.format_url(&section.name)));
            }
            let rendered = if grid {
                render_grid(&section.bookmarks, ctx, query, width)
            } else {
                render_lines(&section.bookmarks, ctx, query, times)
            };
            out.extend(rendered);
        }
    }
    out
}

/// Full single-bookmark view used by `view` and the fzf preview.
pub fn render_detail(
    b: &Bookmark,
    ctx: &FormatContext,
    width: usize,
) -> Vec<String> {
    let mut out = Vec::new();
    out.push(format!(
        "{} {} {}",
        favicon_glyph(b, ctx),
        ctx.format_header(&b.title),
        ctx.format_id(&format!("({})", b.id))
    ));
    out.push(format!("  {}", ctx.format_url(&b.url)));

    if !b.category.is_empty() {
        let place = if b.section.is_empty() {
            b.category.clone()
        } else {
            format!("{} / {}", b.category, b.section)
        };
        out.push(format!("  {}", ctx.format_dim(&place)));
    }
    if !b.tags.is_empty() {
        let (tags, _) = format_tag_row(&b.tags, ctx, usize::MAX);
        out.push(format!("  {tags}"));
    }
    if let Some(added) = b.parse_added() {
        let absolute = TimeFormatter::new(false).format(Some(added));
        let relative = TimeFormatter::new(true).format(Some(added));
        out.push(format!(
            "  {}",
            ctx.format_dim(&format!("Added {absolute} ({relative})"))
        ));
    }
    if !b.description.is_empty() {
        out.push(String::new());
        for line in wrap_text(&b.description, width.saturating_sub(2)) {
            out.push(format!("  {line}"));
        }
    }
    out
}
