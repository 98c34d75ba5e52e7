pub mod actions;
pub mod args;
pub mod bookmark;
pub mod filter;
pub mod formatting;
pub mod fzf;
mod help;
pub mod query;
pub mod render;
pub mod shared;
pub mod tags;

use crate::args::CommonFlags;
use crate::bookmark::{Bookmark, bookmarks_path, find_by_id, load_collection};
use crate::filter::{
    FilterState, SortField, filtered_bookmarks, group_bookmarks, sort_bookmarks,
    tag_counts,
};
use crate::formatting::{FormatContext, TimeFormatter};
use crate::fzf::FzfSelector;
use crate::shared::table::render_table;
use std::env;
use std::error::Error;
use std::io::{self, IsTerminal};

pub fn entry() -> Result<(), Box<dyn Error>> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        return help::run(Vec::new());
    }

    let cmd = args.remove(0);
    match cmd.as_str() {
        "list" | "ls" => cmd_list(args)?,
        "grid" | "cards" => cmd_grid(args)?,
        "tags" => cmd_tags(args)?,
        "categories" | "cats" => cmd_categories(args)?,
        "view" | "show" => cmd_view(args)?,
        "open" => cmd_open(args)?,
        "copy" => cmd_copy(args)?,
        "pick" => cmd_pick(args)?,
        "state" => cmd_state(args)?,
        "seed" => cmd_seed(args)?,
        "path" => println!("{}", bookmarks_path()?.display()),
        "completion" => cmd_completion(args)?,
        "guide" => help::run_guides(args)?,
        "help" | "--help" | "-h" => help::run(args)?,
        other => {
            eprintln!("Unknown command: {other}");
            help::run(Vec::new())?;
        }
    }

    Ok(())
}

fn load() -> Result<Vec<Bookmark>, Box<dyn Error>> {
    load_collection(&bookmarks_path()?)
}

fn context(flags: &CommonFlags) -> FormatContext {
    if flags.plain {
        FormatContext::new(false)
    } else {
        FormatContext::from_env()
    }
}

fn render_width() -> usize {
    terminal_columns().unwrap_or(96)
}

/// Bare words on a listing command are search terms, so `lnk list rust`
/// reads naturally; an explicit -s/--search wins.
fn absorb_positional_search(flags: &mut CommonFlags) {
    if flags.search.is_none() && !flags.positional.is_empty() {
        flags.search = Some(flags.positional.join(" "));
        flags.positional.clear();
    }
}

fn take_flag(args: &mut Vec<String>, flag: &str) -> bool {
    let before = args.len();
    args.retain(|a| a != flag);
    args.len() != before
}

/// Filter and sort the view a listing command works on.
fn view<'a>(
    all: &'a [Bookmark],
    state: &FilterState,
    flags: &CommonFlags,
) -> Result<Vec<&'a Bookmark>, Box<dyn Error>> {
    let field = SortField::parse(&flags.sort_field)?;
    let mut items = filtered_bookmarks(all, state);
    sort_bookmarks(&mut items, field, flags.ascending);
    Ok(items)
}

fn cmd_list(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let mut flags = CommonFlags::parse(args, "list")?;
    absorb_positional_search(&mut flags);
    let state = flags.filter_state()?;
    let all = load()?;
    if all.is_empty() {
        println!("No bookmarks yet. Try `lnk seed`.");
        return Ok(());
    }
    let items = view(&all, &state, &flags)?;
    if items.is_empty() {
        println!("No bookmarks match.");
        return Ok(());
    }

    let ctx = context(&flags);
    let times = flags
        .relative_time
        .then(|| TimeFormatter::new(true));
    let query = state.search.as_deref();
    let lines = if flags.group {
        let groups = group_bookmarks(&items);
        render::render_groups(
            &groups,
            &ctx,
            query,
            times.as_ref(),
            render_width(),
            false,
        )
    } else {
        render::render_lines(&items, &ctx, query, times.as_ref())
    };
    print_lines(&lines, flags.show_all)?;
    Ok(())
}

fn cmd_grid(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let mut flags = CommonFlags::parse(args, "grid")?;
    absorb_positional_search(&mut flags);
    let state = flags.filter_state()?;
    let all = load()?;
    if all.is_empty() {
        println!("No bookmarks yet. Try `lnk seed`.");
        return Ok(());
    }
    let items = view(&all, &state, &flags)?;
    if items.is_empty() {
        println!("No bookmarks match.");
        return Ok(());
    }

    let ctx = context(&flags);
    let query = state.search.as_deref();
    let width = render_width();
    let lines = if flags.group {
        let groups = group_bookmarks(&items);
        render::render_groups(&groups, &ctx, query, None, width, true)
    } else {
        render::render_grid(&items, &ctx, query, width)
    };
    print_lines(&lines, flags.show_all)?;
    Ok(())
}

fn cmd_tags(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let mut flags = CommonFlags::parse(args, "tags")?;
    absorb_positional_search(&mut flags);
    let state = flags.filter_state()?;
    let all = load()?;

    let counts = tag_counts(&all, &state);
    if counts.is_empty() {
        println!("No tags found.");
        return Ok(());
    }

    let ctx = context(&flags);
    let headers = vec!["Tag".to_string(), "Count".to_string()];
    let rows: Vec<Vec<String>> = counts
        .iter()
        .map(|(tag, count)| {
            vec![ctx.format_tag(tag), count.to_string()]
        })
        .collect();
    let table = render_table(&headers, &rows);
    let lines: Vec<String> = table.lines().map(str::to_string).collect();
    print_lines(&lines, flags.show_all)?;
    Ok(())
}

fn cmd_categories(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let mut flags = CommonFlags::parse(args, "categories")?;
    absorb_positional_search(&mut flags);
    let state = flags.filter_state()?;
    let all = load()?;

    let items = filtered_bookmarks(&all, &state);
    if items.is_empty() {
        println!("No bookmarks match.");
        return Ok(());
    }

    let ctx = context(&flags);
    let groups = group_bookmarks(&items);
    let headers = vec![
        "Category".to_string(),
        "Section".to_string(),
        "Count".to_string(),
    ];
    let mut rows: Vec<Vec<String>> = Vec::new();
    for group in &groups {
        let category = if group.name.is_empty() {
            "(uncategorized)".to_string()
        } else {
            group.name.clone()
        };
        for section in &group.sections {
            rows.push(vec![
                ctx.format_header(&category),
                section.name.clone(),
                section.bookmarks.len().to_string(),
            ]);
        }
    }
    let table = render_table(&headers, &rows);
    let lines: Vec<String> = table.lines().map(str::to_string).collect();
    print_lines(&lines, flags.show_all)?;
    Ok(())
}

fn cmd_view(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let flags = CommonFlags::parse(args, "view")?;
    if flags.positional.is_empty() {
        return Err("Usage: lnk view <id>... [--plain]".into());
    }
    let all = load()?;
    let ctx = context(&flags);
    let width = render_width();

    let mut lines: Vec<String> = Vec::new();
    for (i, id) in flags.positional.iter().enumerate() {
        let b = find_by_id(&all, id)
            .ok_or_else(|| format!("Bookmark {id} not found"))?;
        if i > 0 {
            lines.push(String::new());
        }
        lines.extend(render::render_detail(b, &ctx, width));
    }
    print_lines(&lines, flags.show_all)?;
    Ok(())
}

/// Shared target resolution for open/copy: an exact id wins, anything else
/// is a search; several matches drop into fzf when it is available.
fn resolve_targets<'a>(
    all: &'a [Bookmark],
    flags: &CommonFlags,
    command_name: &str,
) -> Result<Vec<&'a Bookmark>, Box<dyn Error>> {
    let mut state = flags.filter_state()?;

    if flags.positional.len() == 1 {
        if let Some(b) = find_by_id(all, &flags.positional[0]) {
            return Ok(vec![b]);
        }
    }
    if !flags.positional.is_empty() {
        state.search = Some(flags.positional.join(" "));
    }
    if state.is_empty() {
        return Err(format!(
            "Usage: lnk {command_name} <id|search terms> [filters]"
        )
        .into());
    }

    let mut matched = filtered_bookmarks(all, &state);
    sort_bookmarks(&mut matched, SortField::Title, true);
    match matched.len() {
        0 => Err("No bookmarks match.".into()),
        1 => Ok(matched),
        n => {
            if !fzf::is_fzf_available() {
                return Err(format!(
                    "{n} bookmarks match; refine the search or use `lnk pick`"
                )
                .into());
            }
            let rows: Vec<String> = matched
                .iter()
                .map(|b| format!("{}\t{}  {}", b.id, b.title, b.url))
                .collect();
            let ids = FzfSelector::with_bookmark_preview().select_ids(&rows)?;
            Ok(ids
                .iter()
                .filter_map(|id| find_by_id(all, id))
                .collect())
        }
    }
}

fn cmd_open(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let flags = CommonFlags::parse(args, "open")?;
    let all = load()?;
    let targets = resolve_targets(&all, &flags, "open")?;
    if targets.is_empty() {
        println!("No selection made.");
        return Ok(());
    }
    for b in targets {
        actions::open_in_browser(b)?;
    }
    Ok(())
}

fn cmd_copy(mut args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let markdown = take_flag(&mut args, "--markdown");
    let flags = CommonFlags::parse(args, "copy")?;
    let all = load()?;
    let targets = resolve_targets(&all, &flags, "copy")?;
    if targets.is_empty() {
        println!("No selection made.");
        return Ok(());
    }
    let payload = targets
        .iter()
        .map(|b| actions::copy_payload(b, markdown))
        .collect::<Vec<_>>()
        .join("\n");
    actions::copy_to_clipboard(&payload)?;
    Ok(())
}

fn cmd_pick(mut args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let copy = take_flag(&mut args, "--copy");
    let markdown = take_flag(&mut args, "--markdown");
    let mut flags = CommonFlags::parse(args, "pick")?;
    absorb_positional_search(&mut flags);
    let state = flags.filter_state()?;
    let all = load()?;
    let items = view(&all, &state, &flags)?;
    if items.is_empty() {
        println!("No bookmarks match.");
        return Ok(());
    }

    let rows: Vec<String> = items
        .iter()
        .map(|b| format!("{}\t{}  {}", b.id, b.title, b.url))
        .collect();
    let ids = FzfSelector::with_bookmark_preview().select_ids(&rows)?;
    if ids.is_empty() {
        println!("No selection made.");
        return Ok(());
    }

    let selected: Vec<&Bookmark> =
        ids.iter().filter_map(|id| find_by_id(&all, id)).collect();
    if copy {
        let payload = selected
            .iter()
            .map(|b| actions::copy_payload(b, markdown))
            .collect::<Vec<_>>()
            .join("\n");
        actions::copy_to_clipboard(&payload)?;
    } else {
        for b in selected {
            actions::open_in_browser(b)?;
        }
    }
    Ok(())
}

fn cmd_state(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let mut flags = CommonFlags::parse(args, "state")?;
    absorb_positional_search(&mut flags);
    let state = flags.filter_state()?;
    println!("{}", query::encode(&state));
    Ok(())
}

fn cmd_seed(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let mut count: usize = 6;
    let mut force = false;
    let mut parser = args::ArgParser::new(args, "seed");
    while let Some(arg) = parser.next() {
        match arg.as_str() {
            "--force" => force = true,
            other => {
                if other.starts_with('-') {
                    return Err(format!("Unknown flag for seed: {other}").into());
                }
                count = other.parse().map_err(|_| "Count must be a number")?;
            }
        }
    }

    let path = bookmarks_path()?;
    if path.exists() && !force {
        return Err(format!(
            "{} already exists; pass --force to overwrite",
            path.display()
        )
        .into());
    }
    let written = bookmark::write_seed(&path, count)?;
    println!("Seeded {written} bookmarks into {}", path.display());
    Ok(())
}

fn cmd_completion(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let shell = args.first().map(|s| s.as_str()).unwrap_or("zsh");
    match shell {
        "zsh" => {
            println!("{}", include_str!("../contrib/link_deck_fzf.zsh"));
            Ok(())
        }
        _ => Err("Only zsh completion is supported right now".into()),
    }
}

fn print_lines(lines: &[String], show_all: bool) -> io::Result<()> {
    if show_all {
        for line in lines {
            println!("{line}");
        }
        Ok(())
    } else {
        paginate_and_print(lines)
    }
}

/// Print with a soft page limit when writing to a terminal; everything else
/// (pipes, tests) gets the full output.
pub fn paginate_and_print(lines: &[String]) -> io::Result<()> {
    let rows = terminal_rows().unwrap_or(0);
    if !io::stdout().is_terminal() || rows == 0 || lines.len() + 1 <= rows {
        for line in lines {
            println!("{line}");
        }
        return Ok(());
    }

    let visible = rows.saturating_sub(2).max(1).min(lines.len());
    for line in &lines[..visible] {
        println!("{line}");
    }
    let hidden = lines.len() - visible;
    if hidden > 0 {
        println!("… {hidden} more line(s); pass --all to see everything");
    }
    Ok(())
}

pub fn terminal_columns() -> Option<usize> {
    terminal_size::terminal_size().map(|(w, _)| w.0 as usize)
}

pub fn terminal_rows() -> Option<usize> {
    terminal_size::terminal_size().map(|(_, h)| h.0 as usize)
}
