use super::{HelpBook, HelpFlag, HelpTopic, Section};

pub(crate) fn book() -> HelpBook<'static> {
    HelpBook {
        title: "Link Deck",
        usage: "lnk <command> [options]",
        topics: ALL_TOPICS,
        footer: &[
            "Use `lnk help <topic>` for focused docs, e.g. `lnk help list` or `lnk help state`.",
            "Every listing command takes the same filter flags, so a view built for `list` works for `grid`, `tags`, and `pick` unchanged.",
        ],
    }
}

const FILTER_FLAGS: &[HelpFlag<'static>] = &[
    HelpFlag {
        name: "-s, --search <text>",
        desc: "Substring search against title, description, URL, and tags.",
    },
    HelpFlag {
        name: "-t, --tag <tag>",
        desc: "Filter by tag (normalized to #tag); repeat to require several.",
    },
    HelpFlag {
        name: "-c, --category <name>",
        desc: "Keep only bookmarks in this category.",
    },
    HelpFlag {
        name: "-S, --section <name>",
        desc: "Narrow to a section; needs a category in scope.",
    },
    HelpFlag {
        name: "--query <string>",
        desc: "Apply a saved query string; explicit flags override it.",
    },
];

const ALL_TOPICS: &[HelpTopic<'static>] = &[
    HelpTopic {
        name: "list",
        summary: "List matching bookmarks one per line.",
        usage: "lnk list [filters] [--sort title|url|category|added] [--asc|--desc] [--group|-g] [--relative|-r] [--all|-a] [--plain|-p]",
        details: &[
            "Each row shows the id, favicon glyph, title, host, and tags; search matches are highlighted.",
            "With --group, rows are arranged under category and section headings instead of one flat sort.",
        ],
        flags: &[
            HelpFlag {
                name: "--sort <field>",
                desc: "title|url|category|added (default title).",
            },
            HelpFlag {
                name: "--asc / --desc",
                desc: "Ascending or descending sort (default asc).",
            },
            HelpFlag {
                name: "--group, -g",
                desc: "Group under category/section headings.",
            },
            HelpFlag {
                name: "--relative, -r",
                desc: "Show the added date as an age column.",
            },
            HelpFlag {
                name: "--all, -a",
                desc: "Disable pagination; show all results.",
            },
            HelpFlag {
                name: "--plain, -p",
                desc: "Disable colors.",
            },
        ],
        aliases: &["ls"],
        section: Section::Command,
        examples: &[
            "lnk list -s rust -t cli",
            "lnk list -c Development --group",
            "lnk list --query 'q=rust&tags=cli'",
        ],
    },
    HelpTopic {
        name: "grid",
        summary: "Render matching bookmarks as a card grid.",
        usage: "lnk grid [filters] [--group|-g] [--all|-a] [--plain|-p]",
        details: &[
            "Cards carry the favicon glyph, title, host, a one-line description, and the tag row; the column count follows the terminal width.",
            "Takes the same filter and sort flags as list.",
        ],
        flags: &[],
        aliases: &["cards"],
        section: Section::Command,
        examples: &["lnk grid -c News", "lnk grid -s rust --group"],
    },
    HelpTopic {
        name: "tags",
        summary: "Tag counts for the current view, pinned tags included.",
        usage: "lnk tags [filters]",
        details: &[
            "Counts are computed over the view filtered by search/category/section but not by the tag selection itself, so each row answers what selecting that tag would leave.",
            "Pinned tags (LINK_DECK_PINNED_TAGS) always appear, at zero when absent.",
        ],
        flags: &[],
        aliases: &[],
        section: Section::Command,
        examples: &["lnk tags", "lnk tags -c Development"],
    },
    HelpTopic {
        name: "categories",
        summary: "Category and section counts for the current view.",
        usage: "lnk categories [filters]",
        details: &[
            "One row per category/section pair with the number of bookmarks it holds.",
        ],
        flags: &[],
        aliases: &["cats"],
        section: Section::Command,
        examples: &["lnk categories"],
    },
    HelpTopic {
        name: "view",
        summary: "Show the full card for one or more bookmarks by id.",
        usage: "lnk view <id>... [--plain|-p]",
        details: &[
            "Prints title, URL, category/section, tags, added date, and the full description.",
            "Also serves as the fzf preview for pick.",
        ],
        flags: &[],
        aliases: &["show"],
        section: Section::Command,
        examples: &["lnk view 0cTx2M"],
    },
    HelpTopic {
        name: "open",
        summary: "Open a bookmark in the system browser.",
        usage: "lnk open <id|search terms> [filters]",
        details: &[
            "An exact id opens directly. Anything else is treated as a search; a single match opens, several drop into the fzf picker.",
            "The browser command comes from LINK_DECK_BROWSER, else the platform default (xdg-open/open/explorer).",
        ],
        flags: &[],
        aliases: &[],
        section: Section::Command,
        examples: &["lnk open 0cTx2M", "lnk open rust blog"],
    },
    HelpTopic {
        name: "copy",
        summary: "Copy a bookmark URL to the clipboard.",
        usage: "lnk copy <id|search terms> [--markdown] [filters]",
        details: &[
            "Resolves its target like open. Without a reachable clipboard (ssh, headless) the URL is printed instead.",
        ],
        flags: &[HelpFlag {
            name: "--markdown",
            desc: "Copy a [title](url) link instead of the bare URL.",
        }],
        aliases: &[],
        section: Section::Command,
        examples: &["lnk copy crates", "lnk copy 0cTx2M --markdown"],
    },
    HelpTopic {
        name: "pick",
        summary: "Interactive fzf picker over the current view.",
        usage: "lnk pick [filters] [--copy] [--markdown]",
        details: &[
            "Feeds the filtered view into fzf with a full-card preview. Enter opens the selection; with --copy the URLs are copied instead. Multi-select is enabled.",
        ],
        flags: &[
            HelpFlag {
                name: "--copy",
                desc: "Copy the selected URLs instead of opening them.",
            },
            HelpFlag {
                name: "--markdown",
                desc: "With --copy, copy [title](url) links.",
            },
        ],
        aliases: &[],
        section: Section::Command,
        examples: &["lnk pick -c Development", "lnk pick -t daily --copy"],
    },
    HelpTopic {
        name: "state",
        summary: "Print the canonical query string for the current filters.",
        usage: "lnk state [filters]",
        details: &[
            "Encodes search, tags, category, and section as a query string (q, tags, category, section). Passing --query normalizes an existing string through decode/encode.",
            "Feed the output back to any listing command with --query to restore the view.",
        ],
        flags: &[],
        aliases: &[],
        section: Section::Command,
        examples: &[
            "lnk state -s rust -t cli",
            "lnk list --query \"$(lnk state -s rust -t cli)\"",
        ],
    },
    HelpTopic {
        name: "seed",
        summary: "Write a sample bookmarks file.",
        usage: "lnk seed [count] [--force]",
        details: &[
            "Writes up to six sample bookmarks to the active bookmarks path. Refuses to overwrite an existing file unless --force is given.",
        ],
        flags: &[HelpFlag {
            name: "--force",
            desc: "Overwrite an existing bookmarks file.",
        }],
        aliases: &[],
        section: Section::Command,
        examples: &["lnk seed", "lnk seed 3 --force"],
    },
    HelpTopic {
        name: "path",
        summary: "Show the bookmarks file path.",
        usage: "lnk path",
        details: &[],
        flags: &[],
        aliases: &[],
        section: Section::Command,
        examples: &["lnk path"],
    },
    HelpTopic {
        name: "completion",
        summary: "Print the zsh completion script with fzf-powered ids.",
        usage: "lnk completion zsh",
        details: &[],
        flags: &[],
        aliases: &[],
        section: Section::Command,
        examples: &["lnk completion zsh > ~/.zsh/completions/_lnk"],
    },
    HelpTopic {
        name: "help",
        summary: "Show this overview or a focused topic page.",
        usage: "lnk help [topic]",
        details: &[],
        flags: &[],
        aliases: &[],
        section: Section::Command,
        examples: &["lnk help open"],
    },
    HelpTopic {
        name: "LINK_DECK_FILE",
        summary: "Bookmarks document path (default ~/.link_deck/bookmarks.json).",
        usage: "LINK_DECK_FILE=/path/to/bookmarks.json",
        details: &[],
        flags: &[],
        aliases: &[],
        section: Section::Environment,
        examples: &[],
    },
    HelpTopic {
        name: "LINK_DECK_BROWSER",
        summary: "Command used by open (default xdg-open/open/explorer).",
        usage: "LINK_DECK_BROWSER=firefox",
        details: &[],
        flags: &[],
        aliases: &[],
        section: Section::Environment,
        examples: &[],
    },
    HelpTopic {
        name: "LINK_DECK_PINNED_TAGS",
        summary: "Comma-separated tags always shown by `tags`.",
        usage: "LINK_DECK_PINNED_TAGS='#reading,#daily'",
        details: &[],
        flags: &[],
        aliases: &[],
        section: Section::Environment,
        examples: &[],
    },
    HelpTopic {
        name: "LINK_DECK_NO_FZF",
        summary: "Disable fzf integration (pick, ambiguous open).",
        usage: "LINK_DECK_NO_FZF=1",
        details: &[],
        flags: &[],
        aliases: &[],
        section: Section::Environment,
        examples: &[],
    },
    HelpTopic {
        name: "filters",
        summary: "How search, tags, category, and section combine.",
        usage: "lnk guide filters",
        details: &[
            "Filters apply in order: category, then section, then tags, then free-text search. A bookmark must carry every selected tag; search is a case-insensitive substring match over title, description, URL, and tags.",
            "Section names only mean something inside a category, so -S without -c (or a category in the --query string) is an error, and a decoded query string drops an orphan section.",
        ],
        flags: FILTER_FLAGS,
        aliases: &[],
        section: Section::Guide,
        examples: &["lnk list -c Development -S Tools -s registry"],
    },
    HelpTopic {
        name: "views",
        summary: "Saving and sharing a view as a query string.",
        usage: "lnk guide views",
        details: &[
            "`lnk state` prints the canonical encoding of the active filters: q=<search>&tags=<a,b>&category=<c>&section=<s>, empty fields omitted, tags without the # prefix.",
            "The string survives in shell history, aliases, and notes; any listing command re-applies it with --query. Decoding is tolerant: unknown keys are ignored and a full URL can be pasted as-is.",
        ],
        flags: &[],
        aliases: &[],
        section: Section::Guide,
        examples: &[
            "alias worklinks='lnk grid --query \"category=Development&tags=work\"'",
        ],
    },
];
