use std::io::{self, BufRead, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use harf_cli::commands::convert_ops::{self, DictionarySource};
use harf_cli::commands::{dict_ops, settings_ops};
use harf_engine::TraceTarget;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Parser)]
#[command(name = "harftool", about = "Latin to Ottoman script transliteration")]
struct Cli {
    /// Settings TOML file (default: built-in settings)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct DictArgs {
    /// Word store file
    #[arg(long)]
    dict: Option<PathBuf>,
    /// JSON dictionary `{ "word": "script" }` (overrides --dict)
    #[arg(long)]
    json_dict: Option<PathBuf>,
}

impl DictArgs {
    fn source(&self) -> DictionarySource<'_> {
        DictionarySource {
            store: self.dict.as_deref(),
            json: self.json_dict.as_deref(),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Transliterate text (argument or stdin)
    Convert {
        /// Text to convert; reads stdin when omitted
        text: Option<String>,
        #[command(flatten)]
        dict: DictArgs,
    },
    /// Show how each token was resolved
    Explain {
        /// Text to explain
        text: String,
        #[command(flatten)]
        dict: DictArgs,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Treat each stdin line as a new edit of the same text (debounced)
    Live {
        #[command(flatten)]
        dict: DictArgs,
    },
    /// Manage the local word store
    Dict {
        /// Word store file (default: ~/.local/share/harf/words.hrfd)
        #[arg(long)]
        file: Option<PathBuf>,
        #[command(subcommand)]
        action: DictAction,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum DictAction {
    /// Add a word (kept if it already exists)
    Add {
        /// Latin word
        word: String,
        /// Ottoman script form
        script: String,
    },
    /// Remove a word
    Remove {
        /// Latin word
        word: String,
    },
    /// Exact lookup
    Get {
        /// Latin word
        word: String,
    },
    /// Prefix search (or substring search with --contains)
    Search {
        /// Query
        query: String,
        /// Match anywhere in the word
        #[arg(long)]
        contains: bool,
        /// Maximum number of results
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// List all words
    List,
    /// Merge a JSON `{ "word": "script" }` file into the store
    Import {
        /// JSON file
        json_file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    let settings = die!(
        settings_ops::load_settings(cli.settings.as_deref()),
        "Error loading settings: {}"
    );
    let trace_dir = std::env::var_os("HARF_TRACE_DIR").map(PathBuf::from);
    harf_engine::init_tracing(&settings.log, TraceTarget::from_dir(trace_dir.as_deref()));

    match cli.command {
        Command::Convert { text, dict } => {
            let client = die!(
                convert_ops::load_dictionary(dict.source(), &settings),
                "Error opening dictionary: {}"
            );
            let text = match text {
                Some(t) => t,
                None => {
                    let mut buf = String::new();
                    die!(io::stdin().read_to_string(&mut buf), "Error reading stdin: {}");
                    buf
                }
            };
            let result = convert_ops::convert_text(&text, client.as_ref());
            if result.degraded {
                eprintln!("warning: dictionary unavailable, used fallback for every word");
            }
            print!("{}", result.text());
            if !text.ends_with('\n') {
                println!();
            }
        }
        Command::Explain { text, dict, json } => {
            let client = die!(
                convert_ops::load_dictionary(dict.source(), &settings),
                "Error opening dictionary: {}"
            );
            let (rows, degraded) = convert_ops::explain(&text, client.as_ref());
            if json {
                let s = die!(serde_json::to_string_pretty(&rows), "Error: {}");
                println!("{s}");
            } else {
                print!("{}", convert_ops::format_explain(&rows));
            }
            if degraded {
                eprintln!("warning: dictionary unavailable, used fallback for every word");
            }
        }
        Command::Live { dict } => {
            let client = die!(
                convert_ops::load_dictionary(dict.source(), &settings),
                "Error opening dictionary: {}"
            );
            die!(
                convert_ops::live(
                    client,
                    &settings,
                    io::BufReader::new(io::stdin()).lines(),
                    io::stdout().lock(),
                ),
                "Error: {}"
            );
        }
        Command::Dict { file, action } => {
            let path = file.unwrap_or_else(|| PathBuf::from(dict_ops::default_store_path()));
            run_dict(&path, action);
        }
        Command::SettingsExport => print!("{}", settings_ops::settings_export()),
        Command::SettingsValidate { file } => {
            let msg = die!(settings_ops::settings_validate(&file), "Error: {}");
            println!("{msg}");
        }
    }
}

fn run_dict(path: &Path, action: DictAction) {
    match action {
        DictAction::Add { word, script } => {
            if die!(dict_ops::dict_add(path, &word, &script), "Error: {}") {
                println!("Added: {word} → {script}");
            } else {
                println!("Already exists: {word}");
            }
        }
        DictAction::Remove { word } => {
            if die!(dict_ops::dict_remove(path, &word), "Error: {}") {
                println!("Removed: {word}");
            } else {
                println!("Not found: {word}");
            }
        }
        DictAction::Get { word } => match die!(dict_ops::dict_get(path, &word), "Error: {}") {
            Some(script) => println!("{script}"),
            None => {
                eprintln!("Not found: {word}");
                process::exit(1);
            }
        },
        DictAction::Search {
            query,
            contains,
            limit,
        } => {
            let hits = die!(
                dict_ops::dict_search(path, &query, contains, limit),
                "Error: {}"
            );
            print!("{}", dict_ops::format_entries(&hits));
        }
        DictAction::List => {
            let entries = die!(dict_ops::dict_list(path), "Error: {}");
            print!("{}", dict_ops::format_entries(&entries));
        }
        DictAction::Import { json_file } => {
            let n = die!(dict_ops::dict_import(path, &json_file), "Error: {}");
            println!("Imported {n} words");
        }
    }
}
