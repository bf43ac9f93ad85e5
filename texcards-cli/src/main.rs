// Command-line interface for texcards
//
// This binary turns LaTeX study notes into flashcards. Cards are the `cst*` environments
// of the document (cstdef, cstthm, ...): the environment body is the front, the text after
// it up to the next card is the back. Sections, subsections and subsubsections become
// nested decks.
//
// The inspect command is a development aid that shows how a document is split into scopes
// and card blocks, before and after rendering.
//
// Usage:
//  texcards <input.tex> [--to <format>] [-o <file>]         - Convert to cards (default)
//  texcards convert <input.tex> [--to <format>] [-o <file>] - Same as above (explicit)
//  texcards inspect <input.tex> [<transform>]               - Show scopes or cards (defaults to "scope-tree")
//  texcards render <fragment.tex>                           - Render one fragment to HTML
//  texcards --list-formats                                  - List output formats and transforms
//
// Configuration is read from the built-in defaults, then `texcards.toml` in the working
// directory, then the file given with --config. Command-line flags win over all of them.
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix. Keys it knows (deck, engine, media-dir,
// copy-media, title) override the configuration; the rest are passed to the output format.
// Example:
//  texcards notes.tex --to html --extra-title "Linear Algebra"

use texcards_cli::transforms;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use texcards_config::{Engine, Loader, TexCardsConfig};
use texcards_engine::media::{LinkResolver, MediaImporter};
use texcards_engine::{
    Converter, FormatRegistry, LegacyRewriter, Render, RenderedCard, ResourceResolver,
    RewriteChain,
};
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["convert", "inspect", "render", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = arg
            .strip_prefix("--extra-")
            .or_else(|| arg.strip_prefix("--extras-"));

        if let Some(key) = key_opt {
            // A following argument that is not itself a flag is the value
            let has_value = args.get(i + 1).is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("texcards")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Turn LaTeX study notes into flashcards")
        .long_about(
            "texcards reads a LaTeX document annotated with cst* card environments and\n\
            writes one flashcard per environment, with MathJax-ready HTML fronts and backs.\n\n\
            Commands:\n  \
            - convert: Write the cards as Anki import text, JSON, or an HTML preview\n  \
            - inspect: Show how the document is split into scopes and cards\n  \
            - render:  Render a single LaTeX fragment to card HTML\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            texcards notes.tex                          # Anki import text on stdout\n  \
            texcards notes.tex -o deck.txt              # Anki import text to a file\n  \
            texcards notes.tex --to html -o cards.html  # Preview page\n  \
            texcards inspect notes.tex                  # Scope tree with card counts",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats and inspect transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a texcards.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a LaTeX document into cards (default command)")
                .long_about(
                    "Extract every card of a LaTeX document and write them out.\n\n\
                    Output formats:\n  \
                    - tsv:  Anki text import (.txt, .tsv)\n  \
                    - json: Array of {name, front, back} (.json)\n  \
                    - html: Standalone preview page with MathJax (.html)\n\n\
                    The format is taken from --to, then from the extension of -o, then from\n\
                    the configuration. Output goes to stdout unless -o is given.\n\n\
                    Images are copied into the media directory and referenced by file name,\n\
                    unless media.copy is false in the configuration.\n\n\
                    Examples:\n  \
                    texcards convert notes.tex -o deck.txt          # Anki import file\n  \
                    texcards convert notes.tex --deck Algebra       # Nest decks under Algebra\n  \
                    texcards notes.tex --to json                    # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input LaTeX file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .short('t')
                        .help("Output format (tsv, json, html)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("deck")
                        .long("deck")
                        .value_name("NAME")
                        .help("Base deck every card is placed under"),
                )
                .arg(
                    Arg::new("media-dir")
                        .long("media-dir")
                        .value_name("DIR")
                        .help("Directory referenced images are copied to")
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("legacy")
                        .long("legacy")
                        .help("Render with the line-oriented legacy engine")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Show how a document is split into scopes and cards")
                .long_about(
                    "View the intermediate structure texcards reads from a document.\n\n\
                    Transforms:\n  \
                    - scope-tree:  Sections as an indented tree with card counts (default)\n  \
                    - scope-json:  Scope tree as JSON, including the text of each scope\n  \
                    - cards-raw:   Card blocks as extracted, LaTeX untouched\n  \
                    - cards-json:  Rendered cards as JSON\n\n\
                    Extra Parameters:\n  \
                    --extra-legacy        Render cards-json with the legacy engine\n  \
                    --extra-deck <NAME>   Base deck for cards-json",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the LaTeX file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply. Defaults to 'scope-tree'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Render a LaTeX fragment to card HTML")
                .long_about(
                    "Run a fragment through the rewrite chain and print the HTML.\n\n\
                    Images are linked in place, relative to the fragment's directory.\n\n\
                    Examples:\n  \
                    texcards render snippet.tex\n  \
                    texcards render snippet.tex --extra-legacy",
                )
                .arg(
                    Arg::new("file")
                        .help("Fragment to render")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A bare file as first argument means `convert`
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    init_logging(&config.log.level);

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            apply_convert_flags(&mut config, sub_matches);
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            let format = select_format(
                sub_matches.get_one::<String>("to").map(|s| s.as_str()),
                output,
                &config,
            );
            handle_convert_command(input, &format, output, &extra_params, &config);
        }
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or(transforms::DEFAULT_TRANSFORM);
            handle_inspect_command(path, transform, &extra_params, &config);
        }
        Some(("render", sub_matches)) => {
            let file = sub_matches
                .get_one::<String>("file")
                .expect("file is required");
            handle_render_command(file, &extra_params, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    format: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &TexCardsConfig,
) {
    let registry = FormatRegistry::default();
    if let Err(e) = registry.get(format) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = read_input(input);
    let base_dir = base_dir_of(input);

    let cards = if config.media.copy {
        let mut importer = MediaImporter::new(base_dir, &config.media.dir);
        let cards = convert_with_engine(&source, config, &mut importer);
        tracing::info!(
            images = importer.imported().count(),
            dir = %importer.media_dir().display(),
            "imported media"
        );
        cards
    } else {
        convert_with_engine(&source, config, &mut LinkResolver::new(base_dir))
    };
    tracing::info!(cards = cards.len(), format, "converted document");

    let options = format_options(format, extra_params, config);
    let data = registry
        .serialize_with_options(&cards, format, &options)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });

    match output {
        Some(path) => {
            fs::write(path, data).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{data}"),
    }
}

/// Handle the inspect command
fn handle_inspect_command(
    path: &str,
    transform: &str,
    extra_params: &HashMap<String, String>,
    config: &TexCardsConfig,
) {
    let source = read_input(path);
    let params = build_inspect_params(config, extra_params);

    let output = transforms::execute_transform(&source, transform, &params).unwrap_or_else(|e| {
        eprintln!("Execution error: {e}");
        std::process::exit(1);
    });

    print!("{output}");
}

/// Handle the render command
fn handle_render_command(
    file: &str,
    extra_params: &HashMap<String, String>,
    config: &TexCardsConfig,
) {
    let source = read_input(file);
    let mut resolver = LinkResolver::new(base_dir_of(file));
    let legacy = match extra_params.get("legacy") {
        Some(raw) => parse_bool_arg("legacy", raw),
        None => config.convert.engine == Engine::Legacy,
    };

    let html = if legacy {
        LegacyRewriter::new().render(&source, &mut resolver)
    } else {
        RewriteChain::standard().render(&source, &mut resolver)
    };
    println!("{html}");
}

fn handle_list_formats_command() {
    println!("Output formats:");
    let registry = FormatRegistry::default();
    for format_name in registry.list_formats() {
        let description = registry
            .get(&format_name)
            .map(|format| format.description().to_string())
            .unwrap_or_default();
        println!("  {format_name:<6} - {description}");
    }

    println!("\nInspect transforms:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }
}

fn read_input(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

/// Directory relative image paths are resolved against.
fn base_dir_of(input: &str) -> PathBuf {
    match Path::new(input).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn convert_with_engine(
    source: &str,
    config: &TexCardsConfig,
    resolver: &mut dyn ResourceResolver,
) -> Vec<RenderedCard> {
    match config.convert.engine {
        Engine::Chain => Converter::new()
            .with_base_deck(config.deck.base.as_str())
            .convert_to_vec(source, resolver),
        Engine::Legacy => Converter::with_renderer(LegacyRewriter::new())
            .with_base_deck(config.deck.base.as_str())
            .convert_to_vec(source, resolver),
    }
}

/// `--to` first, then the output file's extension, then the configured default.
fn select_format(to: Option<&str>, output: Option<&str>, config: &TexCardsConfig) -> String {
    if let Some(to) = to {
        return to.to_string();
    }
    let registry = FormatRegistry::default();
    output
        .and_then(|path| registry.detect_format_from_filename(path))
        .unwrap_or_else(|| config.convert.format.clone())
}

fn format_options(
    format: &str,
    extra_params: &HashMap<String, String>,
    config: &TexCardsConfig,
) -> HashMap<String, String> {
    let mut options = HashMap::new();
    if format == "html" {
        options.insert("title".to_string(), config.output.html.title.clone());
    }
    for (key, value) in extra_params {
        options.insert(key.clone(), value.clone());
    }
    options
}

fn load_cli_config(explicit_path: Option<&str>) -> TexCardsConfig {
    let loader = Loader::new().with_optional_file("texcards.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Consume the extra parameters that map onto configuration keys.
fn apply_config_overrides(config: &mut TexCardsConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(deck) = take_override(extra_params, &["deck", "base-deck"]) {
        config.deck.base = deck;
    }
    if let Some(raw) = extra_params.remove("engine") {
        config.convert.engine = parse_engine(&raw);
    }
    if let Some(dir) = extra_params.remove("media-dir") {
        config.media.dir = dir;
    }
    if let Some(raw) = take_override(extra_params, &["copy-media", "media-copy"]) {
        config.media.copy = parse_bool_arg("copy-media", &raw);
    }
    if let Some(title) = extra_params.remove("title") {
        config.output.html.title = title;
    }
    if let Some(level) = take_override(extra_params, &["log", "log-level"]) {
        config.log.level = level;
    }
}

fn apply_convert_flags(config: &mut TexCardsConfig, matches: &ArgMatches) {
    if let Some(deck) = matches.get_one::<String>("deck") {
        config.deck.base = deck.clone();
    }
    if let Some(dir) = matches.get_one::<String>("media-dir") {
        config.media.dir = dir.clone();
    }
    if matches.get_flag("legacy") {
        config.convert.engine = Engine::Legacy;
    }
}

fn build_inspect_params(
    config: &TexCardsConfig,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut params = HashMap::new();

    if !config.deck.base.is_empty() {
        params.insert("deck".to_string(), config.deck.base.clone());
    }
    if config.convert.engine == Engine::Legacy {
        params.insert("legacy".to_string(), "true".to_string());
    }

    for (key, value) in overrides {
        params.insert(key.clone(), value.clone());
    }

    params
}

/// Log to stderr; `RUST_LOG` wins over the configured level.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_engine(raw: &str) -> Engine {
    match raw.to_lowercase().as_str() {
        "chain" => Engine::Chain,
        "legacy" => Engine::Legacy,
        other => {
            eprintln!("Invalid engine '{other}' for --extra-engine (expected chain or legacy)");
            std::process::exit(1);
        }
    }
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use texcards_config::load_defaults;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_extra_args_empty() {
        let input = args(&["texcards", "inspect", "notes.tex"]);
        let (cleaned, extra) = parse_extra_args(&input);

        assert_eq!(cleaned, input);
        assert!(extra.is_empty());
    }

    #[test]
    fn test_parse_extra_args_with_value() {
        let input = args(&["texcards", "notes.tex", "--extra-title", "Algebra", "--to", "html"]);
        let (cleaned, extra) = parse_extra_args(&input);

        assert_eq!(cleaned, args(&["texcards", "notes.tex", "--to", "html"]));
        assert_eq!(extra.get("title"), Some(&"Algebra".to_string()));
    }

    #[test]
    fn test_parse_extra_args_boolean_flag() {
        let input = args(&["texcards", "render", "a.tex", "--extra-legacy"]);
        let (cleaned, extra) = parse_extra_args(&input);

        assert_eq!(cleaned, args(&["texcards", "render", "a.tex"]));
        assert_eq!(extra.get("legacy"), Some(&"true".to_string()));
    }

    #[test]
    fn test_parse_extra_args_flag_before_flag() {
        let input = args(&["texcards", "a.tex", "--extras-legacy", "--to", "json"]);
        let (cleaned, extra) = parse_extra_args(&input);

        assert_eq!(cleaned, args(&["texcards", "a.tex", "--to", "json"]));
        assert_eq!(extra.get("legacy"), Some(&"true".to_string()));
    }

    #[test]
    fn test_cli_parses_convert_flags() {
        let matches = build_cli()
            .try_get_matches_from([
                "texcards", "convert", "a.tex", "--to", "json", "--deck", "Alg", "--legacy",
            ])
            .expect("arguments to parse");
        let (name, sub) = matches.subcommand().expect("subcommand");
        assert_eq!(name, "convert");

        let mut config = load_defaults().expect("defaults");
        apply_convert_flags(&mut config, sub);
        assert_eq!(config.deck.base, "Alg");
        assert_eq!(config.convert.engine, Engine::Legacy);
        assert_eq!(config.media.dir, "media");
    }

    #[test]
    fn test_cli_rejects_unknown_transform() {
        let result =
            build_cli().try_get_matches_from(["texcards", "inspect", "a.tex", "ast-tag"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_select_format_precedence() {
        let config = load_defaults().expect("defaults");

        assert_eq!(select_format(Some("json"), Some("out.html"), &config), "json");
        assert_eq!(select_format(None, Some("out.html"), &config), "html");
        assert_eq!(select_format(None, Some("out.apkg"), &config), "tsv");
        assert_eq!(select_format(None, None, &config), "tsv");
    }

    #[test]
    fn test_config_overrides_consume_known_keys() {
        let mut config = load_defaults().expect("defaults");
        let mut extra = HashMap::new();
        extra.insert("deck".to_string(), "Topology".to_string());
        extra.insert("engine".to_string(), "legacy".to_string());
        extra.insert("copy-media".to_string(), "no".to_string());
        extra.insert("title".to_string(), "Spaces".to_string());
        extra.insert("custom".to_string(), "kept".to_string());

        apply_config_overrides(&mut config, &mut extra);

        assert_eq!(config.deck.base, "Topology");
        assert_eq!(config.convert.engine, Engine::Legacy);
        assert!(!config.media.copy);
        assert_eq!(config.output.html.title, "Spaces");
        assert_eq!(extra.len(), 1);
        assert_eq!(extra.get("custom"), Some(&"kept".to_string()));
    }

    #[test]
    fn test_format_options_only_title_for_html() {
        let config = load_defaults().expect("defaults");
        let extra = HashMap::new();

        let html = format_options("html", &extra, &config);
        assert_eq!(html.get("title"), Some(&"Flashcards".to_string()));
        assert!(format_options("tsv", &extra, &config).is_empty());
    }

    #[test]
    fn test_inspect_params_reflect_config() {
        let mut config = load_defaults().expect("defaults");
        assert!(build_inspect_params(&config, &HashMap::new()).is_empty());

        config.deck.base = "Alg".to_string();
        config.convert.engine = Engine::Legacy;
        let params = build_inspect_params(&config, &HashMap::new());
        assert_eq!(params.get("deck"), Some(&"Alg".to_string()));
        assert_eq!(params.get("legacy"), Some(&"true".to_string()));
    }

    #[test]
    fn test_base_dir_of() {
        assert_eq!(base_dir_of("notes.tex"), PathBuf::from("."));
        assert_eq!(base_dir_of("course/notes.tex"), PathBuf::from("course"));
    }
}
