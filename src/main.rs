use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Arg, ArgMatches, Command};
use tokio::io::AsyncReadExt;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use gadaoromo::mt::{GoogleTranslateProvider, MachineTranslator, MockMode, MockTranslator};
use gadaoromo::{
    Direction, DirectionRequest, EntryId, ImportMode, ImportPayload, ImportRequest, Lexicon,
    LexiconConfig, MemoryLexiconStore, ResolveRequest, SearchAnalytics,
};

type CliResult<T> = Result<T, Box<dyn Error>>;

fn cli() -> Command {
    Command::new("gadaoromo")
        .version("0.1.0")
        .about("English ⇄ Afaan Oromo dictionary")
        .arg(
            Arg::new("data")
                .long("data")
                .short('d')
                .help("Directory holding lexicon.json and searches.json")
                .default_value("gadaoromo-data"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("JSON file overriding detector/suggest/import settings"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("resolve")
                .about("Translate a word or phrase")
                .arg(Arg::new("text").required(true).index(1))
                .arg(
                    Arg::new("direction")
                        .long("direction")
                        .short('D')
                        .help("om_en, en_om or auto")
                        .default_value("auto"),
                ),
        )
        .subcommand(
            Command::new("detect")
                .about("Guess the translation direction of a text")
                .arg(Arg::new("text").required(true).index(1)),
        )
        .subcommand(
            Command::new("suggest")
                .about("Show \"did you mean\" candidates")
                .arg(Arg::new("term").required(true).index(1))
                .arg(
                    Arg::new("direction")
                        .long("direction")
                        .short('D')
                        .help("om_en or en_om")
                        .default_value("en_om"),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Import a word list as pending entries")
                .arg(
                    Arg::new("file")
                        .help("One word (admin) or 'english<sep>oromo' (community) per line; '-' for stdin")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("mode")
                        .long("mode")
                        .help("community or admin")
                        .required(true),
                )
                .arg(
                    Arg::new("mock")
                        .long("mock")
                        .short('m')
                        .help("Use mock translator instead of Google Translate")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("submit")
                .about("Submit a new pair for review")
                .arg(Arg::new("english").required(true).index(1))
                .arg(Arg::new("oromo").required(true).index(2)),
        )
        .subcommand(Command::new("pending").about("List entries awaiting review"))
        .subcommand(
            Command::new("approve")
                .about("Approve a pending entry")
                .arg(Arg::new("id").required(true).index(1).value_parser(clap::value_parser!(u64))),
        )
        .subcommand(
            Command::new("reject")
                .about("Reject and delete a pending entry")
                .arg(Arg::new("id").required(true).index(1).value_parser(clap::value_parser!(u64))),
        )
        .subcommand(
            Command::new("trending")
                .about("Most searched queries")
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .short('n')
                        .default_value("10")
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
}

fn string_arg<'a>(matches: &'a ArgMatches, name: &str) -> CliResult<&'a str> {
    matches
        .get_one::<String>(name)
        .map(|s| s.as_str())
        .ok_or_else(|| format!("missing argument '{}'", name).into())
}

fn id_arg(matches: &ArgMatches) -> CliResult<EntryId> {
    matches
        .get_one::<u64>("id")
        .copied()
        .ok_or_else(|| "missing argument 'id'".into())
}

fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn read_lines(source: &str) -> CliResult<Vec<String>> {
    let content = if source == "-" {
        let mut buffer = String::new();
        tokio::io::stdin().read_to_string(&mut buffer).await.map(|_| buffer)
    } else {
        tokio::fs::read_to_string(source).await
    };
    match content {
        Ok(content) => Ok(content.lines().map(str::to_string).collect()),
        Err(e) => {
            error!("Failed to read import source '{}': {}", source, e);
            Err("could not read file".into())
        }
    }
}

fn translator(use_mock: bool) -> CliResult<Arc<dyn MachineTranslator>> {
    if use_mock {
        return Ok(Arc::new(MockTranslator::new(MockMode::Suffix)));
    }
    match GoogleTranslateProvider::from_env() {
        Ok(provider) => Ok(Arc::new(provider)),
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!("   Set it with: export GOOGLE_TRANSLATE_API_KEY=your_api_key");
            eprintln!("   Or use --mock to use mock translator");
            Err(e.into())
        }
    }
}

#[tokio::main]
async fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();

    let config = match matches.get_one::<String>("config") {
        Some(path) => LexiconConfig::from_file(Path::new(path))?,
        None => LexiconConfig::default(),
    };
    let data_dir = PathBuf::from(string_arg(&matches, "data")?);
    let store = Arc::new(MemoryLexiconStore::open(data_dir.join("lexicon.json"))?);
    let analytics = Arc::new(SearchAnalytics::open(data_dir.join("searches.json"))?);
    let mut lexicon = Lexicon::new(store.clone(), analytics.clone(), config);

    match matches.subcommand() {
        Some(("resolve", sub)) => {
            let request = ResolveRequest {
                text: string_arg(sub, "text")?.to_string(),
                direction: string_arg(sub, "direction")?.to_string(),
            };
            print_json(&lexicon.resolve(&request)?)?;
            analytics.save()?;
        }
        Some(("detect", sub)) => {
            println!("{}", lexicon.detect(string_arg(sub, "text")?));
        }
        Some(("suggest", sub)) => {
            let direction: Direction = match string_arg(sub, "direction")?.parse::<DirectionRequest>()? {
                DirectionRequest::Fixed(direction) => direction,
                DirectionRequest::Auto => return Err("suggest needs om_en or en_om".into()),
            };
            print_json(&lexicon.suggest(string_arg(sub, "term")?, direction))?;
        }
        Some(("import", sub)) => {
            let mode: ImportMode = string_arg(sub, "mode")?.parse()?;
            if mode == ImportMode::Admin {
                lexicon = lexicon.with_translator(translator(sub.get_flag("mock"))?);
            }
            let lines = read_lines(string_arg(sub, "file")?).await?;
            let request = ImportRequest {
                mode,
                payload: ImportPayload::Lines(lines),
            };
            let report = lexicon.import(&request).await?;
            store.save()?;
            print_json(&report)?;
        }
        Some(("submit", sub)) => {
            let entry = lexicon.submit(string_arg(sub, "english")?, string_arg(sub, "oromo")?)?;
            store.save()?;
            println!("Thank you! Submission #{} is waiting for approval.", entry.id);
        }
        Some(("pending", _)) => {
            for entry in lexicon.pending() {
                println!("{:>6}  {}  →  {}", entry.id, entry.english, entry.oromo);
            }
        }
        Some(("approve", sub)) => {
            let entry = lexicon.approve(id_arg(sub)?)?;
            store.save()?;
            info!("{} / {} is now live", entry.english, entry.oromo);
        }
        Some(("reject", sub)) => {
            let entry = lexicon.reject(id_arg(sub)?)?;
            store.save()?;
            info!("Removed {} / {}", entry.english, entry.oromo);
        }
        Some(("trending", sub)) => {
            let limit = sub.get_one::<usize>("limit").copied().unwrap_or(10);
            for count in lexicon.trending(limit) {
                println!(
                    "{:<30} today {:>4}  week {:>5}  total {:>6}",
                    count.query, count.today_count, count.week_count, count.total_count
                );
            }
        }
        _ => unreachable!("subcommand_required is set"),
    }

    Ok(())
}
