//! Kaime CLI - score race entries and generate betting tickets

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use serde_json::Value;
use std::path::{Path, PathBuf};

use kaime::core::ScoringVariant;
use kaime::models::{Entry, PredictRequest, PredictResponse, ScoreRequest};
use kaime::persist::{race_file_name, save_json};
use kaime::pipeline;
use kaime::tickets::{BetType, WagerFormat};

const DEFAULT_POINTS: usize = 5;

#[derive(Parser)]
#[command(name = "kaime")]
#[command(author, version, about = "Boat race scoring and ticket CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Run in interactive mode
    #[arg(short, long)]
    interactive: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum VariantArg {
    /// Program data only
    Pre,
    /// Program, exhibition and weather data
    Near,
}

impl From<VariantArg> for ScoringVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Pre => ScoringVariant::PreRace,
            VariantArg::Near => ScoringVariant::NearStart,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Score the entries of a race file
    Score {
        /// Race JSON file (entries plus place / distance / type / weather)
        #[arg(short, long)]
        input: PathBuf,

        /// Scoring variant (default: decided from the file's start time)
        #[arg(long, value_enum)]
        variant: Option<VariantArg>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Generate tickets for a race file
    Tickets {
        /// Race JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Bet type: 単勝 / 複勝 / 2連単 / 2連複 / 3連単 / 3連複
        #[arg(short, long)]
        bet_type: String,

        /// Method, e.g. 通常 / 1軸流し / 2軸流し / ボックス / 3艇ボックス
        #[arg(short, long, default_value = "通常")]
        method: String,

        /// Point budget
        #[arg(short, long, default_value_t = DEFAULT_POINTS)]
        points: usize,

        /// Draw 1軸流し rivals by score weight with this seed
        #[arg(long)]
        seed: Option<u64>,

        /// Scoring variant (default: decided from the file's start time)
        #[arg(long, value_enum)]
        variant: Option<VariantArg>,

        /// Save the full result as race_detail_*.json in this directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List supported bet types and methods
    Formats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.interactive {
        print_banner();
        run_interactive()?;
    } else if let Some(command) = cli.command {
        match command {
            Commands::Score {
                input,
                variant,
                json,
            } => {
                if !json {
                    print_banner();
                }
                score_file(&input, variant.map(Into::into), json)?;
            }
            Commands::Tickets {
                input,
                bet_type,
                method,
                points,
                seed,
                variant,
                output,
                json,
            } => {
                if !json {
                    print_banner();
                }
                let options = TicketOptions {
                    bet_type,
                    method,
                    points,
                    seed,
                    variant: variant.map(Into::into),
                };
                tickets_for_file(&input, &options, output.as_deref(), json)?;
            }
            Commands::Formats => {
                print_banner();
                list_formats();
            }
        }
    } else {
        print_banner();
        println!("Use --help for usage information or --interactive for interactive mode.");
    }

    Ok(())
}

fn print_banner() {
    println!(
        "{}",
        format!("Kaime CLI v{}", env!("CARGO_PKG_VERSION")).cyan().bold()
    );
    println!();
}

struct TicketOptions {
    bet_type: String,
    method: String,
    points: usize,
    seed: Option<u64>,
    variant: Option<ScoringVariant>,
}

fn read_race_file(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let value: Value =
        serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {:?}", path))?;

    if !value.get("entries").map(Value::is_array).unwrap_or(false) {
        bail!("{:?} has no \"entries\" array", path);
    }
    Ok(value)
}

fn score_file(path: &Path, variant: Option<ScoringVariant>, json: bool) -> Result<()> {
    let race: ScoreRequest = serde_json::from_value(read_race_file(path)?)
        .with_context(|| format!("Failed to parse race entries from {:?}", path))?;

    let now = chrono::Local::now().naive_local();
    let (variant, entries) = pipeline::score_race(
        race.entries,
        &race.context,
        variant.or(race.variant),
        race.time.as_deref(),
        now,
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!(
        "{}: {} / {} / {} (mode {})",
        "Scoring".green(),
        race.context.place.as_deref().unwrap_or("-"),
        race.context.distance.as_deref().unwrap_or("-"),
        race.context.race_type.as_deref().unwrap_or("-"),
        variant.mode()
    );
    println!();
    print_entries(&entries);

    Ok(())
}

fn tickets_for_file(path: &Path, options: &TicketOptions, output: Option<&Path>, json: bool) -> Result<()> {
    let mut race = read_race_file(path)?;
    if let Some(obj) = race.as_object_mut() {
        obj.insert("betType".to_string(), Value::from(options.bet_type.clone()));
        obj.insert("method".to_string(), Value::from(options.method.clone()));
    }

    let mut req: PredictRequest = serde_json::from_value(race)
        .with_context(|| format!("Failed to parse race entries from {:?}", path))?;
    if options.variant.is_some() {
        req.variant = options.variant;
    }
    if options.seed.is_some() {
        req.seed = options.seed;
    }

    if options.points == 0 {
        bail!("--points must be at least 1");
    }

    let now = chrono::Local::now().naive_local();
    let response = pipeline::predict(req, options.points, now)?;

    if let Some(dir) = output {
        let name = race_file_name(response.context.place.as_deref(), response.race.as_ref(), now.date());
        let saved = save_json(dir, &name, &response)
            .with_context(|| format!("Failed to save {} in {:?}", name, dir))?;
        if !json {
            println!("{}: {:?}", "Saved".green(), saved);
            println!();
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_prediction(&response);
    }

    Ok(())
}

fn list_formats() {
    println!("{}", "対応券種 (Supported formats):".yellow().bold());
    for bet_type in BetType::ALL {
        let methods: Vec<&str> = WagerFormat::all()
            .iter()
            .filter(|f| f.bet_type() == bet_type)
            .map(|f| f.method_label())
            .collect();
        println!("  {:<6} {}", bet_type.label(), methods.join(" / "));
    }
}

fn print_entries(entries: &[Entry]) {
    println!("{}", "指数 (Scores):".yellow().bold());
    println!(
        "{:>4} {:<12} {:>4} {:>7} {:>6} {:>6} {:>6} {:>6}",
        "艇番", "選手名", "級", "指数", "基本", "展示", "補正", "気象"
    );
    println!("{}", "-".repeat(62));

    let best = entries
        .iter()
        .map(Entry::score_or_zero)
        .fold(f64::NEG_INFINITY, f64::max);

    for entry in entries {
        let name = entry
            .extra
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("-");
        let breakdown = entry.score_breakdown.clone().unwrap_or_default();
        let score = format!("{:>7.1}", entry.score_or_zero());
        let score = if entry.score_or_zero() >= best {
            score.green().bold()
        } else {
            score.normal()
        };

        println!(
            "{:>4} {:<12} {:>4} {} {:>6.1} {:>6} {:>6.3} {:>6}",
            entry.lane,
            truncate_name(name, 12),
            entry.klass.as_deref().unwrap_or("-"),
            score,
            breakdown.base,
            breakdown
                .exhibit
                .map(|x| format!("{:.1}", x))
                .unwrap_or_else(|| "-".to_string()),
            breakdown.context_mult,
            breakdown
                .weather_mult
                .map(|x| format!("{:.3}", x))
                .unwrap_or_else(|| "-".to_string()),
        );
    }
    println!();
}

fn print_prediction(response: &PredictResponse) {
    print_entries(&response.entries);

    println!(
        "{} {} {} ({}点, mode {})",
        "買い目:".yellow().bold(),
        response.bet_type,
        response.method,
        response.points,
        response.mode
    );

    let tickets = &response.tickets;
    if tickets.is_empty() {
        println!("  {}", tickets.note.red());
    } else {
        println!("  {}: {}", "Formation".cyan(), tickets.formation);
        for (i, ticket) in tickets.tickets.iter().enumerate() {
            println!("  {:>3}. {}", i + 1, ticket.green());
        }
        println!("  {}", tickets.note.dimmed());
    }
    println!();

    if !response.reference_picks.is_empty() {
        println!("{}", "参考 3連単 (Reference picks):".yellow().bold());
        println!("  {}", response.reference_picks.join("  "));
        println!();
    }
}

fn run_interactive() -> Result<()> {
    println!("{}", "Interactive mode".green().bold());
    println!("Choose Quit to exit.\n");

    let theme = ColorfulTheme::default();

    loop {
        let options = vec!["Score a race", "Generate tickets", "List formats", "Quit"];

        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(&options)
            .default(1)
            .interact()?;

        match selection {
            0 => {
                let input: String = Input::with_theme(&theme)
                    .with_prompt("Race JSON file")
                    .interact_text()?;
                let variant = prompt_variant(&theme)?;

                println!();
                if let Err(e) = score_file(Path::new(input.trim()), variant, false) {
                    println!("{}: {:#}", "Error".red(), e);
                }
                println!();
            }
            1 => {
                let input: String = Input::with_theme(&theme)
                    .with_prompt("Race JSON file")
                    .interact_text()?;

                let bet_labels: Vec<&str> = BetType::ALL.iter().map(|b| b.label()).collect();
                let bet_idx = Select::with_theme(&theme)
                    .with_prompt("Bet type")
                    .items(&bet_labels)
                    .default(4)
                    .interact()?;
                let bet_type = BetType::ALL[bet_idx];

                let methods: Vec<&str> = WagerFormat::all()
                    .iter()
                    .filter(|f| f.bet_type() == bet_type)
                    .map(|f| f.method_label())
                    .collect();
                let method_idx = Select::with_theme(&theme)
                    .with_prompt("Method")
                    .items(&methods)
                    .default(0)
                    .interact()?;

                let points: usize = Input::with_theme(&theme)
                    .with_prompt("Points")
                    .default(DEFAULT_POINTS)
                    .interact_text()?;
                let variant = prompt_variant(&theme)?;

                let options = TicketOptions {
                    bet_type: bet_type.label().to_string(),
                    method: methods[method_idx].to_string(),
                    points,
                    seed: None,
                    variant,
                };

                println!();
                if let Err(e) = tickets_for_file(Path::new(input.trim()), &options, None, false) {
                    println!("{}: {:#}", "Error".red(), e);
                }
                println!();
            }
            2 => {
                println!();
                list_formats();
                println!();
            }
            3 => {
                println!("Goodbye!");
                break;
            }
            _ => {}
        }
    }

    Ok(())
}

fn prompt_variant(theme: &ColorfulTheme) -> Result<Option<ScoringVariant>> {
    let choice = Select::with_theme(theme)
        .with_prompt("Scoring variant")
        .items(&["Auto (start time)", "Pre-race (A)", "Near start (B)"])
        .default(0)
        .interact()?;

    Ok(match choice {
        1 => Some(ScoringVariant::PreRace),
        2 => Some(ScoringVariant::NearStart),
        _ => None,
    })
}

/// Truncate name to fit display width
fn truncate_name(name: &str, max_len: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_len {
        name.to_string()
    } else {
        chars[..max_len - 1].iter().collect::<String>() + "…"
    }
}
