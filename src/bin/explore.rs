//! Tree Explorer Binary
//!
//! Builds a decision tree from a line of actions and prints it.
//!
//! ```text
//! explore --table 6max CO:open:2.5 BTN:call BB:call BB:check
//! ```
use clap::Parser;
use colored::Colorize;
use rangetree::betting::Action;
use rangetree::config::Config;
use rangetree::seating::Seat;
use rangetree::seating::Table;
use rangetree::tree::Snapshot;
use rangetree::tree::Tree;

#[derive(Parser)]
#[command(author, version, about = "Explore a betting tree one action at a time", long_about = None)]
struct Args {
    /// JSON configuration file.
    #[arg(long)]
    config: Option<std::path::PathBuf>,
    /// Table size: HU, 6max or 9max.
    #[arg(long)]
    table: Option<String>,
    /// Starting stack in big blinds.
    #[arg(long)]
    stack: Option<f32>,
    /// Snapshot to continue from.
    #[arg(long)]
    load: Option<std::path::PathBuf>,
    /// Where to write the finished tree.
    #[arg(long)]
    save: Option<std::path::PathBuf>,
    /// Print the snapshot as JSON instead of drawing the tree.
    #[arg(long)]
    json: bool,
    /// Log more; repeat for trace output.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Actions as SEAT:KIND[:BB], e.g. CO:open:2.5 BTN:call BB:allin.
    actions: Vec<String>,
}

impl Args {
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(table) = &self.table {
            config = config.with_table(Table::try_from(table.as_str())?);
        }
        if let Some(stack) = self.stack {
            config = config.with_stack(stack);
        }
        Ok(config)
    }
    fn level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

/// Splits `SEAT:KIND[:BB]`. An all-in without an amount takes the
/// seat's whole stack from the legal choices.
fn parse(tree: &Tree, token: &str) -> anyhow::Result<(Seat, Action)> {
    let mut parts = token.split(':');
    let seat = Seat::try_from(parts.next().unwrap_or_default())?;
    let kind = parts
        .next()
        .ok_or_else(|| anyhow::anyhow!("{} has no action", token))?;
    let bb = parts.next().map(str::parse::<f32>).transpose()?;
    match (kind.to_lowercase().as_str(), bb) {
        ("a" | "allin" | "all-in" | "shove", None) => tree
            .choices()
            .iter()
            .map(|choice| choice.action())
            .find(|action| matches!(action, Action::Shove(_)))
            .map(|action| (seat, action))
            .ok_or_else(|| anyhow::anyhow!("{} cannot go all-in", seat)),
        (kind, bb) => Ok((seat, Action::parse(kind, bb)?)),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    rangetree::log(args.level());
    let config = args.config()?;
    let mut tree = match &args.load {
        Some(path) => Tree::restore_for(&Snapshot::load(path)?, &config)?,
        None => Tree::new(config)?,
    };
    for token in args.actions.iter() {
        let (seat, action) = parse(&tree, token)?;
        match tree.select(seat, action) {
            Ok(index) => log::info!("{} {}", "→".green(), tree.node(index).id()),
            Err(e) => {
                log::error!("{} {}: {}", "✗".red(), token, e);
                break;
            }
        }
    }
    if let Some(path) = &args.save {
        tree.snapshot().save(path)?;
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&tree.snapshot())?);
        return Ok(());
    }
    println!("{}", tree);
    match tree.is_complete() {
        true => println!("{}", "hand complete".bold()),
        false => {
            let pending = tree
                .pending()
                .iter()
                .map(|seat| seat.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            println!("{} {}", "pending".bold(), pending.yellow());
            for choice in tree.choices() {
                println!("  {:<12} {}", choice.to_string().cyan(), choice.action().symbol());
            }
        }
    }
    Ok(())
}
