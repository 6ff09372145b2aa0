//! Pass statistics CLI
//!
//! Fetches a match from StatsBomb open data and prints pass graphs, pass
//! networks, playing time and repeating pass patterns for one team.

use clap::{Args, Parser, Subcommand};
use passnet::{Config, Result};

#[derive(Parser)]
#[command(name = "passnet")]
#[command(about = "Football pass statistics from StatsBomb event data", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "passnet.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Use only cached feed files (no network requests)
    #[arg(long)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Match and team selection shared by the per-team commands
#[derive(Args)]
struct TeamArgs {
    /// StatsBomb match id
    match_id: u64,
    /// Team name (case-insensitive)
    team: String,
    /// Output format
    #[arg(long, default_value = "table")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init,
    /// Download a match into the cache
    Fetch {
        match_id: u64,
    },
    /// Print the encoded pass/shot sequence of a team
    Sequence(TeamArgs),
    /// Find repeated pass patterns
    Patterns {
        #[command(flatten)]
        team: TeamArgs,
        /// Override the shortest pattern length
        #[arg(long)]
        min_len: Option<usize>,
        /// Override the longest pattern length
        #[arg(long)]
        max_len: Option<usize>,
    },
    /// Passing runs from a lost ball to a shot
    Buildups {
        #[command(flatten)]
        team: TeamArgs,
        /// Override the minimum buildup length
        #[arg(long)]
        min_length: Option<usize>,
    },
    /// Pass graphs for successful and unsuccessful passes
    Graph(TeamArgs),
    /// Pass network with average positions
    Network {
        #[command(flatten)]
        team: TeamArgs,
        /// Mirror the pitch for a team attacking right to left
        #[arg(long)]
        mirror: bool,
    },
    /// Estimated minutes played
    Playtime(TeamArgs),
    /// Completed pass lengths per player
    PassLengths(TeamArgs),
    /// Pass report for a single player
    Player {
        match_id: u64,
        /// Full player name as in the lineup
        player: String,
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use table, json, or csv.", s)),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let mut config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };
    if cli.offline {
        config.feed.offline = true;
    }

    let result = match cli.command {
        Commands::Init => commands::init(&cli.config),
        Commands::Fetch { match_id } => commands::fetch(&config, match_id),
        Commands::Sequence(args) => commands::sequence(&config, &args),
        Commands::Patterns {
            team,
            min_len,
            max_len,
        } => commands::patterns(&config, &team, min_len, max_len),
        Commands::Buildups { team, min_length } => commands::buildups(&config, &team, min_length),
        Commands::Graph(args) => commands::graph(&config, &args),
        Commands::Network { team, mirror } => commands::network(&config, &team, mirror),
        Commands::Playtime(args) => commands::playtime(&config, &args),
        Commands::PassLengths(args) => commands::pass_lengths(&config, &args),
        Commands::Player {
            match_id,
            player,
            format,
        } => commands::player(&config, match_id, &player, format),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use passnet::analysis::{self, network::PITCH_LENGTH, PatternConfig, Sequence};
    use passnet::data::{EventFeed, MatchData, StatsBombFeed};
    use passnet::report;

    fn print_json(value: &impl serde::Serialize) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    fn load_match(config: &Config, match_id: u64) -> Result<MatchData> {
        StatsBombFeed::from_config(&config.feed)?.fetch_match(match_id)
    }

    /// Fetch the match and resolve the team name as the feed spells it
    fn load_team(config: &Config, args: &TeamArgs) -> Result<(MatchData, String)> {
        let data = load_match(config, args.match_id)?;
        let team = data.resolve_team(&args.team).map_err(|e| {
            log::error!("Teams in match {}: {}", data.match_id, data.team_names().join(", "));
            e
        })?;
        Ok((data, team))
    }

    fn load_sequence(config: &Config, args: &TeamArgs) -> Result<Sequence> {
        let (data, team) = load_team(config, args)?;
        let jerseys = data.jerseys(&team)?;
        analysis::encode(&data.events, &team, &jerseys)
    }

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        println!("\nNext steps:");
        println!("  1. Edit {} to customize settings", config_path);
        println!("  2. Run 'passnet fetch <MATCH_ID>' to download a match");
        println!("  3. Run 'passnet patterns <MATCH_ID> <TEAM>' to find pass patterns");

        Ok(())
    }

    pub fn fetch(config: &Config, match_id: u64) -> Result<()> {
        let data = load_match(config, match_id)?;
        println!("Match {}", match_id);
        println!("───────────────────────────────");
        println!("  Events:  {}", data.events.len());
        for lineup in &data.lineups {
            println!("  {:<30} {} players", lineup.team, lineup.players.len());
        }
        Ok(())
    }

    pub fn sequence(config: &Config, args: &TeamArgs) -> Result<()> {
        let seq = load_sequence(config, args)?;
        let codes = seq.to_codes(&config.tokens);

        match args.format {
            OutputFormat::Table => {
                println!("{} tokens", seq.len());
                println!("{}", report::tokens_to_string(seq.tokens(), &config.tokens));
            }
            OutputFormat::Json => print_json(&codes)?,
            OutputFormat::Csv => {
                println!("position,token");
                for (i, code) in codes.iter().enumerate() {
                    println!("{},{}", i, code);
                }
            }
        }
        Ok(())
    }

    pub fn patterns(
        config: &Config,
        args: &TeamArgs,
        min_len: Option<usize>,
        max_len: Option<usize>,
    ) -> Result<()> {
        let pattern_config = PatternConfig {
            min_len: min_len.unwrap_or(config.patterns.min_len),
            max_len: max_len.unwrap_or(config.patterns.max_len),
            ..config.patterns.clone()
        };
        pattern_config.validate()?;

        let seq = load_sequence(config, args)?;
        let found = analysis::find_patterns(seq.tokens(), &pattern_config);
        log::info!("Found repeated patterns at {} lengths", found.len());

        match args.format {
            OutputFormat::Table => print!("{}", report::patterns_table(&found, &config.tokens)),
            OutputFormat::Json => print_json(&report::patterns_json(&found, &config.tokens))?,
            OutputFormat::Csv => print!("{}", report::patterns_csv(&found, &config.tokens)),
        }
        Ok(())
    }

    pub fn buildups(config: &Config, args: &TeamArgs, min_length: Option<usize>) -> Result<()> {
        let min_length = min_length.unwrap_or(config.buildup.min_length);
        let seq = load_sequence(config, args)?;
        let found = analysis::extract_shot_buildups(seq.tokens(), min_length);
        log::info!(
            "{} buildups longer than {}, {} ending in a goal",
            found.len(),
            min_length,
            analysis::buildup::scoring_buildups(&found).count()
        );

        match args.format {
            OutputFormat::Table => print!("{}", report::buildups_table(&found, &config.tokens)),
            OutputFormat::Json => print_json(&report::buildups_json(&found, &config.tokens))?,
            OutputFormat::Csv => {
                println!("buildup,length,tokens");
                for (i, b) in found.iter().enumerate() {
                    println!("{},{},{}", i + 1, b.len(), report::tokens_to_string(b, &config.tokens));
                }
            }
        }
        Ok(())
    }

    pub fn graph(config: &Config, args: &TeamArgs) -> Result<()> {
        let (data, team) = load_team(config, args)?;
        let jerseys = data.jerseys(&team)?;
        let (good, bad) = analysis::pass_graphs(&data.events, &team, &jerseys)?;

        match args.format {
            OutputFormat::Table => {
                print!("{}", report::graph_table("Successful", &good, &jerseys));
                println!();
                print!("{}", report::graph_table("Unsuccessful", &bad, &jerseys));
            }
            OutputFormat::Json => print_json(&serde_json::json!({
                "successful": report::graph_json(&good),
                "unsuccessful": report::graph_json(&bad),
            }))?,
            OutputFormat::Csv => {
                println!("graph,from,to,passes");
                print!("{}", report::graph_csv("successful", &good));
                print!("{}", report::graph_csv("unsuccessful", &bad));
            }
        }
        Ok(())
    }

    pub fn network(config: &Config, args: &TeamArgs, mirror: bool) -> Result<()> {
        let (data, team) = load_team(config, args)?;
        let mut network = analysis::pass_network(&data.events, &team)?;
        if mirror {
            network = network.mirrored(PITCH_LENGTH);
        }

        match args.format {
            OutputFormat::Table => print!("{}", report::network_table(&network)),
            OutputFormat::Json => print_json(&network)?,
            OutputFormat::Csv => print!("{}", report::network_csv(&network)),
        }
        Ok(())
    }

    pub fn playtime(config: &Config, args: &TeamArgs) -> Result<()> {
        let (data, team) = load_team(config, args)?;
        let played = analysis::seconds_played(&data.events, &team, &config.playtime)?;

        match args.format {
            OutputFormat::Table => print!("{}", report::playtime_table(&played)),
            OutputFormat::Json => print_json(&played)?,
            OutputFormat::Csv => print!("{}", report::playtime_csv(&played)),
        }
        Ok(())
    }

    pub fn pass_lengths(config: &Config, args: &TeamArgs) -> Result<()> {
        let (data, team) = load_team(config, args)?;
        let lengths = analysis::pass_lengths(&data.events, &team);

        match args.format {
            OutputFormat::Table => print!("{}", report::pass_lengths_table(&lengths)),
            OutputFormat::Json => print_json(&lengths)?,
            OutputFormat::Csv => print!("{}", report::pass_lengths_csv(&lengths)),
        }
        Ok(())
    }

    pub fn player(config: &Config, match_id: u64, player: &str, format: OutputFormat) -> Result<()> {
        let data = load_match(config, match_id)?;
        let passes = analysis::player_passes(&data.events, player);
        if passes.passes.is_empty() {
            log::warn!("No passes found for {}", player);
        }

        match format {
            OutputFormat::Table => print!("{}", report::player_table(&passes)),
            OutputFormat::Json => print_json(&passes)?,
            OutputFormat::Csv => print!("{}", report::player_csv(&passes)),
        }
        Ok(())
    }
}
