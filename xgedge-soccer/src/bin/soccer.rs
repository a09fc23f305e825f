use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::bail;
use clap::{Parser, Subcommand};
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use xgedge::market::OverroundMethod;
use xgedge_soccer::domain::{ByOutcome, TeamAttributes};
use xgedge_soccer::league::Registry;
use xgedge_soccer::model::{Config, Model, Projection, MAX_GOALS_RANGE};
use xgedge_soccer::print;
use xgedge_soccer::strength::{AttackDefenceConfig, StrengthModel};

#[derive(Debug, Parser, Clone)]
struct Args {
    /// JSON file to source the league registry from
    #[clap(long)]
    leagues: Option<PathBuf>,

    /// rate teams by attack and defence rather than by a single strength
    #[clap(long)]
    attack_defence: bool,

    /// apply the league's low-score correction to the score grid
    #[clap(long)]
    dixon_coles: bool,

    /// goals spanned by the score grid for either side
    #[clap(long, default_value_t = 10)]
    max_goals: u8,

    /// de-margin market prices by the power method
    #[clap(long)]
    power: bool,

    #[clap(subcommand)]
    command: Command,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if !MAX_GOALS_RANGE.contains(&self.max_goals) {
            bail!("--max-goals must lie in {MAX_GOALS_RANGE:?}");
        }
        Ok(())
    }

    fn config(&self) -> Config {
        Config {
            strength: if self.attack_defence {
                StrengthModel::AttackDefence(AttackDefenceConfig::default())
            } else {
                StrengthModel::default()
            },
            max_goals: self.max_goals,
            dixon_coles: self.dixon_coles,
            overround_method: if self.power {
                OverroundMethod::Power
            } else {
                OverroundMethod::Multiplicative
            },
            ..Config::default()
        }
    }
}

#[derive(Debug, Subcommand, Clone)]
enum Command {
    /// list the registered leagues
    Leagues {
        /// write the registry to a JSON file
        #[clap(long)]
        export: Option<PathBuf>,
    },

    /// rate a single team
    Strength {
        /// league to rate the team in
        #[clap(short = 'l', long)]
        league: String,

        /// team attributes as xgf,xga,pitch,squad,manager
        #[clap(short = 't', long)]
        team: Team,
    },

    /// project the outcome of a match
    Project {
        #[clap(short = 'l', long)]
        league: String,

        /// home team attributes as xgf,xga,pitch,squad,manager
        #[clap(long)]
        home: Team,

        /// away team attributes as xgf,xga,pitch,squad,manager
        #[clap(long)]
        away: Team,

        /// number of most likely scores to print
        #[clap(long, default_value_t = 5)]
        top: usize,
    },

    /// compare a projection against head-to-head market prices
    Value {
        #[clap(short = 'l', long)]
        league: String,

        /// home team attributes as xgf,xga,pitch,squad,manager
        #[clap(long)]
        home: Team,

        /// away team attributes as xgf,xga,pitch,squad,manager
        #[clap(long)]
        away: Team,

        /// decimal prices as home,draw,away
        #[clap(short = 'p', long)]
        prices: Prices,
    },
}

#[derive(Debug, Clone)]
struct Team(TeamAttributes);

impl FromStr for Team {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = parse_floats::<5>(s)?;
        let [xg_for, xg_against, pitch_rank, squad_rating, manager_rating] = values;
        Ok(Team(TeamAttributes {
            xg_for,
            xg_against,
            pitch_rank,
            squad_rating,
            manager_rating,
        }))
    }
}

#[derive(Debug, Clone)]
struct Prices(ByOutcome<f64>);

impl FromStr for Prices {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Prices(ByOutcome::from(parse_floats::<3>(s)?)))
    }
}

fn parse_floats<const N: usize>(s: &str) -> Result<[f64; N], String> {
    let values = s
        .split(',')
        .map(|value| {
            value
                .trim()
                .parse::<f64>()
                .map_err(|err| format!("invalid number '{value}': {err}"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    values
        .try_into()
        .map_err(|values: Vec<f64>| format!("expected {N} comma-separated values, got {}", values.len()))
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let registry = match &args.leagues {
        Some(path) => Registry::read_json_file(path)?,
        None => Registry::builtin()?,
    };
    let model = Model::with_registry(args.config(), registry)?;

    match &args.command {
        Command::Leagues { export } => {
            let table = print::tabulate_leagues(model.registry().leagues());
            info!("leagues:\n{}", Console::default().render(&table));
            if let Some(path) = export {
                model.registry().write_json_file(path)?;
                info!("exported {} leagues to {}", model.registry().len(), path.display());
            }
        }
        Command::Strength { league, team } => {
            let strength = model.strength(&team.0, league)?;
            let table = print::tabulate_strengths(&[("team", strength)]);
            info!("strength in {league}:\n{}", Console::default().render(&table));
        }
        Command::Project {
            league,
            home,
            away,
            top,
        } => {
            let projection = model.project(&home.0, &away.0, league)?;
            print_projection(&projection, *top);
        }
        Command::Value {
            league,
            home,
            away,
            prices,
        } => {
            let report = model.value(&home.0, &away.0, league, &prices.0)?;
            print_projection(&report.projection, 0);
            let table = print::tabulate_value(&report);
            info!("value:\n{}", Console::default().render(&table));
            info!("recommendation: {}", report.recommendation);
        }
    }
    Ok(())
}

fn print_projection(projection: &Projection, top: usize) {
    let table = print::tabulate_strengths(&[
        ("home", projection.home_strength),
        ("away", projection.away_strength),
    ]);
    info!(
        "{} strengths:\n{}",
        projection.league.name,
        Console::default().render(&table)
    );
    if let Some(supremacy) = projection.supremacy {
        info!("supremacy: {supremacy:.4}");
    }

    let table = print::tabulate_projection(projection);
    info!("projection:\n{}", Console::default().render(&table));

    let table = print::tabulate_scoregrid(&projection.scoregrid);
    info!("correct score:\n{}", Console::default().render(&table));
    info!(
        "captured mass: {:.6}, over 2.5: {:.4}, both score: {:.4}",
        projection.total_mass(),
        projection.goals_over(2),
        projection.both_score()
    );

    if top > 0 {
        let table = print::tabulate_scores(&projection.most_likely_scores(top));
        info!("most likely scores:\n{}", Console::default().render(&table));
    }
}
