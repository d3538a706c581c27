mod display;
mod fetch;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use swertres_core::frequency::analyze;
use swertres_core::models::{Constraint, Draw, DIGIT_SUM_MAX, DRAW_LEN};
use swertres_core::sampler::generate;

use crate::display::{
    display_frequencies, display_history, display_hot_cold, display_predictions,
};
use crate::fetch::{fetch_history, make_agent, FetchResult};

const DEFAULT_START_DATE: &str = "2025-05-01";

#[derive(Parser)]
#[command(name = "swertres", about = "Générateur de combinaisons Swertres (STL Swer3)")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Générer des combinaisons à partir de l'historique des tirages
    Predict {
        /// Début de l'historique (AAAA-MM-JJ)
        #[arg(long, default_value = DEFAULT_START_DATE)]
        start_date: String,

        /// Nombre de combinaisons à générer (1-50)
        #[arg(short, long, default_value = "10")]
        count: usize,

        /// Somme minimale des chiffres (0-27)
        #[arg(long, default_value = "10")]
        sum_min: u8,

        /// Somme maximale des chiffres (0-27)
        #[arg(long, default_value = "27")]
        sum_max: u8,

        /// Nombre de chiffres pairs exigé (0-3, impairs = 3 - pairs)
        #[arg(short, long, default_value = "1")]
        even: u8,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Afficher les fréquences par position et les numéros chauds/froids
    Stats {
        /// Début de l'historique (AAAA-MM-JJ)
        #[arg(long, default_value = DEFAULT_START_DATE)]
        start_date: String,
    },

    /// Lister les derniers tirages
    History {
        /// Début de l'historique (AAAA-MM-JJ)
        #[arg(long, default_value = DEFAULT_START_DATE)]
        start_date: String,

        /// Nombre de tirages à afficher
        #[arg(short, long, default_value = "10")]
        last: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Predict {
            start_date,
            count,
            sum_min,
            sum_max,
            even,
            seed,
        } => cmd_predict(&start_date, count, sum_min, sum_max, even, seed),
        Command::Stats { start_date } => cmd_stats(&start_date),
        Command::History { start_date, last } => cmd_history(&start_date, last),
    }
}

fn cmd_predict(
    start_date: &str,
    count: usize,
    sum_min: u8,
    sum_max: u8,
    even: u8,
    seed: Option<u64>,
) -> Result<()> {
    if count < 1 || count > 50 {
        bail!("Le nombre de combinaisons doit être entre 1 et 50");
    }
    if sum_max > DIGIT_SUM_MAX {
        bail!("La somme maximale ne peut dépasser {}", DIGIT_SUM_MAX);
    }
    if sum_min > sum_max {
        bail!(
            "Somme minimale ({}) supérieure à la somme maximale ({})",
            sum_min,
            sum_max
        );
    }
    if even as usize > DRAW_LEN {
        bail!("Le nombre de chiffres pairs doit être entre 0 et {}", DRAW_LEN);
    }

    let result = fetch_checked(start_date)?;
    if result.entries.is_empty() {
        println!("Aucun historique disponible depuis le {}.", start_date);
        return Ok(());
    }

    let draws: Vec<Draw> = result.entries.iter().map(|e| e.draw.clone()).collect();
    let (positional, overall) = analyze(&draws)?;
    let last = result
        .entries
        .last()
        .context("Historique vide après filtrage")?;

    println!("Dernier tirage ({}) : {}", last.date, last.draw);

    let constraint = Constraint {
        count,
        sum_min,
        sum_max,
        even_digits: even,
    };
    let combinations = generate(&positional, &last.draw, &constraint, seed)?;

    display_predictions(&combinations, count);
    display_hot_cold(&overall);
    Ok(())
}

fn cmd_stats(start_date: &str) -> Result<()> {
    let result = fetch_checked(start_date)?;
    if result.entries.is_empty() {
        println!("Aucun historique disponible depuis le {}.", start_date);
        return Ok(());
    }

    let draws: Vec<Draw> = result.entries.iter().map(|e| e.draw.clone()).collect();
    let (positional, overall) = analyze(&draws)?;

    display_frequencies(&positional, &overall, draws.len());
    display_hot_cold(&overall);
    Ok(())
}

fn cmd_history(start_date: &str, last: usize) -> Result<()> {
    let result = fetch_checked(start_date)?;
    if result.entries.is_empty() {
        println!("Aucun historique disponible depuis le {}.", start_date);
        return Ok(());
    }

    // Le plus récent en premier, comme pour une consultation rapide.
    let recent: Vec<_> = result
        .entries
        .iter()
        .rev()
        .take(last)
        .cloned()
        .collect();
    display_history(&recent);
    Ok(())
}

/// Récupère l'historique et signale les entrées écartées.
fn fetch_checked(start_date: &str) -> Result<FetchResult> {
    let agent = make_agent();
    let result = fetch_history(&agent, start_date)?;
    if result.skipped > 0 {
        eprintln!("{} entrée(s) malformée(s) ignorée(s).", result.skipped);
    }
    Ok(result)
}
