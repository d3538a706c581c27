use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use swertres_core::models::Draw;

/// API résultats PCSO, jeu STL Swer3.
const API_URL: &str = "https://pcso-lotto-api.onrender.com/api/results";
const GAME: &str = "stl-swer3";

/// Entrée brute telle que renvoyée par l'API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEntry {
    #[serde(default)]
    pub draw_date: Option<String>,
    pub winning_numbers: String,
}

/// Un tirage daté, prêt pour l'analyse et l'affichage.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub date: String,
    pub draw: Draw,
}

#[derive(Debug)]
pub struct FetchResult {
    /// Tirages valides, du plus ancien au plus récent.
    pub entries: Vec<HistoryEntry>,
    /// Entrées écartées car malformées.
    pub skipped: u32,
}

pub fn make_agent() -> ureq::Agent {
    ureq::config::Config::builder()
        .timeout_global(Some(Duration::from_secs(30)))
        .build()
        .new_agent()
}

/// Récupère l'historique des tirages depuis `start_date` (AAAA-MM-JJ).
pub fn fetch_history(agent: &ureq::Agent, start_date: &str) -> Result<FetchResult> {
    let url = format!("{}/{}/{}", API_URL, start_date, GAME);
    let entries: Vec<ApiEntry> = agent
        .get(&url)
        .call()
        .with_context(|| format!("Échec de la requête vers {}", url))?
        .into_body()
        .read_json()
        .context("Réponse API illisible")?;

    Ok(collect_history(entries))
}

/// Convertit les entrées brutes en tirages, en écartant et comptant les
/// malformées. L'ordre de l'API est conservé (le plus récent en dernier).
pub fn collect_history(entries: Vec<ApiEntry>) -> FetchResult {
    let mut result = FetchResult {
        entries: Vec::new(),
        skipped: 0,
    };

    for entry in entries {
        match Draw::parse(entry.winning_numbers.trim()) {
            Ok(draw) => result.entries.push(HistoryEntry {
                date: entry.draw_date.unwrap_or_default(),
                draw,
            }),
            Err(e) => {
                eprintln!("Tirage ignoré ('{}') : {}", entry.winning_numbers, e);
                result.skipped += 1;
            }
        }
    }

    result
}
