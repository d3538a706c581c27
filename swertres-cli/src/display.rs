use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use swertres_core::frequency::{OverallFrequency, PositionalFrequency};
use swertres_core::models::Combination;

use crate::fetch::HistoryEntry;

pub fn display_history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Date", "Tirage", "Somme", "Pairs", "Impairs"]);

    for entry in entries {
        let evens = entry.draw.even_count();
        let odds = entry.draw.digits.len() as u8 - evens;
        table.add_row(vec![
            entry.date.clone(),
            entry.draw.to_string(),
            entry.draw.digit_sum().to_string(),
            evens.to_string(),
            odds.to_string(),
        ]);
    }

    println!("{table}");
}

pub fn display_predictions(combinations: &[Combination], requested: usize) {
    println!("\n🎲 Combinaisons générées\n");

    if combinations.is_empty() {
        println!("Aucune combinaison ne satisfait les contraintes. Élargissez les bornes de somme ou changez le partage pair/impair.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Combinaison", "Somme", "Pairs", "Impairs"]);

    for (i, combo) in combinations.iter().enumerate() {
        table.add_row(vec![
            format!("{}", i + 1),
            combo.to_string(),
            combo.digit_sum().to_string(),
            combo.even_count().to_string(),
            combo.odd_count().to_string(),
        ]);
    }
    println!("{table}");

    if combinations.len() < requested {
        println!(
            "\n⚠ {} combinaison(s) sur {} demandées : contraintes difficiles à satisfaire avec cet historique.",
            combinations.len(),
            requested
        );
    }
}

pub fn display_hot_cold(overall: &OverallFrequency) {
    let hot = join_digits(&overall.hot(3));
    let cold = join_digits(&overall.cold(3));

    println!("\n🔥 Numéros chauds : {}", hot);
    println!("❄  Numéros froids : {}", cold);
}

pub fn display_frequencies(
    positional: &PositionalFrequency,
    overall: &OverallFrequency,
    window: usize,
) {
    println!("\n📊 Fréquences sur {} tirages\n", window);

    let hot = overall.hot(3);
    let cold = overall.cold(3);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Chiffre",
            "Position 1",
            "Position 2",
            "Position 3",
            "Total",
            "Tag",
        ]);

    // Chiffres observés, classés par fréquence globale décroissante.
    for (digit, total) in overall.counts.by_frequency() {
        let (tag, color) = if hot.contains(&digit) {
            ("CHAUD", Color::Green)
        } else if cold.contains(&digit) {
            ("FROID", Color::Red)
        } else {
            ("-", Color::White)
        };

        table.add_row(vec![
            Cell::new(digit.to_string()),
            Cell::new(positional.positions[0].count(digit).to_string()),
            Cell::new(positional.positions[1].count(digit).to_string()),
            Cell::new(positional.positions[2].count(digit).to_string()),
            Cell::new(total.to_string()),
            Cell::new(tag).fg(color),
        ]);
    }
    println!("{table}");
}

fn join_digits(digits: &[u8]) -> String {
    digits
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
