use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};
use crate::models::{Draw, DRAW_LEN};

/// Multiset de chiffres : nombre d'occurrences par chiffre observé.
///
/// Seuls les chiffres observés figurent dans la table. Le classement par
/// fréquence départage les égalités par chiffre croissant, ce qui rend
/// viviers, chauds et froids déterministes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigitCounts {
    counts: BTreeMap<u8, u32>,
}

impl DigitCounts {
    pub fn record(&mut self, digit: u8) {
        *self.counts.entry(digit).or_insert(0) += 1;
    }

    pub fn count(&self, digit: u8) -> u32 {
        self.counts.get(&digit).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Somme de tous les compteurs.
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Chiffres classés par fréquence décroissante, chiffre croissant à
    /// égalité.
    pub fn by_frequency(&self) -> Vec<(u8, u32)> {
        let mut entries: Vec<(u8, u32)> = self.counts.iter().map(|(&d, &c)| (d, c)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        entries
    }

    /// Les `n` chiffres les plus fréquents (moins si la table en contient
    /// moins de `n`).
    pub fn top(&self, n: usize) -> Vec<u8> {
        self.by_frequency().into_iter().take(n).map(|(d, _)| d).collect()
    }
}

/// Fréquences des chiffres, position par position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionalFrequency {
    pub positions: [DigitCounts; DRAW_LEN],
}

/// Fréquences agrégées sur toutes les positions et tous les tirages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverallFrequency {
    pub counts: DigitCounts,
}

impl OverallFrequency {
    /// Les `n` chiffres les plus fréquents (numéros « chauds »).
    pub fn hot(&self, n: usize) -> Vec<u8> {
        self.counts.top(n)
    }

    /// Les `n` chiffres les moins fréquents (numéros « froids »), dans
    /// l'ordre du classement par fréquence décroissante.
    ///
    /// Quand moins de 2n chiffres distincts ont été observés, chauds et
    /// froids se chevauchent.
    pub fn cold(&self, n: usize) -> Vec<u8> {
        let ranked = self.counts.by_frequency();
        let skip = ranked.len().saturating_sub(n);
        ranked.into_iter().skip(skip).map(|(d, _)| d).collect()
    }
}

/// Compte chaque chiffre de chaque tirage à sa position, et dans
/// l'agrégat global (trois incréments par tirage dans l'agrégat).
///
/// Une séquence vide est une entrée valide : les deux tables sont vides.
/// Échoue sur un tirage dont la longueur diffère de [`DRAW_LEN`].
pub fn analyze(draws: &[Draw]) -> CoreResult<(PositionalFrequency, OverallFrequency)> {
    let mut positional = PositionalFrequency::default();
    let mut overall = OverallFrequency::default();

    for draw in draws {
        if draw.digits.len() != DRAW_LEN {
            return Err(CoreError::MalformedDraw {
                expected: DRAW_LEN,
                found: draw.digits.len(),
            });
        }
        for (i, &digit) in draw.digits.iter().enumerate() {
            positional.positions[i].record(digit);
            overall.counts.record(digit);
        }
    }

    Ok((positional, overall))
}
