use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{CoreError, CoreResult};
use crate::frequency::PositionalFrequency;
use crate::models::{Combination, Constraint, Draw, DRAW_LEN};

/// Taille du vivier de candidats par position (les 5 chiffres les plus
/// fréquents).
pub const POOL_SIZE: usize = 5;

/// Probabilité de réinjecter un chiffre du dernier tirage dans un
/// candidat.
pub const LAST_DRAW_MIX_PROB: f64 = 0.4;

/// Plafond de tentatives : `count` fois ce facteur. Garantit la
/// terminaison quand les contraintes sont difficiles ou impossibles.
pub const MAX_ATTEMPTS_FACTOR: usize = 10;

/// Génère des combinaisons biaisées vers les chiffres fréquents, sous
/// contraintes de somme et de parité.
///
/// Avec `seed`, la sortie est entièrement reproductible ; sans, la
/// source d'aléa est initialisée depuis l'entropie du système.
pub fn generate(
    positional: &PositionalFrequency,
    last_draw: &Draw,
    constraint: &Constraint,
    seed: Option<u64>,
) -> CoreResult<Vec<Combination>> {
    let mut rng: StdRng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    generate_with_rng(positional, last_draw, constraint, &mut rng)
}

/// Variante avec source d'aléa injectée, pour les tests déterministes.
///
/// Échantillonnage par rejet : un chiffre tiré uniformément dans le
/// vivier de chaque position, puis avec probabilité
/// [`LAST_DRAW_MIX_PROB`] une position choisie au hasard est remplacée
/// par le chiffre d'une position (indépendante) du dernier tirage. Le
/// candidat n'est retenu que s'il satisfait exactement les contraintes.
/// Peut rendre moins de `count` combinaisons une fois le plafond de
/// tentatives atteint ; ce n'est pas une erreur. Les doublons sont
/// admis.
pub fn generate_with_rng<R: Rng>(
    positional: &PositionalFrequency,
    last_draw: &Draw,
    constraint: &Constraint,
    rng: &mut R,
) -> CoreResult<Vec<Combination>> {
    if last_draw.digits.len() != DRAW_LEN {
        return Err(CoreError::MalformedDraw {
            expected: DRAW_LEN,
            found: last_draw.digits.len(),
        });
    }

    let pools = candidate_pools(positional)?;

    let max_attempts = constraint.count * MAX_ATTEMPTS_FACTOR;
    let mut combinations = Vec::with_capacity(constraint.count);
    let mut attempts = 0;

    while combinations.len() < constraint.count && attempts < max_attempts {
        let mut digits = [0u8; DRAW_LEN];
        for (i, pool) in pools.iter().enumerate() {
            digits[i] = pool[rng.random_range(0..pool.len())];
        }

        if rng.random::<f64>() < LAST_DRAW_MIX_PROB {
            let target = rng.random_range(0..DRAW_LEN);
            let source = rng.random_range(0..DRAW_LEN);
            digits[target] = last_draw.digits[source];
        }

        if constraint.accepts(&digits) {
            combinations.push(Combination { digits });
        }
        attempts += 1;
    }

    Ok(combinations)
}

/// Vivier par position : les [`POOL_SIZE`] chiffres les plus fréquents.
/// Une position sans aucun chiffre enregistré rend la génération
/// impossible.
fn candidate_pools(positional: &PositionalFrequency) -> CoreResult<[Vec<u8>; DRAW_LEN]> {
    let mut pools: [Vec<u8>; DRAW_LEN] = Default::default();
    for (i, counts) in positional.positions.iter().enumerate() {
        if counts.is_empty() {
            return Err(CoreError::InsufficientData { position: i });
        }
        pools[i] = counts.top(POOL_SIZE);
    }
    Ok(pools)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::analyze;
    use crate::models::DIGIT_SUM_MAX;

    fn history() -> Vec<Draw> {
        ["123", "456", "147", "258", "369", "123", "951", "753", "159", "357"]
            .iter()
            .map(|s| Draw::parse(s).unwrap())
            .collect()
    }

    fn constraint(count: usize, sum_min: u8, sum_max: u8, even_digits: u8) -> Constraint {
        Constraint {
            count,
            sum_min,
            sum_max,
            even_digits,
        }
    }

    #[test]
    fn test_every_combination_satisfies_constraints() {
        let draws = history();
        let (positional, _) = analyze(&draws).unwrap();
        let last = draws.last().unwrap();
        let c = constraint(20, 5, 20, 1);

        let combos = generate(&positional, last, &c, Some(42)).unwrap();
        for combo in &combos {
            let sum = combo.digit_sum();
            assert!((5..=20).contains(&sum), "somme {} hors bornes", sum);
            assert_eq!(combo.even_count(), 1, "combinaison {}", combo);
        }
    }

    #[test]
    fn test_all_odd_split_rejects_even_digits() {
        let draws = history();
        let (positional, _) = analyze(&draws).unwrap();
        let last = draws.last().unwrap();
        let c = constraint(10, 0, DIGIT_SUM_MAX, 0);

        let combos = generate(&positional, last, &c, Some(7)).unwrap();
        assert!(!combos.is_empty());
        for combo in &combos {
            assert!(
                combo.digits.iter().all(|d| d % 2 == 1),
                "chiffre pair dans {}",
                combo
            );
        }
    }

    #[test]
    fn test_never_more_than_count() {
        let draws = history();
        let (positional, _) = analyze(&draws).unwrap();
        let last = draws.last().unwrap();
        let c = constraint(5, 0, DIGIT_SUM_MAX, 1);

        let combos = generate(&positional, last, &c, Some(11)).unwrap();
        assert!(combos.len() <= 5);
    }

    #[test]
    fn test_reproducible_with_same_seed() {
        let draws = history();
        let (positional, _) = analyze(&draws).unwrap();
        let last = draws.last().unwrap();
        let c = constraint(10, 5, 20, 1);

        let first = generate(&positional, last, &c, Some(99)).unwrap();
        let second = generate(&positional, last, &c, Some(99)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_attempt_cap_halts_on_impossible_constraint() {
        // Viviers et dernier tirage exclusivement impairs : exiger trois
        // chiffres pairs rejette chaque candidat, le plafond doit borner
        // la boucle.
        let draws: Vec<Draw> = ["135", "579", "913", "357"]
            .iter()
            .map(|s| Draw::parse(s).unwrap())
            .collect();
        let (positional, _) = analyze(&draws).unwrap();
        let last = draws.last().unwrap();
        let c = constraint(5, 0, DIGIT_SUM_MAX, 3);

        let combos = generate(&positional, last, &c, Some(1)).unwrap();
        assert!(combos.is_empty());
    }

    #[test]
    fn test_insufficient_data_on_empty_history() {
        let (positional, _) = analyze(&[]).unwrap();
        let last = Draw::parse("123").unwrap();
        let c = constraint(5, 0, DIGIT_SUM_MAX, 1);

        assert_eq!(
            generate(&positional, &last, &c, Some(1)).unwrap_err(),
            CoreError::InsufficientData { position: 0 }
        );
    }

    #[test]
    fn test_insufficient_data_names_first_empty_position() {
        let mut positional = PositionalFrequency::default();
        positional.positions[0].record(1);
        positional.positions[2].record(3);
        let last = Draw::parse("123").unwrap();
        let c = constraint(5, 0, DIGIT_SUM_MAX, 1);

        assert_eq!(
            generate(&positional, &last, &c, Some(1)).unwrap_err(),
            CoreError::InsufficientData { position: 1 }
        );
    }

    #[test]
    fn test_malformed_last_draw_rejected() {
        let draws = history();
        let (positional, _) = analyze(&draws).unwrap();
        let last = Draw {
            digits: vec![1, 2],
        };
        let c = constraint(5, 0, DIGIT_SUM_MAX, 1);

        assert_eq!(
            generate(&positional, &last, &c, Some(1)).unwrap_err(),
            CoreError::MalformedDraw {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_last_draw_mix_can_escape_pools() {
        // Viviers réduits à {1} partout : seul l'emprunt au dernier
        // tirage peut produire un chiffre pair, donc toute combinaison
        // acceptée contient exactement un 2.
        let draws = vec![Draw::parse("111").unwrap(); 4];
        let (positional, _) = analyze(&draws).unwrap();
        let last = Draw::parse("222").unwrap();
        let c = constraint(10, 0, DIGIT_SUM_MAX, 1);

        let mut rng = StdRng::seed_from_u64(3);
        let combos = generate_with_rng(&positional, &last, &c, &mut rng).unwrap();
        assert!(!combos.is_empty());
        for combo in &combos {
            assert_eq!(combo.even_count(), 1);
            assert_eq!(combo.digits.iter().filter(|&&d| d == 2).count(), 1);
            assert_eq!(combo.digits.iter().filter(|&&d| d == 1).count(), 2);
        }
    }

    #[test]
    fn test_pool_limited_to_top_five() {
        // Position 0 : 6 chiffres distincts, le moins fréquent (9, une
        // seule occurrence) ne doit jamais sortir du vivier.
        let draws: Vec<Draw> = ["111", "222", "333", "444", "555", "911", "122", "233", "344", "455"]
            .iter()
            .map(|s| Draw::parse(s).unwrap())
            .collect();
        let (positional, _) = analyze(&draws).unwrap();
        assert_eq!(positional.positions[0].distinct(), 6);

        let last = Draw::parse("111").unwrap();
        let c = constraint(30, 0, DIGIT_SUM_MAX, 2);
        let combos = generate(&positional, &last, &c, Some(5)).unwrap();
        for combo in &combos {
            assert_ne!(combo.digits[0], 9, "9 hors vivier dans {}", combo);
        }
    }
}
