use thiserror::Error;

/// Erreurs du moteur d'analyse et de génération.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Un tirage n'a pas exactement le nombre de positions attendu.
    #[error("tirage malformé : {found} position(s) au lieu de {expected}")]
    MalformedDraw { expected: usize, found: usize },

    #[error("caractère '{0}' invalide dans un tirage (chiffre 0-9 attendu)")]
    InvalidDigit(char),

    /// Aucun chiffre enregistré pour une position : impossible de former
    /// un vivier de candidats.
    #[error("données insuffisantes : aucune fréquence pour la position {position}")]
    InsufficientData { position: usize },
}

pub type CoreResult<T> = Result<T, CoreError>;
