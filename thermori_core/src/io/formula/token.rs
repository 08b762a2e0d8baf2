//! Module providing Token struct for lexing

/// Represents Tokens in a reaction formula
#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    /// Metabolite identifier, e.g. `C00031`
    Identifier(String),
    /// Stoichiometric coefficient preceding an identifier
    Number(f64),
    /// `+` separating terms on one side of the reaction
    Plus,
    /// Reaction arrow separating substrates from products
    Arrow,
    Eof,
}
