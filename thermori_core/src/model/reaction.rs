//! This module provides a struct for representing reactions
use indexmap::IndexMap;

use crate::io::formula::{parse_formula, FormulaParseError};

/// Sparse stoichiometry of a reaction: metabolite identifier mapped to its
/// signed coefficient (negative = substrate, positive = product). Entries
/// are nonzero by construction.
pub type Stoichiometry = IndexMap<String, f64>;

/// Represents a single reaction in a batch
#[derive(Debug, Clone)]
pub struct Reaction {
    /// Used to identify the reaction
    pub name: String,
    /// Formula string the reaction was parsed from
    pub formula: String,
    /// Metabolite stoichiometry of the reaction
    pub stoichiometry: Stoichiometry,
}

impl Reaction {
    /// Parse a reaction formula (e.g. `C00002 + C00001 <=> C00008 + C00009`)
    /// into a named Reaction
    pub fn parse(name: &str, formula: &str) -> Result<Self, FormulaParseError> {
        Ok(Reaction {
            name: name.to_string(),
            formula: formula.to_string(),
            stoichiometry: parse_formula(formula)?,
        })
    }

    /// Sum of product-side stoichiometric coefficients
    pub fn product_weight(&self) -> f64 {
        self.stoichiometry.values().filter(|v| **v > 0.0).sum()
    }

    /// Sum of the absolute values of substrate-side coefficients
    pub fn substrate_weight(&self) -> f64 {
        -self
            .stoichiometry
            .values()
            .filter(|v| **v < 0.0)
            .sum::<f64>()
    }

    /// Number of metabolites in this reaction with no entry in
    /// `concentrations`
    pub fn unknown_count(&self, concentrations: &IndexMap<String, f64>) -> usize {
        self.stoichiometry
            .keys()
            .filter(|m| !concentrations.contains_key(*m))
            .count()
    }

    /// Reaction quotient Q over the supplied concentrations, with
    /// `fixed_concentration` standing in for unmeasured metabolites
    pub fn quotient(&self, concentrations: &IndexMap<String, f64>, fixed_concentration: f64) -> f64 {
        self.stoichiometry
            .iter()
            .map(|(metabolite, coefficient)| {
                let concentration = concentrations
                    .get(metabolite)
                    .copied()
                    .unwrap_or(fixed_concentration);
                concentration.powf(*coefficient)
            })
            .product()
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use crate::model::reaction::Reaction;

    #[test]
    fn test_parse_keeps_name_and_formula() {
        let reaction = Reaction::parse("R1", "A + B <=> C").unwrap();
        assert_eq!(reaction.name, "R1");
        assert_eq!(reaction.formula, "A + B <=> C");
    }

    #[test]
    fn test_weights() {
        let reaction = Reaction::parse("R1", "A + B <=> 3 C").unwrap();
        assert_eq!(reaction.substrate_weight(), 2.0);
        assert_eq!(reaction.product_weight(), 3.0);
    }

    #[test]
    fn test_unknown_count() {
        let reaction = Reaction::parse("R1", "A + B <=> C").unwrap();
        let mut concentrations = IndexMap::new();
        concentrations.insert("A".to_string(), 1e-3);
        assert_eq!(reaction.unknown_count(&concentrations), 2);
        concentrations.insert("B".to_string(), 1e-4);
        concentrations.insert("C".to_string(), 1e-5);
        assert_eq!(reaction.unknown_count(&concentrations), 0);
    }

    #[test]
    fn test_quotient_with_fallback() {
        let reaction = Reaction::parse("R1", "A + B <=> C").unwrap();
        let mut concentrations = IndexMap::new();
        concentrations.insert("A".to_string(), 1e-3);
        // Q = (1e-3)^-1 * (0.1)^-1 * (0.1)^1 = 1000
        let quotient = reaction.quotient(&concentrations, 0.1);
        assert!((quotient - 1000.0).abs() < 1e-9);
    }
}
