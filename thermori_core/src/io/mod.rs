//! Module for reading reaction lists and concentration tables, and for
//! writing reversibility results

pub mod concentration_table;
pub mod formula;
pub mod output;
pub mod reaction_table;
