//! Module providing the Reaction struct for representing parsed reactions

pub mod reaction;
