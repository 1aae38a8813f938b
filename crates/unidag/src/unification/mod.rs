//! Unification strategies, substitutions and triangular binding sets

pub mod algorithm;
pub mod paterson_wegman;
pub mod poly;
pub mod robinson;
pub mod substitution;
pub mod triangular;


pub use algorithm::{Algorithm, UnificationResult};
pub use substitution::{Substitution, SubstitutionDisplay};
pub use triangular::{CycleError, TriangularForm};
