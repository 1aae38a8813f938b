//! Error types for unidag

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("unknown unification algorithm '{0}' (expected one of: robinson, robinson-poly, paterson-wegman)")]
    UnknownAlgorithm(String),
}

pub type Result<T> = std::result::Result<T, Error>;
