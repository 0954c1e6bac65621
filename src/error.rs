//! Configuration errors raised while loading maps and setting up a search. Unreachable goals are
//! not errors; they come back as a failed [crate::SearchResult].
use city_maps::MapError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error(transparent)]
    Map(#[from] MapError),

    #[error("no start position (S) found in the map")]
    MissingStart,

    #[error("no goal position (G) found in the map")]
    MissingGoal,

    #[error("unknown algorithm '{0}', expected one of bfs, ucs, a_star")]
    UnknownAlgorithm(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
