//! Implementations of different branch predictors.

pub mod bimodal;
pub mod counter;
pub mod gshare;
pub mod simple;
pub mod table;
pub mod tournament;

pub use bimodal::*;
pub use counter::*;
pub use gshare::*;
pub use simple::*;
pub use table::*;
pub use tournament::*;

use std::str::FromStr;
use thiserror::Error;

use crate::branch::Outcome;

/// Errors raised while building a predictor.
///
/// These surface before any predictor state exists; a constructor either
/// returns a fully usable predictor or nothing at all.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// Table sizes must be positive powers of two so that an index mask can
    /// be derived from them.
    #[error("table size must be a positive power of two (got {0})")]
    InvalidTableSize(usize),

    /// The requested predictor name is not one of the known strategies.
    #[error("unknown predictor '{0}' (expected Gshare, Bimodal, or Tournament)")]
    UnknownPredictor(String),
}

/// Interface to a predictor whose internal state follows observed branch
/// outcomes.
pub trait BranchPredictor {
    fn name(&self) -> &'static str;

    /// Reset the internal state of the predictor.
    fn reset(&mut self);

    /// Return the predicted outcome for the branch at `pc`.
    ///
    /// This is a pure read of the current state: predicting the same branch
    /// twice without an intervening [`BranchPredictor::update`] yields the
    /// same answer.
    fn predict(&self, pc: u32) -> Outcome;

    /// Update the internal state of the predictor with the correct outcome.
    ///
    /// Must be called once per observed branch, after the corresponding
    /// [`BranchPredictor::predict`] call, with the same `pc`.
    fn update(&mut self, pc: u32, outcome: Outcome);
}

/// The set of table-based prediction strategies that can be selected by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PredictorKind {
    Gshare,
    Bimodal,
    Tournament,
}

impl PredictorKind {
    /// Build a predictor of this kind with the given table size.
    pub fn build(self, table_size: usize) -> Result<Predictor, BuildError> {
        let res = match self {
            Self::Gshare => Predictor::Gshare(Gshare::new(table_size)?),
            Self::Bimodal => Predictor::Bimodal(Bimodal::new(table_size)?),
            Self::Tournament => {
                Predictor::Tournament(Tournament::new(table_size)?)
            },
        };
        Ok(res)
    }
}

impl FromStr for PredictorKind {
    type Err = BuildError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("gshare") {
            Ok(Self::Gshare)
        } else if s.eq_ignore_ascii_case("bimodal") {
            Ok(Self::Bimodal)
        } else if s.eq_ignore_ascii_case("tournament") {
            Ok(Self::Tournament)
        } else {
            Err(BuildError::UnknownPredictor(s.to_string()))
        }
    }
}

/// A predictor variant selected at construction time.
pub enum Predictor {
    Gshare(Gshare),
    Bimodal(Bimodal),
    Tournament(Tournament),
}

impl BranchPredictor for Predictor {
    fn name(&self) -> &'static str {
        match self {
            Self::Gshare(p) => p.name(),
            Self::Bimodal(p) => p.name(),
            Self::Tournament(p) => p.name(),
        }
    }
    fn reset(&mut self) {
        match self {
            Self::Gshare(p) => p.reset(),
            Self::Bimodal(p) => p.reset(),
            Self::Tournament(p) => p.reset(),
        }
    }
    fn predict(&self, pc: u32) -> Outcome {
        match self {
            Self::Gshare(p) => p.predict(pc),
            Self::Bimodal(p) => p.predict(pc),
            Self::Tournament(p) => p.predict(pc),
        }
    }
    fn update(&mut self, pc: u32, outcome: Outcome) {
        match self {
            Self::Gshare(p) => p.update(pc, outcome),
            Self::Bimodal(p) => p.update(pc, outcome),
            Self::Tournament(p) => p.update(pc, outcome),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn kind_parses_canonical_names() {
        assert_eq!("Gshare".parse(), Ok(PredictorKind::Gshare));
        assert_eq!("Bimodal".parse(), Ok(PredictorKind::Bimodal));
        assert_eq!("Tournament".parse(), Ok(PredictorKind::Tournament));
        assert_eq!("gshare".parse(), Ok(PredictorKind::Gshare));
    }

    #[test]
    fn kind_rejects_unknown_names() {
        let res: Result<PredictorKind, _> = "perceptron".parse();
        assert_eq!(
            res,
            Err(BuildError::UnknownPredictor("perceptron".to_string()))
        );
    }

    #[test]
    fn build_propagates_size_errors() {
        assert_eq!(
            PredictorKind::Gshare.build(48).err(),
            Some(BuildError::InvalidTableSize(48))
        );
        assert_eq!(
            PredictorKind::Tournament.build(0).err(),
            Some(BuildError::InvalidTableSize(0))
        );
        assert!(PredictorKind::Bimodal.build(64).is_ok());
    }
}
