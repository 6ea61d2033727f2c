//! Trivial stateless predictors, useful as comparison floors.

use crate::branch::Outcome;
use crate::predictor::BranchPredictor;

/// A simple predictor with no state: always predict 'taken'.
pub struct TakenPredictor;
impl BranchPredictor for TakenPredictor {
    fn name(&self) -> &'static str { "TakenPredictor" }
    fn reset(&mut self) {}
    fn predict(&self, _pc: u32) -> Outcome { Outcome::T }
    fn update(&mut self, _pc: u32, _outcome: Outcome) {}
}

/// A simple predictor with no state: always predict 'not-taken'.
pub struct NotTakenPredictor;
impl BranchPredictor for NotTakenPredictor {
    fn name(&self) -> &'static str { "NotTakenPredictor" }
    fn reset(&mut self) {}
    fn predict(&self, _pc: u32) -> Outcome { Outcome::N }
    fn update(&mut self, _pc: u32, _outcome: Outcome) {}
}

/// A simple predictor with no state: randomly predict an outcome.
pub struct RandomPredictor;
impl BranchPredictor for RandomPredictor {
    fn name(&self) -> &'static str { "RandomPredictor" }
    fn reset(&mut self) {}
    fn predict(&self, _pc: u32) -> Outcome { rand::random::<bool>().into() }
    fn update(&mut self, _pc: u32, _outcome: Outcome) {}
}
