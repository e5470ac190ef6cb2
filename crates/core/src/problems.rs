pub mod derivative;
pub mod equation;

pub use derivative::DerivativeProvider;
pub use equation::EquationProblem;
