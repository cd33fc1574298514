//! Business logic services (use cases).
//!
//! Services validate input, enforce ownership rules, and orchestrate
//! repository calls. They depend on traits (ports) -- never on concrete
//! infrastructure implementations.

pub mod answer;
pub mod question;
pub mod timeout;

#[cfg(test)]
pub(crate) mod testing;
