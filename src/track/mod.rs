//! Tracklog samples and the matching engine

pub mod matcher;
pub mod sample;
pub mod series;
pub mod sphere;

#[cfg(test)]
mod tests;
