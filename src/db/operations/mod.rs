pub mod locations;
pub mod words;
