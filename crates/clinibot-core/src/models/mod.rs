pub mod answer;
pub mod case;
pub mod registration;
