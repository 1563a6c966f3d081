//! Terminal front end for the story screen

pub mod play;
