//! Filename parsing for anime releases.
//!
//! [`parse`] breaks a release filename into its [`Elements`]; [`guess`] reduces
//! those to the single display title the player script searches AniList with.

pub mod elements;
pub mod guess;
pub mod keyword;
pub mod parser;
pub mod tokenizer;

pub use elements::Elements;
pub use guess::{guess, Guess, GuessError};
pub use parser::parse;
