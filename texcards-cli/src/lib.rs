//! Library half of the texcards binary, split out so the transforms can be unit tested.

pub mod transforms;
