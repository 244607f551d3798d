// File: ./src/model/mod.rs
pub mod document;
pub mod fields;
pub mod flags;
pub mod hebrew;

pub use document::{Document, EditRequest};
pub use fields::FieldSet;
pub use flags::{FourParshiyot, Mevarchim, RoshChodeshDay, ShuvaParasha, SpecialFlags};
pub use hebrew::{HebrewDay, HebrewMonth};
