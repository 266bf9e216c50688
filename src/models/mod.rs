//! Data models
//!
//! Static reference tables and the transient values computed from them.

mod dose;
mod drug;
mod species;

pub use dose::{DoseInput, DoseResult, DosingRow, DosingTable, Scaling};
pub use drug::{
    find_drug, list_drugs, DoseUnit, DrugProfile, TypicalHumanDose, REFERENCE_HUMAN_WEIGHT_KG,
};
pub use species::Species;
