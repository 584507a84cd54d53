pub mod fields;
pub mod structs;

// Re-export the entity records to provide a clean public API.
pub use structs::{
    Country, Discovery, Disease, DiseaseType, Doctor, Patient, PatientDisease, PublicServant,
    Record, Specialization, User,
};
