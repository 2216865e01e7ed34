pub mod medical_notes;
pub mod medications;
