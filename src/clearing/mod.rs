mod walk;

pub mod uniform;
