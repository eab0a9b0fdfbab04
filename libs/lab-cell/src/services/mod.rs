pub mod lab;

pub use lab::LabService;
