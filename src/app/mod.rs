// Application boundary: ports to external collaborators and the import
// use case that drives them

pub mod import_service;
pub mod ports;
