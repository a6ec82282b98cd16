// Adapters for the external collaborators behind app::ports

pub mod rest_store;
