//! "Backend" simulado en proceso.

mod api;

pub use api::SimulatedApi;
