// --- File: crates/agenda_supabase/src/lib.rs ---
// Declare modules within this crate
pub mod auth;
pub mod client;
pub mod doc;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;
pub mod storage;

pub use client::{SupabaseClient, SupabaseError};
pub use repository::AppointmentRepository;
pub use service::{SupabaseAppointmentStore, SupabaseAuthGateway, SupabaseDocumentStorage};
