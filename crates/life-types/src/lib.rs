// ─────────────────────────────────────────────────────────────────────
// Toroidal Life — Shared Types
// License: MIT
// ─────────────────────────────────────────────────────────────────────
pub mod config;
pub mod error;
