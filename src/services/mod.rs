/*
 * Responsibility
 * - Domain services shared through AppState
 */
pub mod auth;
