//! Bearer-token types shared by Cinenight services.
//!
//! Tokens are issued by the session layer; services only validate them.

pub mod token;
