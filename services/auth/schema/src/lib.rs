//! sea-orm entities for the auth service database.

pub mod users;
pub mod verification_codes;
