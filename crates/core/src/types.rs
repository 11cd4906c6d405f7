/// Post and image identifiers are PostgreSQL BIGSERIAL.
pub type DbId = i64;
