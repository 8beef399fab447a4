//! Repositories backed by the database client

pub mod scheduling_link_sql;
