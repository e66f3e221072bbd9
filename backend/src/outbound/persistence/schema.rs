//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Todo items.
    ///
    /// `position` is the 1-based display order; the adapter keeps it
    /// contiguous across inserts, deletes, and reorders.
    todos (id) {
        /// Primary key assigned from a sequence; never reused.
        id -> Int8,
        /// Trimmed title (max 255 characters).
        title -> Varchar,
        /// Completion flag.
        completed -> Bool,
        /// 1-based display position.
        position -> Int4,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last user-visible modification timestamp.
        updated_at -> Timestamptz,
    }
}
