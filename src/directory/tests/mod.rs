//! Unit tests for directory types and the in-memory directory.
