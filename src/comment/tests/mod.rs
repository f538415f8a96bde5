//! Unit tests for comment threads.
