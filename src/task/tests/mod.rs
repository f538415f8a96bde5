//! Unit tests for task lifecycle management.

mod service_tests;
