//! Unit tests for the store adapters.
