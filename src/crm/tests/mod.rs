//! Unit tests for CRM domain and adapters.

mod directory_tests;
