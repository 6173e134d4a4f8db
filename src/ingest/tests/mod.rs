//! Unit tests for ingestion domain, queue, and worker.
