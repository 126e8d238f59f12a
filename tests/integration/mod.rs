//! Integration Tests Module
//!
//! End-to-end checks across the workspace: reference parsing over the whole
//! catalog, PIX payload generation against known-good codes, and the
//! reader/search/history flow over a temporary data directory.

// Reference parser properties over every book and alias
mod reference_test;

// PIX payloads against reference codes
mod pix_test;

// Data split, reading, search and history through the command layer
mod bible_flow_test;
