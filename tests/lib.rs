//! Integration test suite for the identity profile generator

mod partner_sampling_tests;
