/// File utilities
pub mod files;

/// Hugging Face utilities
pub mod hugging_face;

/// Padding utilities for token sequences
pub mod sequences;

/// Deterministic annotation ids
pub mod ids;
