/// CLI Indexes: Tokenizers
pub mod tokenizers;
