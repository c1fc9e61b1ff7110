//! Output artifact serialization

pub mod serializer;

pub use serializer::EpgWriter;
