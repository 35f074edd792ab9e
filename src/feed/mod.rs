//! Feed processing
//!
//! Everything between the raw upstream bytes and the serialized response
//! body lives here: the XML document tree (`document`), size extraction and
//! range checks (`size_filter`), and the channel reconstruction that applies
//! the per-item verdicts (`filter_engine`).

pub mod document;
pub mod filter_engine;
pub mod size_filter;
