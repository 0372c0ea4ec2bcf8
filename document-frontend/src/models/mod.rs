pub mod document;

pub use document::{
    BackendDocument, Document, RegenerateSummaryRequest, RegenerateSummaryResponse, UploadRequest,
};
