use crate::{RequestSeq, Service};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Search { seq: RequestSeq, query: String },
    Upload { seq: RequestSeq, source_url: String },
    CheckHealth { seq: RequestSeq, service: Service },
}
