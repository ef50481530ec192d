//! Plan descriptors
//!
//! A plan is the uploaded sheet measurements are drawn against. The engine
//! treats it as opaque beyond its identity; rendering the backing document
//! is a collaborator's job.

use crate::measurement::PlanId;
use serde::{Deserialize, Serialize};

/// Descriptor of a plan document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Unique identifier
    pub id: PlanId,
    /// Display name, usually the uploaded file name
    pub name: String,
    /// Location of the backing document (URL or file path)
    pub resource_url: String,
    /// Number of pages in the document
    pub page_count: u16,
    /// Upload timestamp as reported by the document collaborator
    pub uploaded_at: Option<String>,
}

impl Plan {
    /// Create a plan descriptor with a fresh id
    pub fn new(name: impl Into<String>, resource_url: impl Into<String>, page_count: u16) -> Self {
        Self {
            id: PlanId::new_v4(),
            name: name.into(),
            resource_url: resource_url.into(),
            page_count,
            uploaded_at: None,
        }
    }
}
