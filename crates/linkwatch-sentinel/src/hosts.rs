//! Ordered, non-empty host list shared read-only by every probing component

use std::fmt;
use std::sync::Arc;

use crate::error::{Result, SentinelError};

/// Fixed list of addresses to monitor.
///
/// The order is the probe order. Clones share one allocation, so handing the
/// list to several components needs no locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostList(Arc<[String]>);

impl HostList {
    /// Build a host list, rejecting empty lists and blank entries
    pub fn new<I, S>(hosts: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let hosts: Vec<String> = hosts
            .into_iter()
            .map(|h| h.into().trim().to_string())
            .collect();

        if hosts.is_empty() {
            return Err(SentinelError::EmptyHostList);
        }
        if let Some(index) = hosts.iter().position(|h| h.is_empty()) {
            return Err(SentinelError::BlankHost { index });
        }

        Ok(Self(hosts.into()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a constructed list
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for HostList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}
