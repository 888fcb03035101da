//! Finished records.

use std::ops::Deref;

use serde_json::Value;

use crate::context::Context;
use crate::global::local::LocalMethod;
use crate::model::{Chain, Fields};
use crate::propagation::lineage;
use crate::sink::Entry;

/// Record field holding the rendered chain.
pub const KEY_FINGERPRINT: &str = "log.fp";

/// Record field naming how the entry was made.
pub const KEY_SOURCE: &str = "log.src";
pub const SOURCE_MAKER: &str = "maker";
pub const SOURCE_PREBUILT: &str = "prebuilt";
pub const SOURCE_SINK: &str = "sink";

/// A built log record: an entry carrying the resolved chain and columns.
///
/// Dereferences to [`Entry`] for emitting (`record.info("...")`).
#[derive(Debug, Clone)]
pub struct Record {
    entry: Entry,
    chain: Chain,
}

impl Record {
    pub(crate) fn new(entry: Entry, chain: Chain) -> Self {
        Self { entry, chain }
    }

    /// Chain resolved for this record.
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    pub fn fields(&self) -> &Fields {
        self.entry.data()
    }

    /// Attach one more field to this record only.
    pub fn with_field(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            entry: self.entry.with_field(key, value),
            chain: self.chain,
        }
    }

    /// Attach several fields to this record only.
    pub fn with_fields(self, fields: Fields) -> Self {
        Self {
            entry: self.entry.with_fields(fields),
            chain: self.chain,
        }
    }

    /// Extend the record's method/fingerprint lineage.
    pub fn with_fp_appends<I, S>(self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        Self {
            entry: lineage::insert(self.entry, &segments),
            chain: self.chain,
        }
    }

    /// Carry this record's lineage into `ctx` before the record is dropped.
    pub fn release(&self, ctx: &Context) -> Context {
        lineage::release(ctx, &self.entry)
    }

    /// A dev-only copy of this record, routed to the local sink.
    pub fn dev(&self) -> Record {
        LocalMethod::Dev
            .log(std::iter::empty::<String>())
            .with_fields(self.fields().clone())
    }
}

impl Deref for Record {
    type Target = Entry;

    fn deref(&self) -> &Self::Target {
        &self.entry
    }
}
