//! Pagination Window
//!
//! Relay-style windowed pagination over time-ordered collections. The window
//! turns `{first, after, before}` into a bounded ascending scan, over-fetches
//! by one record to detect a further page, and shapes the raw scan result
//! into a `Connection`.

use bson::{doc, Document};
use serde::Serialize;
use utoipa::ToSchema;

use crate::access::cursor;
use crate::domain::Record;
use crate::error::{PlatformError, Result};
use crate::repository::RecordAccessor;

/// Caller-supplied window arguments.
///
/// `after` and `before` are mutually exclusive; when both are supplied,
/// `after` takes precedence (preserved upstream behavior, see DESIGN.md).
#[derive(Debug, Clone, Default)]
pub struct PageArgs {
    /// Page size. Absent or zero means no limit.
    pub first: Option<i64>,
    pub after: Option<String>,
    pub before: Option<String>,
}

impl PageArgs {
    pub fn first(first: i64) -> Self {
        Self { first: Some(first), ..Default::default() }
    }

    pub fn after(cursor: impl Into<String>) -> Self {
        Self { after: Some(cursor.into()), ..Default::default() }
    }

    pub fn with_after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    pub fn with_before(mut self, cursor: impl Into<String>) -> Self {
        self.before = Some(cursor.into());
        self
    }
}

/// One node plus the cursor that resumes after it.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Edge<T> {
    pub node: T,
    pub cursor: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

/// A page of results plus metadata.
///
/// `total_count` reflects the page actually returned, not the full filtered
/// set (preserved upstream simplification, see DESIGN.md).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
    pub total_count: usize,
    pub page_info: PageInfo,
}

impl<T> Connection<T> {
    pub fn empty() -> Self {
        Self {
            edges: Vec::new(),
            total_count: 0,
            page_info: PageInfo { end_cursor: None, has_next_page: false },
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|edge| &edge.node)
    }

    /// Project every node, keeping cursors and page info intact.
    pub fn map<U>(self, f: impl Fn(T) -> U) -> Connection<U> {
        Connection {
            edges: self
                .edges
                .into_iter()
                .map(|edge| Edge { node: f(edge.node), cursor: edge.cursor })
                .collect(),
            total_count: self.total_count,
            page_info: self.page_info,
        }
    }
}

/// Run one bounded scan and shape it into a `Connection`.
pub async fn paginate<T, A>(accessor: &A, filter: Document, args: &PageArgs) -> Result<Connection<T>>
where
    T: Record,
    A: RecordAccessor<T> + ?Sized,
{
    let mut filter = filter;

    if let Some(first) = args.first {
        if first < 0 {
            return Err(PlatformError::validation(format!(
                "first must be non-negative, got {first}"
            )));
        }
    }
    // Zero means "no limit" upstream, not an error.
    let limit = args.first.filter(|first| *first > 0);

    // 'before' and 'after' are mutually exclusive; 'after' wins.
    if let Some(after) = &args.after {
        let bound = cursor::decode(after)?;
        filter.insert("createdAt", doc! { "$gt": bson::DateTime::from_chrono(bound) });
    } else if let Some(before) = &args.before {
        let bound = cursor::decode(before)?;
        filter.insert("createdAt", doc! { "$lt": bson::DateTime::from_chrono(bound) });
    }

    // Over-fetch by one to learn whether a further page exists.
    let mut records = accessor.scan(filter, limit.map(|l| l + 1)).await?;

    let has_next_page = match limit {
        Some(limit) => records.len() as i64 == limit + 1,
        None => false,
    };
    if has_next_page {
        records.pop();
    }

    let edges: Vec<Edge<T>> = records
        .into_iter()
        .map(|node| {
            let cursor = cursor::encode(node.created_at());
            Edge { node, cursor }
        })
        .collect();

    let end_cursor = edges.last().map(|edge| edge.cursor.clone());
    let total_count = edges.len();

    Ok(Connection {
        edges,
        total_count,
        page_info: PageInfo { end_cursor, has_next_page },
    })
}
