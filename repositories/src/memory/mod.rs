//! Process-local repositories. Everything is lost on restart; used when no database is
//! configured and in tests.
use engine::{Page, QueryOpts, SortOrder};

mod posts;
mod reports;

pub use posts::MemoryPostRepo;
pub use reports::MemoryReportRepo;

/// Orders `items` by the requested field, then cuts out the requested page.
/// Unknown sort fields keep key order.
fn paginate<T, F>(mut items: Vec<T>, opts: &QueryOpts, field: F) -> Page<T>
where
    F: for<'a> Fn(&'a T, &str) -> Option<&'a str>,
{
    let sort_by = opts
        .sort_by
        .as_deref()
        .filter(|sort_by| items.iter().any(|item| field(item, sort_by).is_some()));

    if let Some(sort_by) = sort_by {
        items.sort_by(|a, b| field(a, sort_by).cmp(&field(b, sort_by)));
        if opts.order.unwrap_or(SortOrder::Desc) == SortOrder::Desc {
            items.reverse();
        }
    }

    let total = items.len() as u64;
    let items = items
        .into_iter()
        .skip(usize::try_from(opts.offset()).unwrap_or(usize::MAX))
        .take(usize::try_from(opts.limit()).unwrap_or(usize::MAX))
        .collect();

    Page::new(items, total, opts)
}
