use serde::{Deserialize, Serialize};

/// A bounded slice of a query's results, along with the size of the
/// unpaginated source collection at the instant of the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult<T> {
	page: usize,
	page_size: usize,
	total: usize,
	items: Vec<T>,
}

impl<T> PageResult<T> {
	#[must_use]
	pub fn new(page: usize, page_size: usize, total: usize, items: Vec<T>) -> Self {
		Self {
			page,
			page_size,
			total,
			items,
		}
	}

	/// A page carrying no items and a `total` of zero.
	#[must_use]
	pub fn empty(page: usize, page_size: usize) -> Self {
		Self::new(page, page_size, 0, Vec::new())
	}

	/// 1-based page number this result answers for.
	#[must_use]
	pub const fn page(&self) -> usize {
		self.page
	}

	#[must_use]
	pub const fn page_size(&self) -> usize {
		self.page_size
	}

	/// Size of the unpaginated source at query time; a best-effort hint when
	/// the source is mutated concurrently.
	#[must_use]
	pub const fn total(&self) -> usize {
		self.total
	}

	#[must_use]
	pub fn items(&self) -> &[T] {
		&self.items
	}

	#[must_use]
	pub fn into_items(self) -> Vec<T> {
		self.items
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Convert a page of one element type into a page of another, preserving
	/// the page geometry. An empty source short-circuits to
	/// [`empty`](Self::empty) without ever invoking the function.
	#[must_use]
	pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
		if self.items.is_empty() {
			PageResult::empty(self.page, self.page_size)
		} else {
			PageResult {
				page: self.page,
				page_size: self.page_size,
				total: self.total,
				items: self.items.into_iter().map(f).collect(),
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_page_forces_zero_total() {
		let page = PageResult::<u32>::empty(3, 10);

		assert_eq!(page.page(), 3);
		assert_eq!(page.page_size(), 10);
		assert_eq!(page.total(), 0);
		assert!(page.is_empty());
	}

	#[test]
	fn map_preserves_page_geometry() {
		let page = PageResult::new(2, 2, 5, vec![3, 4]);

		let mapped = page.map(|n| n.to_string());

		assert_eq!(mapped.page(), 2);
		assert_eq!(mapped.page_size(), 2);
		assert_eq!(mapped.total(), 5);
		assert_eq!(mapped.items(), ["3".to_string(), "4".to_string()]);
	}

	#[test]
	fn map_never_invokes_the_function_on_an_empty_page() {
		let page = PageResult::new(4, 2, 7, Vec::<u32>::new());

		let mapped = page.map(|_| -> String { unreachable!("empty pages must short-circuit") });

		assert!(mapped.is_empty());
		assert_eq!(mapped.total(), 0);
		assert_eq!(mapped.page(), 4);
	}
}
