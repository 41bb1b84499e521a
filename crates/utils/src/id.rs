use uuid::Uuid;

/// Source of unique identifiers for jobs, supplied to callers before they
/// construct one.
pub trait IdGenerator: Send + Sync {
	fn generate(&self) -> String;
}

/// Default generator: UUID v4 rendered in simple form, 32 lowercase hex
/// characters with no dashes.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
	fn generate(&self) -> String {
		Uuid::new_v4().simple().to_string()
	}
}

/// Mint an identifier with the default generator.
#[must_use]
pub fn generate_id() -> String {
	UuidIdGenerator.generate()
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	#[test]
	fn generated_ids_are_simple_form_uuids() {
		let id = generate_id();

		assert_eq!(id.len(), 32);
		assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
	}

	#[test]
	fn generated_ids_do_not_collide() {
		let ids = (0..1000).map(|_| generate_id()).collect::<HashSet<_>>();

		assert_eq!(ids.len(), 1000);
	}
}
