//! Record id generation.

use crate::model::{Record, RecordKind};
use uuid::Uuid;

fn id_prefix(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Article => "art",
        RecordKind::Staff => "staff",
    }
}

/// Returns an id of the form `<prefix>-<uuid>` unused in `existing`.
///
/// Imported data may contain arbitrary ids, so candidates are checked
/// against the collection rather than trusted to be unique.
pub(crate) fn fresh_id<R: Record>(existing: &[R]) -> String {
    loop {
        let candidate = format!("{}-{}", id_prefix(R::KIND), Uuid::new_v4().simple());
        if existing.iter().all(|record| record.id() != candidate) {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fresh_id;
    use crate::store::seed::{seed_articles, seed_staff};
    use std::collections::HashSet;

    #[test]
    fn ids_carry_kind_prefix() {
        assert!(fresh_id(&seed_articles()).starts_with("art-"));
        assert!(fresh_id(&seed_staff()).starts_with("staff-"));
    }

    #[test]
    fn rapid_generation_does_not_collide() {
        let articles = seed_articles();
        let ids: HashSet<String> = (0..1_000).map(|_| fresh_id(&articles)).collect();
        assert_eq!(ids.len(), 1_000);
    }
}
