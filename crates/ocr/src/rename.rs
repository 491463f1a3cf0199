use std::collections::HashMap;

use slipsort_core::{Category, Money, ReceiptDate, RenameStatus};

/// Per-batch registry of issued base names. Lives for exactly one batch
/// run and guarantees that no two records in that batch finalize to the
/// same file name. It knows nothing about files already on disk — that
/// check belongs to whoever performs the actual rename.
#[derive(Debug, Default)]
pub struct NameRegistry {
    counts: HashMap<String, u32>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Times this base name has been issued so far.
    pub fn count(&self, base: &str) -> u32 {
        self.counts.get(base).copied().unwrap_or(0)
    }

    /// Issue the base name once more, returning the prior count.
    fn issue(&mut self, base: &str) -> u32 {
        let entry = self.counts.entry(base.to_string()).or_insert(0);
        let prior = *entry;
        *entry += 1;
        prior
    }
}

/// A finalized, batch-unique file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalName {
    pub file_name: String,
    pub status: RenameStatus,
}

/// Compose the sanitized base name: `"{Category} - {date} - {amount}"`,
/// with "Unknown Date" and "$0.00" standing in for absent fields.
pub fn base_name(category: Category, date: Option<ReceiptDate>, amount: Option<Money>) -> String {
    let date_part = date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "Unknown Date".to_string());
    let amount_part = amount.unwrap_or_else(Money::zero).to_string();
    sanitize(&format!("{category} - {date_part} - {amount_part}"))
}

/// Replace characters that are illegal in file names on common
/// filesystems (`< > : " / \ | ? *` and control characters) with a
/// dash, then collapse whitespace runs and trim.
pub fn sanitize(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Finalize a base name against the batch registry.
///
/// First issue of a base gets `"{base}.{ext}"` and `Renamed`; a repeat
/// with prior count N gets `"{base} (N).{ext}"` and `CollisionResolved`.
/// Registry counts only ever increase within a batch.
pub fn finalize(base: &str, extension: &str, registry: &mut NameRegistry) -> FinalName {
    let ext = extension.trim_start_matches('.');
    let prior = registry.issue(base);
    let stem = if prior == 0 {
        base.to_string()
    } else {
        format!("{base} ({prior})")
    };
    let file_name = if ext.is_empty() {
        stem
    } else {
        format!("{stem}.{ext}")
    };
    let status = if prior == 0 {
        RenameStatus::Renamed
    } else {
        RenameStatus::CollisionResolved
    };
    FinalName { file_name, status }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_with_all_fields() {
        let base = base_name(
            Category::Restaurant,
            ReceiptDate::from_ymd(2024, 6, 20),
            Some(Money::from_cents(2350)),
        );
        assert_eq!(base, "Restaurant - 20 June 2024 - $23.50");
    }

    #[test]
    fn base_name_with_absent_fields() {
        let base = base_name(Category::Other, None, None);
        assert_eq!(base, "Other - Unknown Date - $0.00");
    }

    #[test]
    fn sanitize_replaces_illegal_characters() {
        assert_eq!(sanitize(r#"a<b>c:d"e/f\g|h?i*j"#), "a-b-c-d-e-f-g-h-i-j");
    }

    #[test]
    fn sanitize_collapses_whitespace() {
        assert_eq!(sanitize("  Gas   -  Unknown  "), "Gas - Unknown");
    }

    #[test]
    fn dollar_sign_survives_sanitizing() {
        assert_eq!(sanitize("Gas - $5.00"), "Gas - $5.00");
    }

    #[test]
    fn first_issue_is_renamed() {
        let mut reg = NameRegistry::new();
        let f = finalize("Gas - Unknown Date - $0.00", "jpg", &mut reg);
        assert_eq!(f.file_name, "Gas - Unknown Date - $0.00.jpg");
        assert_eq!(f.status, RenameStatus::Renamed);
        assert_eq!(reg.count("Gas - Unknown Date - $0.00"), 1);
    }

    #[test]
    fn repeat_issue_gets_suffix_and_monotonic_count() {
        let mut reg = NameRegistry::new();
        let base = "Gas - Unknown Date - $0.00";

        let first = finalize(base, "jpg", &mut reg);
        let second = finalize(base, "jpg", &mut reg);
        let third = finalize(base, "jpg", &mut reg);

        assert_eq!(first.file_name, "Gas - Unknown Date - $0.00.jpg");
        assert_eq!(second.file_name, "Gas - Unknown Date - $0.00 (1).jpg");
        assert_eq!(second.status, RenameStatus::CollisionResolved);
        assert_eq!(third.file_name, "Gas - Unknown Date - $0.00 (2).jpg");
        assert_eq!(reg.count(base), 3);
    }

    #[test]
    fn different_bases_do_not_collide() {
        let mut reg = NameRegistry::new();
        let a = finalize("Gas - Unknown Date - $0.00", "jpg", &mut reg);
        let b = finalize("Other - Unknown Date - $0.00", "jpg", &mut reg);
        assert_eq!(a.status, RenameStatus::Renamed);
        assert_eq!(b.status, RenameStatus::Renamed);
    }

    #[test]
    fn extension_dot_tolerated_and_empty_allowed() {
        let mut reg = NameRegistry::new();
        let with_dot = finalize("Base", ".jpg", &mut reg);
        assert_eq!(with_dot.file_name, "Base.jpg");
        let bare = finalize("NoExt", "", &mut reg);
        assert_eq!(bare.file_name, "NoExt");
    }
}
