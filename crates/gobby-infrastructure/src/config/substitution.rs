//! `${VAR}` / `${VAR:-default}` environment-variable substitution.
//!
//! Applied to raw YAML text before parsing, and reused by the webhook
//! dispatcher for `url`/`headers` substitution (spec's design note that both
//! call sites share one routine).

use std::sync::LazyLock;

use regex::Regex;

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
        .expect("env var substitution pattern is a fixed, valid regex")
});

/// Expands `${VAR}` and `${VAR:-default}` references in `content`.
///
/// `${VAR}` is replaced by the environment value of `VAR`, or left unchanged
/// (literal `${VAR}`) if unset. `${VAR:-default}` falls back to `default`
/// when `VAR` is unset or empty.
#[must_use]
pub fn expand_env_vars(content: &str) -> String {
    ENV_VAR_PATTERN
        .replace_all(content, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            let default_value = caps.get(2).map(|m| m.as_str());
            match std::env::var(var_name) {
                Ok(value) if !value.is_empty() => value,
                _ => default_value.map_or_else(|| caps[0].to_owned(), ToOwned::to_owned),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::expand_env_vars;

    #[test]
    fn substitutes_simple_var() {
        // SAFETY: test-only, single-threaded env mutation scoped to this test.
        unsafe {
            std::env::set_var("GOBBY_TEST_SUBST_VAR", "value123");
        }
        assert_eq!(expand_env_vars("key: ${GOBBY_TEST_SUBST_VAR}"), "key: value123");
        unsafe {
            std::env::remove_var("GOBBY_TEST_SUBST_VAR");
        }
    }

    #[test]
    fn falls_back_to_default_when_unset() {
        assert_eq!(
            expand_env_vars("key: ${GOBBY_TEST_SUBST_MISSING:-fallback}"),
            "key: fallback"
        );
    }

    #[test]
    fn leaves_unresolved_var_with_no_default_literal() {
        assert_eq!(
            expand_env_vars("key: ${GOBBY_TEST_SUBST_MISSING_NO_DEFAULT}"),
            "key: ${GOBBY_TEST_SUBST_MISSING_NO_DEFAULT}"
        );
    }

    #[test]
    fn empty_value_falls_back_to_default() {
        // SAFETY: test-only, single-threaded env mutation scoped to this test.
        unsafe {
            std::env::set_var("GOBBY_TEST_SUBST_EMPTY", "");
        }
        assert_eq!(
            expand_env_vars("key: ${GOBBY_TEST_SUBST_EMPTY:-fallback}"),
            "key: fallback"
        );
        unsafe {
            std::env::remove_var("GOBBY_TEST_SUBST_EMPTY");
        }
    }
}
